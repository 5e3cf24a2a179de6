use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use optional_core::{default_option_name, merge, ElementType, GenerationRequest, MergeOutcome};
use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Flags accepted with a single dash, the way `go generate` directives write them.
const GO_STYLE_FLAGS: &[&str] = &[
    "type", "name", "output", "import", "append", "package", "dry-run", "json", "verbose",
];

#[derive(Debug, clap::Args)]
pub struct GenerateOptions {
    /// Element type wrapped by the optional (e.g. int, *T, *os.File)
    #[arg(long = "type", value_name = "TYPE")]
    ty: String,

    /// Name used in the generated identifiers (Count -> OptionalCount). Defaults to the
    /// type's base name, capitalized
    #[arg(long)]
    name: Option<String>,

    /// File to write. Defaults to <name>_optional.go in the current directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Import path to declare in the generated file; repeat for more than one
    #[arg(long = "import", value_name = "PATH")]
    imports: Vec<String>,

    /// Keep the units already in the output file and add this one after them
    #[arg(long)]
    append: bool,

    /// Package clause of the generated file
    #[arg(long, env = "GOPACKAGE")]
    package: Option<String>,

    /// Print the merged file to stdout instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Output a JSON report of what was generated
    #[arg(long, conflicts_with = "dry_run")]
    json: bool,
}

#[derive(Debug, Serialize)]
pub struct GenerateReport {
    pub output: PathBuf,
    pub request: GenerationRequest,
    pub policy: optional_core::WritePolicy,
    pub bytes: usize,
    pub written: bool,
}

/// Module entry point
pub fn run(options: GenerateOptions, global: crate::Global) -> Result<()> {
    let request = build_request(&options)?;
    let output = options
        .output
        .clone()
        .unwrap_or_else(|| default_output(&request.option_name));

    if let (Ok(file), Ok(line)) = (std::env::var("GOFILE"), std::env::var("GOLINE")) {
        log::debug!("invoked by go generate from {file}:{line}");
    }
    log::debug!("resolved request: {request:?}");

    if !request.append {
        if let Some(qualifier) = request.unimported_qualifier() {
            log::warn!(
                "type {} refers to package {qualifier} but no --import provides it",
                request.element_type
            );
        }
    }

    let outcome = if options.dry_run {
        let existing = read_existing(&output)?;
        merge(&request, &existing)
            .with_context(|| format!("Failed to merge into {}", output.display()))?
    } else {
        generate_file(&request, &output)?
    };

    if let Some(found) = outcome.existing_package.as_deref() {
        if found != request.package_name {
            log::warn!(
                "{} declares package {found}, not {}; keeping {found}",
                output.display(),
                request.package_name
            );
        }
    }

    if options.dry_run {
        std::io::stdout()
            .write_all(&outcome.content)
            .context("Failed to write to stdout")?;
    }

    let report = GenerateReport {
        output,
        bytes: outcome.content.len(),
        policy: outcome.policy,
        written: !options.dry_run,
        request,
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if global.verbose {
        output_summary(&report);
    }

    Ok(())
}

fn build_request(options: &GenerateOptions) -> Result<GenerationRequest> {
    let package = options.package.clone().ok_or(Error::MissingPackage)?;
    let element_type = ElementType::new(options.ty.clone());

    let option_name = match &options.name {
        Some(name) => name.clone(),
        None => default_option_name(&element_type),
    };
    if option_name.is_empty() {
        return Err(Error::EmptyOptionName(options.ty.clone()).into());
    }

    Ok(GenerationRequest::new(package, option_name, element_type)
        .with_imports(options.imports.iter().cloned())
        .with_append(options.append))
}

/// `Count` -> `count_optional.go`
pub fn default_output(option_name: &str) -> PathBuf {
    PathBuf::from(format!("{}_optional.go", option_name.to_lowercase()))
}

/// Read the target, merge `request` into it and write the result back.
///
/// The new content is fully computed before the target is touched, and is
/// written through a temporary file in the same directory that then replaces
/// the target, so a failure at any step leaves the previous file as it was.
pub fn generate_file(request: &GenerationRequest, path: &Path) -> Result<MergeOutcome> {
    let existing = read_existing(path)?;

    let outcome = merge(request, &existing)
        .with_context(|| format!("Failed to merge into {}", path.display()))?;

    log::info!(
        "writing Optional{} to {} ({:?}, {} bytes)",
        request.option_name,
        path.display(),
        outcome.policy,
        outcome.content.len()
    );
    write_back(&resolve_target(path), &outcome.content)?;

    Ok(outcome)
}

/// Current content of the target; a missing file reads as empty.
fn read_existing(path: &Path) -> Result<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Symlinks are followed so the link survives the replace; a dangling link
/// is replaced by a regular file.
fn resolve_target(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

fn write_back(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create a temporary file in {}", dir.display()))?;
    tmp.write_all(content)
        .context("Failed to write generated content")?;
    tmp.as_file()
        .sync_all()
        .context("Failed to flush generated content")?;

    match fs::metadata(path) {
        Ok(meta) => fs::set_permissions(tmp.path(), meta.permissions())
            .context("Failed to copy permissions of the existing file")?,
        Err(_) => {
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o644))
                    .context("Failed to set file permissions")?;
            }
        }
    }

    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    Ok(())
}

/// Rewrite Go-style `-flag` / `-flag=value` arguments to `--flag` so clap
/// accepts directive lines unchanged. Anything after `--` is left alone.
pub fn normalize_go_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;

    args.into_iter()
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }

            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let flag = rest.split_once('=').map_or(rest, |(flag, _)| flag);
                    if GO_STYLE_FLAGS.contains(&flag) {
                        OsString::from(format!("-{text}"))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}

fn output_summary(report: &GenerateReport) {
    let action = if !report.written {
        "previewed".yellow()
    } else if report.policy.discards_existing() {
        "wrote".green()
    } else {
        "appended".cyan()
    };

    eprintln!(
        "{} {} {} {} ({} bytes)",
        action.bold(),
        format!("Optional{}", report.request.option_name).bold(),
        "->".dimmed(),
        report.output.display(),
        report.bytes
    );
    let element_type = &report.request.element_type;
    let kind = match (element_type.is_pointer(), element_type.qualifier()) {
        (true, Some(pkg)) => format!(" (pointer, package {pkg})"),
        (true, None) => " (pointer)".to_string(),
        (false, Some(pkg)) => format!(" (package {pkg})"),
        (false, None) => String::new(),
    };
    eprintln!(
        "  {} {}{}",
        "type:".dimmed(),
        element_type.as_str(),
        kind.dimmed()
    );
    eprintln!(
        "  {} {}",
        "package:".dimmed(),
        report.request.package_name
    );
    if !report.request.imports.is_empty() {
        eprintln!(
            "  {} {}",
            "imports:".dimmed(),
            report.request.imports.join(", ")
        );
    }
}
