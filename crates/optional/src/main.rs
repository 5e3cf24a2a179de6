use crate::prelude::*;
use clap::Parser;

mod error;
mod generate;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Generate Optional<T> wrapper types for Go, one `go generate` directive at a time"
)]
pub struct App {
    #[clap(flatten)]
    pub generate: crate::generate::GenerateOptions,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "OPTIONAL_VERBOSE", default_value = "false")]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    // `//go:generate optional -type=int -append` spells flags with one dash.
    let app = App::parse_from(crate::generate::normalize_go_flags(std::env::args_os()));

    crate::generate::run(app.generate, app.global)
}
