//! Text blocks emitted into a generated file.
//!
//! The layout is what gofmt would produce, so generated files stay stable
//! under `go fmt` and compare byte-for-byte across runs.

use crate::request::ElementType;

/// Identity written into the generated-code header.
pub const GENERATOR_IDENTITY: &str = "github.com/acomagu/optional";

/// Header comment, blank line, package clause, blank line.
pub fn render_header(package_name: &str) -> String {
    format!("// Code generated by {GENERATOR_IDENTITY}. DO NOT EDIT.\n\npackage {package_name}\n\n")
}

/// A standalone import statement followed by a blank line.
pub fn render_import(path: &str) -> String {
    format!("import \"{path}\"\n\n")
}

/// The declaration block for one optional type.
pub fn render_unit(option_name: &str, element_type: &ElementType) -> String {
    let ty = format!("Optional{option_name}");
    let elem = element_type.as_str();

    format!(
        "// {option_name}
type {ty} struct {{
\tv   {elem}
\thas bool
}}

func None{option_name}() {ty} {{
\treturn {ty}{{}}
}}

func Some{option_name}(v {elem}) {ty} {{
\treturn {ty}{{
\t\tv:   v,
\t\thas: true,
\t}}
}}

func (o {ty}) Get() ({elem}, bool) {{
\treturn o.v, o.has
}}
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNT_UNIT: &str = "// Count
type OptionalCount struct {
\tv   *int
\thas bool
}

func NoneCount() OptionalCount {
\treturn OptionalCount{}
}

func SomeCount(v *int) OptionalCount {
\treturn OptionalCount{
\t\tv:   v,
\t\thas: true,
\t}
}

func (o OptionalCount) Get() (*int, bool) {
\treturn o.v, o.has
}
";

    #[test]
    fn test_render_header() {
        assert_eq!(
            render_header("main"),
            "// Code generated by github.com/acomagu/optional. DO NOT EDIT.\n\npackage main\n\n"
        );
    }

    #[test]
    fn test_render_import() {
        assert_eq!(render_import("os"), "import \"os\"\n\n");
        assert_eq!(
            render_import("github.com/pkg/errors"),
            "import \"github.com/pkg/errors\"\n\n"
        );
    }

    #[test]
    fn test_render_unit_matches_gofmt_layout() {
        assert_eq!(render_unit("Count", &"*int".into()), COUNT_UNIT);
    }

    #[test]
    fn test_render_unit_names() {
        let unit = render_unit("X", &"string".into());

        assert_eq!(unit.matches("type OptionalX struct").count(), 1);
        assert_eq!(unit.matches("func NoneX() OptionalX").count(), 1);
        assert_eq!(unit.matches("func SomeX(v string) OptionalX").count(), 1);
        assert_eq!(unit.matches(") Get() (").count(), 1);
        assert!(unit.starts_with("// X\n"));
    }

    #[test]
    fn test_render_unit_qualified_type() {
        let unit = render_unit("File", &"*os.File".into());

        assert!(unit.contains("\tv   *os.File\n"));
        assert!(unit.contains("func SomeFile(v *os.File) OptionalFile {"));
        assert!(unit.contains("func (o OptionalFile) Get() (*os.File, bool) {"));
    }
}
