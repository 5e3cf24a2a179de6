use serde::{Deserialize, Serialize};
use std::fmt;

/// The wrapped type of a generated optional, kept verbatim as written by the
/// caller (`int`, `*Byte`, `*os.File`, ...).
///
/// No validation happens here; the descriptor is opaque text as far as the
/// merge engine is concerned. The accessors below are read-only views used by
/// the front-end to derive defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementType(String);

impl ElementType {
    pub fn new(descriptor: impl Into<String>) -> Self {
        Self(descriptor.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for `*T` descriptors.
    pub fn is_pointer(&self) -> bool {
        self.0.trim_start().starts_with('*')
    }

    /// Package prefix of a qualified descriptor, `*os.File` -> `os`.
    pub fn qualifier(&self) -> Option<&str> {
        self.unpointered()
            .rsplit_once('.')
            .map(|(pkg, _)| pkg)
            .filter(|pkg| !pkg.is_empty())
    }

    /// Final identifier of the descriptor, `*os.File` -> `File`.
    pub fn base_name(&self) -> &str {
        let bare = self.unpointered();
        bare.rsplit_once('.').map_or(bare, |(_, name)| name)
    }

    fn unpointered(&self) -> &str {
        self.0.trim().trim_start_matches('*')
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementType {
    fn from(descriptor: &str) -> Self {
        Self::new(descriptor)
    }
}

/// Option name used when the caller does not supply one: the element type's
/// base name with its first character upper-cased.
///
/// `string` -> `String`, `*os.File` -> `File`, `*int` -> `Int`.
pub fn default_option_name(element_type: &ElementType) -> String {
    let mut chars = element_type.base_name().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Everything the merge engine needs for one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Package clause written into a fresh header.
    pub package_name: String,
    /// Identifier suffix of the generated type, `Count` -> `OptionalCount`.
    pub option_name: String,
    pub element_type: ElementType,
    /// Import paths, emitted in this order as standalone statements.
    pub imports: Vec<String>,
    /// Keep the target's existing units and add this one after them.
    pub append: bool,
}

impl GenerationRequest {
    pub fn new(
        package_name: impl Into<String>,
        option_name: impl Into<String>,
        element_type: impl Into<ElementType>,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            option_name: option_name.into(),
            element_type: element_type.into(),
            imports: Vec::new(),
            append: false,
        }
    }

    pub fn with_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports = imports.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    /// Package qualifier of the element type that no requested import
    /// provides, matched on the import path's last segment.
    ///
    /// `*os.File` with no imports -> `Some("os")`; with `os` -> `None`.
    pub fn unimported_qualifier(&self) -> Option<&str> {
        let qualifier = self.element_type.qualifier()?;
        let provided = self
            .imports
            .iter()
            .any(|path| path.rsplit('/').next() == Some(qualifier));
        (!provided).then_some(qualifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // ElementType tests
    // ============================================================================

    #[test]
    fn test_element_type_plain() {
        let ty = ElementType::new("int");
        assert!(!ty.is_pointer());
        assert_eq!(ty.qualifier(), None);
        assert_eq!(ty.base_name(), "int");
        assert_eq!(ty.to_string(), "int");
    }

    #[test]
    fn test_element_type_pointer() {
        let ty = ElementType::new("*Byte");
        assert!(ty.is_pointer());
        assert_eq!(ty.qualifier(), None);
        assert_eq!(ty.base_name(), "Byte");
    }

    #[test]
    fn test_element_type_qualified_pointer() {
        let ty = ElementType::new("*os.File");
        assert!(ty.is_pointer());
        assert_eq!(ty.qualifier(), Some("os"));
        assert_eq!(ty.base_name(), "File");
        assert_eq!(ty.to_string(), "*os.File");
    }

    #[test]
    fn test_element_type_display_is_verbatim() {
        // Opaque text: whatever the caller wrote comes back out.
        let ty = ElementType::new("map[string]int");
        assert_eq!(ty.to_string(), "map[string]int");
    }

    // ============================================================================
    // default_option_name tests
    // ============================================================================

    #[test]
    fn test_default_option_name_builtin() {
        assert_eq!(default_option_name(&"string".into()), "String");
        assert_eq!(default_option_name(&"*int".into()), "Int");
    }

    #[test]
    fn test_default_option_name_qualified() {
        assert_eq!(default_option_name(&"*os.File".into()), "File");
        assert_eq!(default_option_name(&"io.Reader".into()), "Reader");
    }

    #[test]
    fn test_default_option_name_empty() {
        assert_eq!(default_option_name(&"".into()), "");
    }

    // ============================================================================
    // GenerationRequest tests
    // ============================================================================

    #[test]
    fn test_request_builder_preserves_import_order() {
        let request = GenerationRequest::new("main", "File", "*os.File")
            .with_imports(["os", "io", "bufio"])
            .with_append(true);

        assert_eq!(request.imports, vec!["os", "io", "bufio"]);
        assert!(request.append);
        assert_eq!(request.element_type.as_str(), "*os.File");
    }

    #[test]
    fn test_unimported_qualifier_missing_import() {
        let request = GenerationRequest::new("main", "File", "*os.File");
        assert_eq!(request.unimported_qualifier(), Some("os"));
    }

    #[test]
    fn test_unimported_qualifier_provided_by_import_path() {
        let request = GenerationRequest::new("main", "Group", "errgroup.Group")
            .with_imports(["golang.org/x/sync/errgroup"]);
        assert_eq!(request.unimported_qualifier(), None);
    }

    #[test]
    fn test_unimported_qualifier_unqualified_type() {
        let request = GenerationRequest::new("main", "Int", "*int");
        assert_eq!(request.unimported_qualifier(), None);
    }

    #[test]
    fn test_request_serializes_element_type_as_string() {
        let request = GenerationRequest::new("main", "Count", "*int");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["element_type"], "*int");
        assert_eq!(json["append"], false);
    }
}
