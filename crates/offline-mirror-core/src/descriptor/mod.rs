//! Package descriptors (POM files)
//!
//! The resolver only needs two things from a descriptor: its parent and its
//! imported bills of materials. The repository oracle also reads packaging,
//! properties and direct dependencies to walk the binary dependency graph.
//!
//! - `pom` - [`PomParser`], the XML implementation of [`DescriptorParser`]

pub mod pom;

use std::collections::BTreeMap;
use std::path::Path;

use crate::coordinate::Coordinate;
use crate::error::Result;

pub use pom::PomParser;

/// Extension (and dependency type) of descriptor files
pub const DESCRIPTOR_EXTENSION: &str = "pom";

/// Dependency-management scope marking a bill-of-materials import
pub const IMPORT_SCOPE: &str = "import";

const MAX_INTERPOLATION_PASSES: usize = 8;

/// Turns a descriptor file into a [`Descriptor`]
///
/// Implementations must fail on malformed input rather than return a partial
/// descriptor.
pub trait DescriptorParser {
    fn parse(&self, path: &Path) -> Result<Descriptor>;
}

/// Returns true when the file name ends in `.pom`, ignoring case
pub fn is_descriptor_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| {
            name.to_string_lossy()
                .to_lowercase()
                .ends_with(&format!(".{}", DESCRIPTOR_EXTENSION))
        })
        .unwrap_or(false)
}

/// Reference to another module's descriptor (a `<parent>` block)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRef {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl ModuleRef {
    pub fn notation(&self) -> String {
        format!("{}:{}:{}", self.group, self.artifact, self.version)
    }

    pub fn coordinate(&self) -> Result<Coordinate> {
        self.notation().parse()
    }
}

/// One `<dependency>` entry, direct or managed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEntry {
    pub group: String,
    pub artifact: String,
    pub version: Option<String>,
    pub kind: String,
    pub scope: String,
    pub classifier: Option<String>,
    pub optional: bool,
}

impl DependencyEntry {
    /// `type = pom` and `scope = import`
    pub fn is_bom_import(&self) -> bool {
        self.kind == DESCRIPTOR_EXTENSION && self.scope == IMPORT_SCOPE
    }

    /// `group:artifact:version`, with an empty version when none is declared
    pub fn notation(&self) -> String {
        format!(
            "{}:{}:{}",
            self.group,
            self.artifact,
            self.version.as_deref().unwrap_or_default()
        )
    }

    fn interpolate(&mut self, properties: &BTreeMap<String, String>) {
        let lookup = |key: &str| properties.get(key).cloned();
        self.group = interpolate(&self.group, lookup);
        self.artifact = interpolate(&self.artifact, lookup);
        self.version = self.version.as_deref().map(|v| interpolate(v, lookup));
        self.classifier = self.classifier.as_deref().map(|c| interpolate(c, lookup));
    }
}

/// Structured view of one descriptor file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub group: Option<String>,
    pub artifact: Option<String>,
    pub version: Option<String>,
    pub packaging: String,
    pub parent: Option<ModuleRef>,
    pub properties: BTreeMap<String, String>,
    pub dependencies: Vec<DependencyEntry>,
    pub managed_dependencies: Vec<DependencyEntry>,
}

impl Default for Descriptor {
    fn default() -> Self {
        Self {
            group: None,
            artifact: None,
            version: None,
            packaging: "jar".to_string(),
            parent: None,
            properties: BTreeMap::new(),
            dependencies: Vec::new(),
            managed_dependencies: Vec::new(),
        }
    }
}

impl Descriptor {
    /// Dependency-management entries that import a bill of materials
    pub fn managed_imports(&self) -> impl Iterator<Item = &DependencyEntry> {
        self.managed_dependencies
            .iter()
            .filter(|entry| entry.is_bom_import())
    }

    /// Version pinned for `group:artifact` by dependency management, if any
    pub fn managed_version(&self, group: &str, artifact: &str) -> Option<&str> {
        self.managed_dependencies
            .iter()
            .filter(|entry| entry.group == group && entry.artifact == artifact)
            .find_map(|entry| entry.version.as_deref())
    }

    /// Merge what a parent chain contributes
    ///
    /// Properties already defined here win over inherited ones. Inherited
    /// managed entries are appended after this descriptor's own, then every
    /// placeholder still left is re-expanded with the merged properties.
    pub fn inherit(
        &mut self,
        properties: &BTreeMap<String, String>,
        managed_dependencies: &[DependencyEntry],
    ) {
        for (key, value) in properties {
            self.properties
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        self.managed_dependencies
            .extend(managed_dependencies.iter().cloned());
        self.interpolate_entries();
    }

    pub(crate) fn interpolate_entries(&mut self) {
        let properties = self.properties.clone();
        let lookup = |key: &str| properties.get(key).cloned();

        self.packaging = interpolate(&self.packaging, lookup);
        if let Some(parent) = self.parent.as_mut() {
            parent.group = interpolate(&parent.group, lookup);
            parent.artifact = interpolate(&parent.artifact, lookup);
            parent.version = interpolate(&parent.version, lookup);
        }
        for entry in self
            .dependencies
            .iter_mut()
            .chain(self.managed_dependencies.iter_mut())
        {
            entry.interpolate(&properties);
        }
    }
}

/// Expand `${key}` placeholders
///
/// Unknown keys are left in place. Values that themselves contain
/// placeholders are expanded again, up to a fixed number of passes.
pub fn interpolate(value: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut current = value.to_string();
    for _ in 0..MAX_INTERPOLATION_PASSES {
        if !current.contains("${") {
            break;
        }
        let next = interpolate_once(&current, &lookup);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn interpolate_once(value: &str, lookup: &impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let key = &after[..end];
                match lookup(key) {
                    Some(replacement) => out.push_str(&replacement),
                    None => {
                        out.push_str("${");
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_is_descriptor_file() {
        assert!(is_descriptor_file(Path::new("/repo/lib-1.2.pom")));
        assert!(is_descriptor_file(Path::new("LIB-1.2.POM")));
        assert!(!is_descriptor_file(Path::new("lib-1.2.jar")));
        assert!(!is_descriptor_file(Path::new("lib-1.2.module")));
        assert!(!is_descriptor_file(Path::new("/")));
    }

    #[test]
    fn test_interpolate_known_and_unknown_keys() {
        let properties = props(&[("a", "1"), ("b", "two")]);
        let lookup = |k: &str| properties.get(k).cloned();
        assert_eq!(interpolate("${a}.${b}", lookup), "1.two");
        assert_eq!(interpolate("${missing}", lookup), "${missing}");
        assert_eq!(interpolate("plain", lookup), "plain");
        assert_eq!(interpolate("${unterminated", lookup), "${unterminated");
    }

    #[test]
    fn test_interpolate_nested_values() {
        let properties = props(&[("outer", "${inner}-x"), ("inner", "5")]);
        assert_eq!(
            interpolate("${outer}", |k| properties.get(k).cloned()),
            "5-x"
        );
    }

    #[test]
    fn test_interpolate_self_reference_terminates() {
        let properties = props(&[("loop", "${loop}")]);
        assert_eq!(
            interpolate("${loop}", |k| properties.get(k).cloned()),
            "${loop}"
        );
    }

    #[test]
    fn test_bom_import_detection() {
        let mut entry = DependencyEntry {
            group: "g".into(),
            artifact: "bom".into(),
            version: Some("1".into()),
            kind: "pom".into(),
            scope: "import".into(),
            classifier: None,
            optional: false,
        };
        assert!(entry.is_bom_import());
        entry.scope = "compile".into();
        assert!(!entry.is_bom_import());
    }

    #[test]
    fn test_inherit_keeps_own_properties_and_expands() {
        let mut descriptor = Descriptor {
            properties: props(&[("lib.version", "2.0")]),
            dependencies: vec![DependencyEntry {
                group: "g".into(),
                artifact: "a".into(),
                version: Some("${other.version}".into()),
                kind: "jar".into(),
                scope: "compile".into(),
                classifier: None,
                optional: false,
            }],
            ..Descriptor::default()
        };

        descriptor.inherit(
            &props(&[("lib.version", "1.0"), ("other.version", "3.1")]),
            &[],
        );

        assert_eq!(descriptor.properties["lib.version"], "2.0");
        assert_eq!(descriptor.dependencies[0].version.as_deref(), Some("3.1"));
    }
}
