//! POM parsing with quick-xml's serde support

use std::collections::BTreeMap;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Deserialize;

use super::{DependencyEntry, Descriptor, DescriptorParser, ModuleRef};
use crate::error::{MirrorError, Result};

/// Reads Maven POM files
#[derive(Debug, Clone, Copy, Default)]
pub struct PomParser;

impl PomParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse POM text; `origin` is only used in error messages
    pub fn parse_str(&self, content: &str, origin: &Path) -> Result<Descriptor> {
        ensure_project_root(content).map_err(|message| MirrorError::descriptor(origin, message))?;

        let raw: RawProject = quick_xml::de::from_str(content)
            .map_err(|e| MirrorError::descriptor(origin, e))?;

        Ok(raw.into_descriptor())
    }
}

impl DescriptorParser for PomParser {
    fn parse(&self, path: &Path) -> Result<Descriptor> {
        let content = std::fs::read_to_string(path).map_err(|e| MirrorError::io(path, e))?;
        self.parse_str(&content, path)
    }
}

fn ensure_project_root(content: &str) -> std::result::Result<(), String> {
    let mut reader = Reader::from_str(content);
    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) | Ok(Event::Empty(element)) => {
                let name = element.local_name();
                return if name.as_ref() == b"project" {
                    Ok(())
                } else {
                    Err(format!(
                        "expected <project> root element, found <{}>",
                        String::from_utf8_lossy(name.as_ref())
                    ))
                };
            }
            Ok(Event::Eof) => return Err("document has no root element".to_string()),
            Err(e) => return Err(e.to_string()),
            Ok(_) => {}
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProject {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    packaging: Option<String>,
    parent: Option<RawParent>,
    #[serde(default)]
    properties: BTreeMap<String, String>,
    dependencies: Option<RawDependencies>,
    dependency_management: Option<RawDependencyManagement>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParent {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDependencyManagement {
    dependencies: Option<RawDependencies>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDependencies {
    #[serde(default)]
    dependency: Vec<RawDependency>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDependency {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    scope: Option<String>,
    classifier: Option<String>,
    optional: Option<String>,
}

fn text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RawDependency {
    fn into_entry(self) -> DependencyEntry {
        DependencyEntry {
            group: text(self.group_id).unwrap_or_default(),
            artifact: text(self.artifact_id).unwrap_or_default(),
            version: text(self.version),
            kind: text(self.kind).unwrap_or_else(|| "jar".to_string()),
            scope: text(self.scope).unwrap_or_else(|| "compile".to_string()),
            classifier: text(self.classifier),
            optional: text(self.optional).is_some_and(|v| v.eq_ignore_ascii_case("true")),
        }
    }
}

impl RawDependencies {
    fn into_entries(self) -> Vec<DependencyEntry> {
        self.dependency
            .into_iter()
            .map(RawDependency::into_entry)
            .collect()
    }
}

impl RawProject {
    fn into_descriptor(self) -> Descriptor {
        let parent = self.parent.map(|p| ModuleRef {
            group: text(p.group_id).unwrap_or_default(),
            artifact: text(p.artifact_id).unwrap_or_default(),
            version: text(p.version).unwrap_or_default(),
        });

        // groupId and version are inherited from <parent> when omitted
        let group = text(self.group_id).or_else(|| parent.as_ref().map(|p| p.group.clone()));
        let version = text(self.version).or_else(|| parent.as_ref().map(|p| p.version.clone()));
        let artifact = text(self.artifact_id);
        let packaging = text(self.packaging).unwrap_or_else(|| "jar".to_string());

        let mut properties: BTreeMap<String, String> = self
            .properties
            .into_iter()
            .map(|(k, v)| (k, v.trim().to_string()))
            .collect();

        let mut builtin = |keys: &[&str], value: Option<&String>| {
            if let Some(value) = value {
                for key in keys {
                    properties.insert(key.to_string(), value.clone());
                }
            }
        };
        builtin(
            &["project.groupId", "pom.groupId", "groupId"],
            group.as_ref(),
        );
        builtin(
            &["project.artifactId", "pom.artifactId", "artifactId"],
            artifact.as_ref(),
        );
        builtin(&["project.version", "pom.version", "version"], version.as_ref());
        builtin(&["project.packaging"], Some(&packaging));
        if let Some(parent) = parent.as_ref() {
            builtin(&["project.parent.groupId"], Some(&parent.group));
            builtin(&["project.parent.version"], Some(&parent.version));
        }

        let mut descriptor = Descriptor {
            group,
            artifact,
            version,
            packaging,
            parent,
            properties,
            dependencies: self
                .dependencies
                .map(RawDependencies::into_entries)
                .unwrap_or_default(),
            managed_dependencies: self
                .dependency_management
                .and_then(|m| m.dependencies)
                .map(RawDependencies::into_entries)
                .unwrap_or_default(),
        };
        descriptor.interpolate_entries();
        descriptor
    }
}
