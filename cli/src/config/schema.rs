//! Project manifest schema
//!
//! ```toml
//! repositories = ["https://repo.maven.apache.org/maven2", "./local-repo"]
//!
//! [sets.runtime]
//! dependencies = ["com.example:lib:1.2"]
//! projects = ["core"]
//!
//! [bootstrap.classpath]
//! dependencies = ["org.example:plugin:3.0"]
//! ```
//!
//! Sets are kept in name order.

use anyhow::{Context, Result};
use offline_mirror_core::{Coordinate, Declaration, DeclarationSet, ProjectContext};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Contents of `offline-mirror.toml`
///
/// Every field is optional so a manifest can be as small as one set.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Manifest {
    /// Repository URLs or directories, searched in order
    #[serde(default)]
    pub repositories: Vec<String>,

    /// The project's declaration sets
    #[serde(default)]
    pub sets: BTreeMap<String, SetEntry>,

    /// Sets the build itself needs, mirrored unless bootstrap is turned off
    #[serde(default)]
    pub bootstrap: BTreeMap<String, SetEntry>,
}

/// One declaration set
#[derive(Debug, Clone, Deserialize)]
pub struct SetEntry {
    /// External modules as `group:artifact:version`
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// References to other modules of the same project
    #[serde(default)]
    pub projects: Vec<String>,

    #[serde(default = "default_resolvable")]
    pub resolvable: bool,
}

fn default_resolvable() -> bool {
    true
}

impl SetEntry {
    fn to_declaration_set(&self, name: &str) -> Result<DeclarationSet> {
        let mut set = DeclarationSet::new(name, Vec::new()).with_resolvable(self.resolvable);
        for notation in &self.dependencies {
            let coordinate: Coordinate = notation
                .parse()
                .with_context(|| format!("Invalid dependency in set '{}'", name))?;
            set.push(coordinate.into());
        }
        for path in &self.projects {
            set.push(Declaration::project(path.as_str()));
        }
        Ok(set)
    }
}

impl Manifest {
    /// Check the manifest for every problem at once
    ///
    /// Returns Ok(()) if valid, or Err with a list of error messages
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for (index, repository) in self.repositories.iter().enumerate() {
            if repository.trim().is_empty() {
                errors.push(format!("repositories[{}] is empty", index));
            }
        }

        for (section, sets) in [("sets", &self.sets), ("bootstrap", &self.bootstrap)] {
            for (name, entry) in sets {
                if name.trim().is_empty() {
                    errors.push(format!("{} contains a set with an empty name", section));
                }
                for notation in &entry.dependencies {
                    if let Err(e) = notation.parse::<Coordinate>() {
                        errors.push(format!("{}.{}: {}", section, name, e));
                    }
                }
                for path in &entry.projects {
                    if path.trim().is_empty() {
                        errors.push(format!("{}.{}: empty project reference", section, name));
                    }
                }
            }
        }

        for name in self.sets.keys() {
            if self.bootstrap.contains_key(name) {
                errors.push(format!("set '{}' is defined both in sets and bootstrap", name));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The manifest's sets as a [`ProjectContext`]
    pub fn project(&self) -> Result<ManifestProject> {
        let convert = |sets: &BTreeMap<String, SetEntry>| {
            sets.iter()
                .map(|(name, entry)| entry.to_declaration_set(name))
                .collect::<Result<Vec<_>>>()
        };

        Ok(ManifestProject {
            sets: convert(&self.sets)?,
            bootstrap: convert(&self.bootstrap)?,
        })
    }
}

/// Declaration sets read from a manifest
#[derive(Debug, Clone, Default)]
pub struct ManifestProject {
    sets: Vec<DeclarationSet>,
    bootstrap: Vec<DeclarationSet>,
}

impl ManifestProject {
    /// Look up sets by name across both sections, keeping the requested order
    pub fn select(&self, names: &[String]) -> Result<Vec<DeclarationSet>> {
        names
            .iter()
            .map(|name| {
                self.sets
                    .iter()
                    .chain(&self.bootstrap)
                    .find(|set| set.name() == name)
                    .cloned()
                    .with_context(|| {
                        format!(
                            "Unknown declaration set '{}'. Known sets: {}",
                            name,
                            self.known_names().join(", ")
                        )
                    })
            })
            .collect()
    }

    fn known_names(&self) -> Vec<&str> {
        self.sets
            .iter()
            .chain(&self.bootstrap)
            .map(DeclarationSet::name)
            .collect()
    }
}

impl ProjectContext for ManifestProject {
    fn declaration_sets(&self) -> Vec<DeclarationSet> {
        self.sets.clone()
    }

    fn bootstrap_declaration_sets(&self) -> Vec<DeclarationSet> {
        self.bootstrap.clone()
    }
}
