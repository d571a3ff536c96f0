//! A resolution oracle over Maven-layout repositories
//!
//! [`MavenRepository`] walks the dependency graph described by POM files,
//! breadth first, keeping the first version it meets for each module. Each
//! module's files are then chosen by the variant rule in [`layout`].
//!
//! - `layout` - file naming and the variant rule
//! - `source` - local and HTTP repositories

pub mod layout;
pub mod source;

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::path::PathBuf;

use crate::coordinate::Coordinate;
use crate::descriptor::{
    DESCRIPTOR_EXTENSION, DependencyEntry, Descriptor, DescriptorParser, PomParser,
};
use crate::error::{MirrorError, Result};
use crate::oracle::{
    DetachedContext, QueryOptions, ResolutionOracle, ResolutionView, ResolvedArtifact,
};

pub use source::{ArtifactSource, HttpSource, LocalSource, source_from_location};

const TRANSITIVE_SCOPES: &[&str] = &["compile", "runtime"];

/// One module selected by a graph walk
#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    coordinate: Coordinate,
    classifier: Option<String>,
    packaging: String,
}

/// Oracle backed by an ordered list of repositories; the first hit wins
pub struct MavenRepository {
    sources: Vec<Box<dyn ArtifactSource>>,
    parser: PomParser,
    descriptors: RefCell<HashMap<Coordinate, Option<Descriptor>>>,
}

impl MavenRepository {
    pub fn new(sources: Vec<Box<dyn ArtifactSource>>) -> Self {
        Self {
            sources,
            parser: PomParser::new(),
            descriptors: RefCell::new(HashMap::new()),
        }
    }

    pub fn locations(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.location()).collect()
    }

    /// Local path of one of a module's files, from the first source that has it
    pub fn locate(&self, coordinate: &Coordinate, file_name: &str) -> Result<Option<PathBuf>> {
        let relative = layout::relative_path(coordinate, file_name);
        for source in &self.sources {
            if let Some(path) = source.fetch(&relative)? {
                return Ok(Some(path));
            }
        }
        Ok(None)
    }

    fn load_descriptor(&self, coordinate: &Coordinate) -> Result<Option<Descriptor>> {
        let file_name = coordinate.file_name(None, DESCRIPTOR_EXTENSION);
        match self.locate(coordinate, &file_name)? {
            Some(path) => Ok(Some(self.parser.parse(&path)?)),
            None => Ok(None),
        }
    }

    /// A module's descriptor with its parent chain merged in
    ///
    /// Parents contribute properties and dependency management. A parent that
    /// cannot be found or that was already seen ends the chain.
    pub fn effective_descriptor(&self, coordinate: &Coordinate) -> Result<Option<Descriptor>> {
        if let Some(cached) = self.descriptors.borrow().get(coordinate) {
            return Ok(cached.clone());
        }

        let effective = match self.load_descriptor(coordinate)? {
            Some(mut descriptor) => {
                let mut properties = BTreeMap::new();
                let mut managed: Vec<DependencyEntry> = Vec::new();
                let mut seen = HashSet::from([coordinate.clone()]);
                let mut next = descriptor.parent.clone();

                while let Some(parent) = next.take() {
                    let Ok(parent) = parent.coordinate() else {
                        tracing::warn!("Malformed parent {} of {}", parent.notation(), coordinate);
                        break;
                    };
                    if !seen.insert(parent.clone()) {
                        break;
                    }
                    let Some(loaded) = self.load_descriptor(&parent)? else {
                        tracing::warn!("Parent {} of {} not found", parent, coordinate);
                        break;
                    };
                    for (key, value) in &loaded.properties {
                        properties
                            .entry(key.clone())
                            .or_insert_with(|| value.clone());
                    }
                    managed.extend(loaded.managed_dependencies.iter().cloned());
                    next = loaded.parent.clone();
                }

                descriptor.inherit(&properties, &managed);
                Some(descriptor)
            }
            None => None,
        };

        self.descriptors
            .borrow_mut()
            .insert(coordinate.clone(), effective.clone());
        Ok(effective)
    }

    /// Breadth-first walk from the context's coordinates
    fn walk(&self, context: &DetachedContext, strict: bool) -> Result<Vec<Node>> {
        let mut selected: HashSet<(String, Option<String>)> = HashSet::new();
        let mut queue: VecDeque<(Coordinate, Option<String>)> = VecDeque::new();

        for coordinate in context.coordinates() {
            if selected.insert((coordinate.module_key(), None)) {
                queue.push_back((coordinate.clone(), None));
            }
        }

        let mut nodes = Vec::new();
        while let Some((coordinate, classifier)) = queue.pop_front() {
            let descriptor = self.effective_descriptor(&coordinate)?;

            if let Some(descriptor) = &descriptor {
                for entry in descriptor.dependencies.iter().filter(|e| is_transitive(e)) {
                    let Some(child) = dependency_coordinate(descriptor, entry, &coordinate, strict)?
                    else {
                        continue;
                    };
                    let key = (child.module_key(), entry.classifier.clone());
                    if selected.insert(key) {
                        queue.push_back((child, entry.classifier.clone()));
                    }
                }
            }

            nodes.push(Node {
                packaging: descriptor
                    .map(|d| d.packaging)
                    .unwrap_or_else(|| "jar".to_string()),
                coordinate,
                classifier,
            });
        }

        Ok(nodes)
    }
}

fn is_transitive(entry: &DependencyEntry) -> bool {
    !entry.optional && entry.kind == "jar" && TRANSITIVE_SCOPES.contains(&entry.scope.as_str())
}

/// Coordinate of a dependency entry, or `None` when it has to be skipped
fn dependency_coordinate(
    descriptor: &Descriptor,
    entry: &DependencyEntry,
    declared_by: &Coordinate,
    strict: bool,
) -> Result<Option<Coordinate>> {
    let version = entry
        .version
        .clone()
        .or_else(|| {
            descriptor
                .managed_version(&entry.group, &entry.artifact)
                .map(str::to_string)
        });

    let Some(version) = version else {
        tracing::warn!(
            "No version for {}:{} declared by {}, skipping",
            entry.group,
            entry.artifact,
            declared_by
        );
        return Ok(None);
    };

    if version.contains("${") || version.starts_with('[') || version.starts_with('(') {
        tracing::warn!(
            "Unsupported version '{}' for {}:{} declared by {}, skipping",
            version,
            entry.group,
            entry.artifact,
            declared_by
        );
        return Ok(None);
    }

    match Coordinate::new(entry.group.as_str(), entry.artifact.as_str(), version) {
        Ok(coordinate) => Ok(Some(coordinate)),
        Err(e) if strict => Err(e),
        Err(e) => {
            tracing::warn!("Skipping dependency of {}: {}", declared_by, e);
            Ok(None)
        }
    }
}

impl ResolutionOracle for MavenRepository {
    fn resolve(
        &self,
        context: &DetachedContext,
        view: ResolutionView,
        options: QueryOptions,
    ) -> Result<Vec<ResolvedArtifact>> {
        let view = context.effective_view(view);
        let strict = !options.lenient;
        let nodes = self.walk(context, strict)?;

        let mut artifacts = Vec::new();
        for node in &nodes {
            let files = layout::variant_files(
                &node.coordinate,
                view,
                &node.packaging,
                node.classifier.as_deref(),
            );

            let mut found = 0;
            for file_name in &files {
                if let Some(path) = self.locate(&node.coordinate, file_name)? {
                    artifacts.push(ResolvedArtifact::module(node.coordinate.clone(), path));
                    found += 1;
                }
            }

            if found == 0 {
                if strict {
                    return Err(MirrorError::ArtifactNotFound {
                        coordinate: node.coordinate.clone(),
                        file: files.join(", "),
                    });
                }
                tracing::debug!("No {} files for {}", view, node.coordinate);
            }
        }

        Ok(artifacts)
    }
}
