//! Transitive closure resolution
//!
//! The closure spans two graphs. The binary dependency graph comes from the
//! oracle. The descriptor-inheritance graph (parents and imported BOMs) comes
//! from walking every POM the oracle hands back.
//!
//! ```text
//! declaration ──primary──> files + coordinates
//!                              │
//!                              ├──all-files──────────> javadoc, sources, pom, module
//!                              └──platform-metadata──> pom, module
//!                                                        │
//!            parent / BOM import <──── descriptor walk ──┘
//! ```
//!
//! - `file_set` - [`ResolvedFileSet`], the accumulated output
//! - `queue` - [`DescriptorQueue`], pending and visited descriptors

pub mod file_set;
pub mod queue;

use std::collections::BTreeSet;
use std::path::Path;

use crate::coordinate::Coordinate;
use crate::declaration::{Declaration, DeclarationSet};
use crate::descriptor::{self, DescriptorParser};
use crate::error::Result;
use crate::oracle::{
    ComponentId, DetachedContext, QueryOptions, ResolutionOracle, ResolutionView,
    ResolvedArtifact,
};

pub use file_set::ResolvedFileSet;
pub use queue::DescriptorQueue;

/// Resolves declaration sets into the full set of files to mirror
///
/// One instance serves one run: [`resolve`](Self::resolve) consumes it and
/// hands back the accumulated [`ResolvedFileSet`].
pub struct ClosureResolver<'a> {
    oracle: &'a dyn ResolutionOracle,
    parser: &'a dyn DescriptorParser,
    files: ResolvedFileSet,
    descriptors: DescriptorQueue,
}

impl<'a> ClosureResolver<'a> {
    pub fn new(oracle: &'a dyn ResolutionOracle, parser: &'a dyn DescriptorParser) -> Self {
        Self {
            oracle,
            parser,
            files: ResolvedFileSet::new(),
            descriptors: DescriptorQueue::new(),
        }
    }

    /// Resolve every external declaration, then walk descriptor inheritance
    /// until no unvisited descriptor is left
    pub fn resolve(mut self, sets: &[DeclarationSet]) -> Result<ResolvedFileSet> {
        for set in sets {
            if !set.is_resolvable() {
                tracing::debug!("Declaration set {} skipped due to not being resolvable", set);
                continue;
            }
            self.resolve_set(set)?;
        }

        self.expand_descriptors()?;

        tracing::info!(
            "Resolved {} files across {} modules, {} descriptors walked",
            self.files.file_count(),
            self.files.len(),
            self.descriptors.visited_count()
        );
        Ok(self.files)
    }

    fn resolve_set(&mut self, set: &DeclarationSet) -> Result<()> {
        tracing::info!("Resolving declaration set {}", set);

        for declaration in set.declarations() {
            match declaration {
                Declaration::External(coordinate) => self.resolve_declaration(coordinate)?,
                Declaration::Project(_) => {
                    tracing::debug!(
                        "Dependency {} skipped due to not being an external module",
                        declaration
                    );
                }
            }
        }

        Ok(())
    }

    /// Primary, then all-files and platform-metadata over what primary found
    fn resolve_declaration(&mut self, coordinate: &Coordinate) -> Result<()> {
        tracing::info!("Resolving dependency {}", coordinate);

        let detached = DetachedContext::of(coordinate.clone());
        let primary = self
            .oracle
            .resolve(&detached, ResolutionView::Primary, QueryOptions::STRICT)?;

        let mut new_coordinates = BTreeSet::new();
        for artifact in &primary {
            if let Some(resolved) = artifact.coordinate() {
                new_coordinates.insert(resolved.clone());
            }
        }
        self.record(primary);

        // Views filter per context, so the resolved modules are re-declared
        // into a fresh context before asking for their other variants.
        let seeded = DetachedContext::new(new_coordinates);
        if seeded.is_empty() {
            tracing::debug!("No modules resolved for {}, skipping extra views", coordinate);
            return Ok(());
        }

        self.query_lenient(&seeded, ResolutionView::AllFiles)?;
        self.query_lenient(&seeded, ResolutionView::PlatformMetadata)?;
        Ok(())
    }

    /// Walk pending descriptors until every reachable one has been visited
    fn expand_descriptors(&mut self) -> Result<()> {
        while !self.descriptors.prune() {
            for file in self.descriptors.take_batch() {
                self.collect_descriptor(&file)?;
            }
        }
        Ok(())
    }

    fn collect_descriptor(&mut self, file: &Path) -> Result<()> {
        tracing::info!("Resolving extra descriptor {}", file.display());

        let parsed = self.parser.parse(file)?;

        if let Some(parent) = &parsed.parent {
            self.resolve_detached(parent.coordinate()?, false)?;
        }

        for import in parsed.managed_imports() {
            let coordinate: Coordinate = import.notation().parse()?;
            self.resolve_detached(coordinate, true)?;
        }

        Ok(())
    }

    /// Resolve one coordinate found through a descriptor
    ///
    /// BOM imports pass `skip_main_artifacts`; only their metadata matters.
    /// When neither extra view yields anything the platform-metadata query is
    /// repeated once on a new context with the attribute forced on the context.
    fn resolve_detached(&mut self, coordinate: Coordinate, skip_main_artifacts: bool) -> Result<()> {
        tracing::info!("Resolving extra dependency {}", coordinate);

        let detached = DetachedContext::of(coordinate.clone());
        if !skip_main_artifacts {
            let primary = self
                .oracle
                .resolve(&detached, ResolutionView::Primary, QueryOptions::STRICT)?;
            self.record(primary);
        }

        let all_files = self.query_lenient(&detached, ResolutionView::AllFiles)?;
        let metadata = self.query_lenient(&detached, ResolutionView::PlatformMetadata)?;

        if all_files == 0 && metadata == 0 {
            tracing::info!(
                "No extra artifacts resolved for {}, retrying with platform-metadata forced on the context",
                coordinate
            );
            let forced =
                DetachedContext::of(coordinate).with_forced_view(ResolutionView::PlatformMetadata);
            self.query_lenient(&forced, ResolutionView::PlatformMetadata)?;
        }

        Ok(())
    }

    /// Lenient, reselecting query; returns how many artifacts came back
    fn query_lenient(&mut self, context: &DetachedContext, view: ResolutionView) -> Result<usize> {
        let artifacts = self
            .oracle
            .resolve(context, view, QueryOptions::LENIENT_RESELECT)?;
        let count = artifacts.len();
        self.record(artifacts);
        Ok(count)
    }

    fn record(&mut self, artifacts: Vec<ResolvedArtifact>) {
        for artifact in artifacts {
            tracing::info!("Resolved artifact {}", artifact);

            match artifact.component {
                ComponentId::Module(coordinate) => {
                    if descriptor::is_descriptor_file(&artifact.file) {
                        self.descriptors.enqueue(artifact.file.clone());
                    }
                    self.files.insert(coordinate, artifact.file);
                }
                ComponentId::Project(path) => {
                    tracing::debug!(
                        "Artifact {} skipped due to belonging to project '{}'",
                        artifact.file.display(),
                        path
                    );
                }
            }
        }
    }
}
