//! The offline download task: collect, resolve, mirror

use std::path::{Path, PathBuf};

use crate::collector::{ProjectContext, collect_declaration_sets};
use crate::declaration::DeclarationSet;
use crate::descriptor::DescriptorParser;
use crate::error::Result;
use crate::mirror::{MirrorSummary, MirrorWriter};
use crate::oracle::ResolutionOracle;
use crate::resolver::ClosureResolver;

/// One configured mirror run
///
/// ```no_run
/// use offline_mirror_core::{MavenRepository, OfflineDownload, PomParser};
/// use offline_mirror_core::repository::LocalSource;
///
/// let repository = MavenRepository::new(vec![Box::new(LocalSource::new("/srv/maven"))]);
/// let sets = vec![offline_mirror_core::DeclarationSet::new(
///     "runtime",
///     vec![offline_mirror_core::Declaration::external("com.example:lib:1.2")?],
/// )];
///
/// OfflineDownload::new("offline-repo")
///     .declaration_sets(sets)
///     .include_bootstrap(false)
///     .run(None, &repository, &PomParser::new())?;
/// # Ok::<(), offline_mirror_core::MirrorError>(())
/// ```
#[derive(Debug, Clone)]
pub struct OfflineDownload {
    output_dir: PathBuf,
    explicit_sets: Vec<DeclarationSet>,
    include_bootstrap: bool,
}

impl OfflineDownload {
    /// A run writing into `output_dir`, over every set, bootstrap included
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            explicit_sets: Vec::new(),
            include_bootstrap: true,
        }
    }

    /// Resolve only these sets; empty means all of the project's sets
    pub fn declaration_sets(mut self, sets: Vec<DeclarationSet>) -> Self {
        self.explicit_sets = sets;
        self
    }

    pub fn include_bootstrap(mut self, include: bool) -> Self {
        self.include_bootstrap = include;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn run(
        &self,
        project: Option<&dyn ProjectContext>,
        oracle: &dyn ResolutionOracle,
        parser: &dyn DescriptorParser,
    ) -> Result<MirrorSummary> {
        let sets = collect_declaration_sets(&self.explicit_sets, self.include_bootstrap, project)?;
        tracing::info!(
            "Mirroring {} declaration sets into {}",
            sets.len(),
            self.output_dir.display()
        );

        let files = ClosureResolver::new(oracle, parser).resolve(&sets)?;
        let writer = MirrorWriter::new(&self.output_dir);
        let summary = writer.write(&files)?;

        tracing::info!(
            "Wrote {} files for {} modules into {}",
            summary.files,
            summary.modules,
            writer.root().display()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let task = OfflineDownload::new("/tmp/mirror");
        assert_eq!(task.output_dir(), Path::new("/tmp/mirror"));
        assert!(task.include_bootstrap);
        assert!(task.explicit_sets.is_empty());
    }

    #[test]
    fn test_run_without_project_or_sets_fails() {
        struct NoOracle;
        impl ResolutionOracle for NoOracle {
            fn resolve(
                &self,
                _: &crate::oracle::DetachedContext,
                _: crate::oracle::ResolutionView,
                _: crate::oracle::QueryOptions,
            ) -> Result<Vec<crate::oracle::ResolvedArtifact>> {
                panic!("no query expected")
            }
        }

        let result = OfflineDownload::new("/tmp/mirror").run(
            None,
            &NoOracle,
            &crate::descriptor::PomParser::new(),
        );
        assert!(matches!(
            result,
            Err(crate::error::MirrorError::MissingProjectContext(_))
        ));
    }
}
