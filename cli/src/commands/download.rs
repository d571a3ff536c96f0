//! The `download` command: manifest and flags in, mirror directory out

use anyhow::{Context, Result};
use offline_mirror_core::repository::source_from_location;
use offline_mirror_core::{
    Declaration, DeclarationSet, MavenRepository, MirrorSummary, OfflineDownload, PomParser,
    ProjectContext,
};
use std::path::{Path, PathBuf};

use crate::DEFAULT_REPOSITORY;
use crate::config::{self, Manifest};

/// Name of the set built from `--dependency` flags
pub const COMMAND_LINE_SET: &str = "command-line";

/// Everything the `download` command was asked to do
#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    pub output: PathBuf,
    pub manifest: Option<PathBuf>,
    pub sets: Vec<String>,
    pub dependencies: Vec<String>,
    pub include_bootstrap: bool,
    pub repositories: Vec<String>,
    pub cache_dir: Option<PathBuf>,
}

pub fn download(options: &DownloadOptions) -> Result<MirrorSummary> {
    let manifest_path = config::find_manifest(options.manifest.as_deref())?;
    let manifest = manifest_path
        .as_deref()
        .map(config::load_manifest)
        .transpose()?;
    let project = manifest.as_ref().map(Manifest::project).transpose()?;

    let mut explicit = match &project {
        Some(project) => project.select(&options.sets)?,
        None if !options.sets.is_empty() => anyhow::bail!(
            "--set needs a manifest, but no {} was found",
            crate::MANIFEST_FILE_NAME
        ),
        None => Vec::new(),
    };

    if !options.dependencies.is_empty() {
        let declarations = options
            .dependencies
            .iter()
            .map(|notation| {
                Declaration::external(notation)
                    .with_context(|| format!("Invalid --dependency '{}'", notation))
            })
            .collect::<Result<Vec<_>>>()?;
        explicit.push(DeclarationSet::new(COMMAND_LINE_SET, declarations));
    }

    // Without a manifest there are no bootstrap sets to add
    let include_bootstrap = options.include_bootstrap && project.is_some();
    if options.include_bootstrap && !include_bootstrap {
        tracing::debug!("No manifest, bootstrap sets skipped");
    }

    let manifest_dir = manifest_path
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new(""));
    let repositories = repository_list(&options.repositories, manifest.as_ref(), manifest_dir);

    let cache_dir = match &options.cache_dir {
        Some(dir) => dir.clone(),
        None => config::get_cache_dir()?,
    };

    let sources = repositories
        .iter()
        .map(|location| {
            source_from_location(location, &cache_dir)
                .with_context(|| format!("Failed to set up repository '{}'", location))
        })
        .collect::<Result<Vec<_>>>()?;
    let repository = MavenRepository::new(sources);
    tracing::info!("Using repositories: {}", repository.locations().join(", "));

    OfflineDownload::new(&options.output)
        .declaration_sets(explicit)
        .include_bootstrap(include_bootstrap)
        .run(
            project.as_ref().map(|p| p as &dyn ProjectContext),
            &repository,
            &PomParser::new(),
        )
        .context("Offline download failed")
}

/// Command-line repositories first, then the manifest's, else the default
fn repository_list(
    command_line: &[String],
    manifest: Option<&Manifest>,
    manifest_dir: &Path,
) -> Vec<String> {
    let mut repositories: Vec<String> = command_line.to_vec();
    if let Some(manifest) = manifest {
        repositories.extend(
            manifest
                .repositories
                .iter()
                .map(|entry| config::resolve_repository(entry, manifest_dir)),
        );
    }
    if repositories.is_empty() {
        repositories.push(DEFAULT_REPOSITORY.to_string());
    }
    repositories
}
