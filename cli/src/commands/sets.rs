//! The `sets` command

use anyhow::Result;
use offline_mirror_core::{Declaration, DeclarationSet, ProjectContext};
use std::fmt::Write;
use std::path::Path;

use crate::config;

/// Describe every declaration set of a manifest
pub fn describe_sets(manifest: Option<&Path>) -> Result<String> {
    let Some(path) = config::find_manifest(manifest)? else {
        anyhow::bail!("No {} found in the current directory", crate::MANIFEST_FILE_NAME);
    };
    let project = config::load_manifest(&path)?.project()?;

    let mut out = String::new();
    writeln!(out, "Declaration sets:")?;
    write_sets(&mut out, &project.declaration_sets())?;
    writeln!(out, "Bootstrap sets:")?;
    write_sets(&mut out, &project.bootstrap_declaration_sets())?;
    Ok(out)
}

fn write_sets(out: &mut String, sets: &[DeclarationSet]) -> std::fmt::Result {
    if sets.is_empty() {
        return writeln!(out, "  (none)");
    }
    for set in sets {
        let external = set
            .declarations()
            .iter()
            .filter_map(Declaration::as_external)
            .count();
        let projects = set.declarations().len() - external;

        write!(out, "  {}: {} dependencies, {} projects", set.name(), external, projects)?;
        if !set.is_resolvable() {
            write!(out, " (not resolvable)")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
