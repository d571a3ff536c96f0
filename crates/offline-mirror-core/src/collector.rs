//! Choosing which declaration sets a run resolves

use crate::declaration::DeclarationSet;
use crate::error::{MirrorError, Result};

/// What the surrounding build knows about its declaration sets
pub trait ProjectContext {
    /// Every declaration set of the project, in declaration order
    fn declaration_sets(&self) -> Vec<DeclarationSet>;

    /// Sets the build tool itself needs (plugins, build script classpath)
    fn bootstrap_declaration_sets(&self) -> Vec<DeclarationSet>;
}

/// Final ordered list of sets to resolve
///
/// An empty `explicit` list means every set of the project. Bootstrap sets,
/// when requested, come last.
pub fn collect_declaration_sets(
    explicit: &[DeclarationSet],
    include_bootstrap: bool,
    project: Option<&dyn ProjectContext>,
) -> Result<Vec<DeclarationSet>> {
    let mut sets = if explicit.is_empty() {
        project
            .ok_or_else(|| {
                MirrorError::MissingProjectContext(
                    "no declaration sets were given and there is no project to take them from"
                        .to_string(),
                )
            })?
            .declaration_sets()
    } else {
        explicit.to_vec()
    };

    if include_bootstrap {
        let project = project.ok_or_else(|| {
            MirrorError::MissingProjectContext(
                "bootstrap dependencies were requested without a project".to_string(),
            )
        })?;
        sets.extend(project.bootstrap_declaration_sets());
    }

    Ok(sets)
}
