//! Dependency declarations and declaration sets

use std::fmt;

use crate::coordinate::Coordinate;
use crate::error::Result;

/// One top-level dependency declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// A module addressed by its coordinate, resolvable from a repository
    External(Coordinate),
    /// A reference to another module of the same project
    Project(String),
}

impl Declaration {
    /// Declare an external module from `group:artifact:version` notation
    pub fn external(notation: &str) -> Result<Self> {
        Ok(Declaration::External(notation.parse()?))
    }

    pub fn project(path: impl Into<String>) -> Self {
        Declaration::Project(path.into())
    }

    pub fn as_external(&self) -> Option<&Coordinate> {
        match self {
            Declaration::External(coordinate) => Some(coordinate),
            Declaration::Project(_) => None,
        }
    }
}

impl From<Coordinate> for Declaration {
    fn from(coordinate: Coordinate) -> Self {
        Declaration::External(coordinate)
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Declaration::External(coordinate) => write!(f, "{}", coordinate),
            Declaration::Project(path) => write!(f, "project '{}'", path),
        }
    }
}

/// A named, ordered group of declarations
///
/// Sets that only exist to be extended by others are marked unresolvable and
/// are never handed to the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationSet {
    name: String,
    resolvable: bool,
    declarations: Vec<Declaration>,
}

impl DeclarationSet {
    pub fn new(name: impl Into<String>, declarations: Vec<Declaration>) -> Self {
        Self {
            name: name.into(),
            resolvable: true,
            declarations,
        }
    }

    pub fn with_resolvable(mut self, resolvable: bool) -> Self {
        self.resolvable = resolvable;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_resolvable(&self) -> bool {
        self.resolvable
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn push(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }
}

impl fmt::Display for DeclarationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MirrorError;

    #[test]
    fn test_external_declaration() {
        let declaration = Declaration::external("com.example:lib:1.2").unwrap();
        assert_eq!(
            declaration.as_external().map(|c| c.notation()),
            Some("com.example:lib:1.2".to_string())
        );
    }

    #[test]
    fn test_external_declaration_rejects_bad_notation() {
        assert!(matches!(
            Declaration::external("not-a-coordinate"),
            Err(MirrorError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn test_project_declaration_is_not_external() {
        assert!(Declaration::project(":core").as_external().is_none());
    }

    #[test]
    fn test_declaration_set_defaults_to_resolvable() {
        let set = DeclarationSet::new("runtime", vec![]);
        assert!(set.is_resolvable());
        assert!(!set.with_resolvable(false).is_resolvable());
    }
}
