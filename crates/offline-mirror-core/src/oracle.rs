//! The resolution oracle seam
//!
//! The closure resolver never resolves anything itself. It builds isolated
//! [`DetachedContext`]s and asks a [`ResolutionOracle`] what files they resolve
//! to under a given [`ResolutionView`].

use std::fmt;
use std::path::PathBuf;

use crate::coordinate::Coordinate;
use crate::error::Result;

/// Which classified variant of each module a query should return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionView {
    /// The normal resolved-artifact mode (no attribute)
    Primary,
    /// POM, Gradle module metadata, javadoc and sources
    AllFiles,
    /// POM and Gradle module metadata only
    PlatformMetadata,
}

impl ResolutionView {
    /// Value of the documentation-type attribute this view selects
    pub fn attribute(&self) -> Option<&'static str> {
        match self {
            ResolutionView::Primary => None,
            ResolutionView::AllFiles => Some("all-files"),
            ResolutionView::PlatformMetadata => Some("platform-metadata"),
        }
    }
}

impl fmt::Display for ResolutionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.attribute().unwrap_or("primary"))
    }
}

/// Per-query flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryOptions {
    /// Missing or unsupported variants yield nothing instead of failing
    pub lenient: bool,
    /// The view may pick a different variant than the one the graph selected
    pub reselect_variants: bool,
}

impl QueryOptions {
    pub const STRICT: Self = Self {
        lenient: false,
        reselect_variants: false,
    };

    pub const LENIENT_RESELECT: Self = Self {
        lenient: true,
        reselect_variants: true,
    };
}

/// Identity of the component a resolved file belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentId {
    Module(Coordinate),
    /// Produced by another module of the same project
    Project(String),
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentId::Module(coordinate) => write!(f, "{}", coordinate),
            ComponentId::Project(path) => write!(f, "project '{}'", path),
        }
    }
}

/// One file returned by the oracle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    pub component: ComponentId,
    pub file: PathBuf,
}

impl ResolvedArtifact {
    pub fn module(coordinate: Coordinate, file: impl Into<PathBuf>) -> Self {
        Self {
            component: ComponentId::Module(coordinate),
            file: file.into(),
        }
    }

    pub fn coordinate(&self) -> Option<&Coordinate> {
        match &self.component {
            ComponentId::Module(coordinate) => Some(coordinate),
            ComponentId::Project(_) => None,
        }
    }
}

impl fmt::Display for ResolvedArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.file.display(), self.component)
    }
}

/// An isolated resolution context holding only the given coordinates
///
/// Contexts are cheap and built fresh for every query group; nothing resolved
/// in one leaks into another.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetachedContext {
    coordinates: Vec<Coordinate>,
    forced_view: Option<ResolutionView>,
}

impl DetachedContext {
    /// Context around a set of coordinates; duplicates are dropped, order kept
    pub fn new(coordinates: impl IntoIterator<Item = Coordinate>) -> Self {
        let mut unique: Vec<Coordinate> = Vec::new();
        for coordinate in coordinates {
            if !unique.contains(&coordinate) {
                unique.push(coordinate);
            }
        }
        Self {
            coordinates: unique,
            forced_view: None,
        }
    }

    /// Context around exactly one coordinate
    pub fn of(coordinate: Coordinate) -> Self {
        Self {
            coordinates: vec![coordinate],
            forced_view: None,
        }
    }

    /// Set the view attribute on the context itself rather than on a query
    pub fn with_forced_view(mut self, view: ResolutionView) -> Self {
        self.forced_view = Some(view);
        self
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn forced_view(&self) -> Option<ResolutionView> {
        self.forced_view
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// The view a query actually runs under
    ///
    /// A primary query on a context with a forced attribute uses that
    /// attribute; an explicit view always wins.
    pub fn effective_view(&self, requested: ResolutionView) -> ResolutionView {
        match (requested, self.forced_view) {
            (ResolutionView::Primary, Some(forced)) => forced,
            (requested, _) => requested,
        }
    }
}

/// External dependency-resolution engine
pub trait ResolutionOracle {
    /// Resolve every module in `context` and return the files `view` selects
    ///
    /// With `options.lenient` set, modules without a matching variant must
    /// contribute nothing rather than fail.
    fn resolve(
        &self,
        context: &DetachedContext,
        view: ResolutionView,
        options: QueryOptions,
    ) -> Result<Vec<ResolvedArtifact>>;
}

impl<T: ResolutionOracle + ?Sized> ResolutionOracle for &T {
    fn resolve(
        &self,
        context: &DetachedContext,
        view: ResolutionView,
        options: QueryOptions,
    ) -> Result<Vec<ResolvedArtifact>> {
        (**self).resolve(context, view, options)
    }
}
