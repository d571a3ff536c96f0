//! Offline mirroring of Maven-style dependency closures
//!
//! A run collects declaration sets, resolves their full closure through a
//! [`ResolutionOracle`] (including parent POMs and imported BOMs), and copies
//! every resolved file into a repository-layout directory that a build can
//! later use with no network access.
//!
//! - `collector` - which declaration sets a run resolves
//! - `resolver` - the closure walk over dependencies and descriptors
//! - `mirror` - writing the closure to disk
//! - `repository` - a [`ResolutionOracle`] over local and remote Maven repositories
//! - `task` - [`OfflineDownload`], the three stages wired together

pub mod collector;
pub mod coordinate;
pub mod declaration;
pub mod descriptor;
pub mod error;
pub mod mirror;
pub mod oracle;
pub mod repository;
pub mod resolver;
pub mod task;

pub use collector::{ProjectContext, collect_declaration_sets};
pub use coordinate::Coordinate;
pub use declaration::{Declaration, DeclarationSet};
pub use descriptor::{Descriptor, DescriptorParser, PomParser};
pub use error::{MirrorError, Result};
pub use mirror::{MirrorSummary, MirrorWriter};
pub use oracle::{
    ComponentId, DetachedContext, QueryOptions, ResolutionOracle, ResolutionView,
    ResolvedArtifact,
};
pub use repository::MavenRepository;
pub use resolver::{ClosureResolver, ResolvedFileSet};
pub use task::OfflineDownload;
