//! Configuration for offline-mirror
//!
//! - `schema` - the project manifest (`offline-mirror.toml`)
//! - `io` - locating, reading and validating the manifest
//! - `paths` - cache and log directories

pub mod io;
pub mod paths;
pub mod schema;

pub use io::{find_manifest, load_manifest, resolve_repository};
pub use paths::{get_cache_dir, get_log_dir};
pub use schema::{Manifest, ManifestProject, SetEntry};
