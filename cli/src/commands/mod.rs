//! Command implementations
//!
//! - `download` - resolve and mirror declaration sets
//! - `sets` - list the manifest's declaration sets
//! - `path` - where a coordinate lands in a mirror

pub mod download;
pub mod path;
pub mod sets;
