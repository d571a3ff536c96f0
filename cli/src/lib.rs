pub mod commands;
pub mod config;
pub mod logging;

/// Name of the project manifest looked up in the working directory
pub const MANIFEST_FILE_NAME: &str = "offline-mirror.toml";

/// Repository used when neither the command line nor the manifest names one
pub const DEFAULT_REPOSITORY: &str = "https://repo.maven.apache.org/maven2";
