//! Where repository files come from
//!
//! A source answers one question: given a repository-relative path, is there a
//! local file for it? Local directories answer directly. Remote repositories
//! download into a cache first and answer with the cached copy.

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::error::{MirrorError, Result};

const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// A Maven-layout repository
pub trait ArtifactSource {
    /// Human-readable location, for logs
    fn location(&self) -> String;

    /// Local path of `relative_path`, or `None` if the repository lacks it
    fn fetch(&self, relative_path: &str) -> Result<Option<PathBuf>>;
}

/// Build a source from a CLI/config string
///
/// `http://` and `https://` give an [`HttpSource`] caching under `cache_dir`,
/// `file://` and anything else a [`LocalSource`].
pub fn source_from_location(location: &str, cache_dir: &Path) -> Result<Box<dyn ArtifactSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        return Ok(Box::new(HttpSource::new(location, cache_dir)?));
    }
    let path = location.strip_prefix("file://").unwrap_or(location);
    Ok(Box::new(LocalSource::new(path)))
}

fn join_relative(root: &Path, relative_path: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    path.extend(relative_path.split('/').filter(|part| !part.is_empty()));
    path
}

/// A repository directory on disk (for example `~/.m2/repository`)
#[derive(Debug, Clone)]
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ArtifactSource for LocalSource {
    fn location(&self) -> String {
        self.root.display().to_string()
    }

    fn fetch(&self, relative_path: &str) -> Result<Option<PathBuf>> {
        let path = join_relative(&self.root, relative_path);
        Ok(path.is_file().then_some(path))
    }
}

/// A remote repository downloaded on demand into a cache directory
///
/// Cached files are reused without contacting the server. Paths the server
/// reported missing are remembered for the lifetime of the source.
pub struct HttpSource {
    base_url: String,
    cache_root: PathBuf,
    client: Client,
    missing: RefCell<HashSet<String>>,
}

impl HttpSource {
    pub fn new(base_url: &str, cache_dir: &Path) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(concat!("offline-mirror/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MirrorError::Http {
                url: base_url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            cache_root: cache_dir.join(cache_key(&base_url)),
            base_url,
            client,
            missing: RefCell::new(HashSet::new()),
        })
    }

    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    pub fn url_for(&self, relative_path: &str) -> String {
        format!("{}/{}", self.base_url, relative_path.trim_start_matches('/'))
    }

    fn download(&self, url: &str, destination: &Path) -> Result<bool> {
        let http_error = |message: String| MirrorError::Http {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| http_error(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Ok(false);
        }
        if !status.is_success() {
            return Err(http_error(format!("server responded {}", status)));
        }

        let bytes = response.bytes().map_err(|e| http_error(e.to_string()))?;

        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent).map_err(|e| MirrorError::io(parent, e))?;
        }
        // A half-written download must never look cached
        let mut partial = destination.as_os_str().to_owned();
        partial.push(".part");
        let partial = PathBuf::from(partial);
        std::fs::write(&partial, &bytes).map_err(|e| MirrorError::io(&partial, e))?;
        std::fs::rename(&partial, destination).map_err(|e| MirrorError::io(destination, e))?;

        Ok(true)
    }
}

impl ArtifactSource for HttpSource {
    fn location(&self) -> String {
        self.base_url.clone()
    }

    fn fetch(&self, relative_path: &str) -> Result<Option<PathBuf>> {
        let cached = join_relative(&self.cache_root, relative_path);
        if cached.is_file() {
            return Ok(Some(cached));
        }
        if self.missing.borrow().contains(relative_path) {
            return Ok(None);
        }

        let url = self.url_for(relative_path);
        tracing::debug!("Downloading {}", url);

        if self.download(&url, &cached)? {
            Ok(Some(cached))
        } else {
            self.missing.borrow_mut().insert(relative_path.to_string());
            Ok(None)
        }
    }
}

/// Directory name for one remote repository inside the cache
fn cache_key(base_url: &str) -> String {
    let without_scheme = base_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(base_url);
    without_scheme.replace([':', '/', '?', '&', '='], "_")
}
