//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use offline_mirror_core::{
    Coordinate, DetachedContext, MirrorError, QueryOptions, ResolutionOracle, ResolutionView,
    ResolvedArtifact, Result,
};
use tempfile::TempDir;

pub fn coordinate(notation: &str) -> Coordinate {
    notation.parse().unwrap()
}

/// Oracle serving files from a temp directory, keyed by coordinate and view
pub struct FixtureOracle {
    dir: TempDir,
    files: HashMap<(Coordinate, ResolutionView), Vec<PathBuf>>,
    pub queries: RefCell<Vec<(Vec<Coordinate>, ResolutionView)>>,
}

impl FixtureOracle {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            files: HashMap::new(),
            queries: RefCell::new(Vec::new()),
        }
    }

    /// Create `name` with `content` and serve it for `notation` under `view`
    pub fn serve(&mut self, notation: &str, view: ResolutionView, name: &str, content: &str) -> PathBuf {
        let coordinate = coordinate(notation);
        let dir = self.dir.path().join(coordinate.notation().replace(':', "_"));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        self.files
            .entry((coordinate, view))
            .or_default()
            .push(path.clone());
        path
    }

    pub fn queried(&self, notation: &str) -> bool {
        let coordinate = coordinate(notation);
        self.queries
            .borrow()
            .iter()
            .any(|(coordinates, _)| coordinates.contains(&coordinate))
    }
}

impl ResolutionOracle for FixtureOracle {
    fn resolve(
        &self,
        context: &DetachedContext,
        view: ResolutionView,
        options: QueryOptions,
    ) -> Result<Vec<ResolvedArtifact>> {
        self.queries
            .borrow_mut()
            .push((context.coordinates().to_vec(), view));

        let view = context.effective_view(view);
        let mut artifacts = Vec::new();
        for coordinate in context.coordinates() {
            match self.files.get(&(coordinate.clone(), view)) {
                Some(paths) => artifacts.extend(
                    paths
                        .iter()
                        .map(|p| ResolvedArtifact::module(coordinate.clone(), p)),
                ),
                None if !options.lenient => {
                    return Err(MirrorError::ArtifactNotFound {
                        coordinate: coordinate.clone(),
                        file: view.to_string(),
                    });
                }
                None => {}
            }
        }
        Ok(artifacts)
    }
}

pub fn pom(notation: &str, body: &str) -> String {
    let c = coordinate(notation);
    format!(
        "<project><groupId>{}</groupId><artifactId>{}</artifactId><version>{}</version>{}</project>",
        c.group(),
        c.artifact(),
        c.version(),
        body
    )
}

pub fn parent_block(notation: &str) -> String {
    let c = coordinate(notation);
    format!(
        "<parent><groupId>{}</groupId><artifactId>{}</artifactId><version>{}</version></parent>",
        c.group(),
        c.artifact(),
        c.version()
    )
}

pub fn bom_import_block(notation: &str) -> String {
    let c = coordinate(notation);
    format!(
        "<dependencyManagement><dependencies><dependency>\
           <groupId>{}</groupId><artifactId>{}</artifactId><version>{}</version>\
           <type>pom</type><scope>import</scope>\
         </dependency></dependencies></dependencyManagement>",
        c.group(),
        c.artifact(),
        c.version()
    )
}

/// Every file under `root`, as sorted `/`-separated relative paths
pub fn tree(root: &Path) -> Vec<String> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<String>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(&path, root, out);
            } else {
                let relative = path.strip_prefix(root).unwrap();
                let parts: Vec<String> = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().to_string())
                    .collect();
                out.push(parts.join("/"));
            }
        }
    }

    let mut out = Vec::new();
    if root.exists() {
        walk(root, root, &mut out);
    }
    out.sort();
    out
}
