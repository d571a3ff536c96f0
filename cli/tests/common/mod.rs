//! Common test utilities and fixtures

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A command whose HOME (and so config, cache and log directories) is a temp dir
pub fn cmd_with_temp_home() -> (Command, TempDir) {
    let home = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("offline-mirror").unwrap();

    cmd.env("HOME", home.path())
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("XDG_DATA_HOME")
        .env_remove("RUST_LOG");

    (cmd, home)
}

/// Publish files for `group:artifact:version` into a Maven-layout directory
pub fn publish(repo: &Path, group: &str, artifact: &str, version: &str, files: &[(&str, &str)]) {
    let dir = module_dir(repo, group, artifact, version);
    std::fs::create_dir_all(&dir).unwrap();
    for (name, content) in files {
        std::fs::write(dir.join(name), content).unwrap();
    }
}

pub fn module_dir(root: &Path, group: &str, artifact: &str, version: &str) -> PathBuf {
    let mut dir = root.to_path_buf();
    dir.extend(group.split('.'));
    dir.join(artifact).join(version)
}

pub fn pom(group: &str, artifact: &str, version: &str, body: &str) -> String {
    format!(
        "<project><groupId>{}</groupId><artifactId>{}</artifactId><version>{}</version>{}</project>",
        group, artifact, version, body
    )
}

/// A repository with lib:1.2 depending on util:0.9, and a build plugin
pub fn sample_repository() -> TempDir {
    let repo = TempDir::new().unwrap();
    publish(
        repo.path(),
        "com.example",
        "lib",
        "1.2",
        &[
            (
                "lib-1.2.pom",
                &pom(
                    "com.example",
                    "lib",
                    "1.2",
                    "<dependencies><dependency>\
                       <groupId>com.example</groupId><artifactId>util</artifactId><version>0.9</version>\
                     </dependency></dependencies>",
                ),
            ),
            ("lib-1.2.jar", "lib"),
            ("lib-1.2-sources.jar", "lib sources"),
        ],
    );
    publish(
        repo.path(),
        "com.example",
        "util",
        "0.9",
        &[
            ("util-0.9.pom", &pom("com.example", "util", "0.9", "")),
            ("util-0.9.jar", "util"),
        ],
    );
    publish(
        repo.path(),
        "org.example",
        "plugin",
        "3.0",
        &[
            ("plugin-3.0.pom", &pom("org.example", "plugin", "3.0", "")),
            ("plugin-3.0.jar", "plugin"),
        ],
    );
    repo
}

/// Every file under `root`, as sorted `/`-separated relative paths
pub fn tree(root: &Path) -> Vec<String> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<String>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(&path, root, out);
            } else {
                let parts: Vec<String> = path
                    .strip_prefix(root)
                    .unwrap()
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
