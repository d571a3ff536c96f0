//! Maven repository layout and the variant rule
//!
//! Every module in a Maven-layout repository exposes the same fixed set of
//! file names. The variant rule decides which of them each view selects:
//!
//! | view              | files                                           |
//! |-------------------|-------------------------------------------------|
//! | primary           | `a-v.<packaging ext>` (or `a-v-<classifier>.jar`)|
//! | all-files         | `a-v.pom`, `a-v.module`, `a-v-javadoc.jar`, `a-v-sources.jar` |
//! | platform-metadata | `a-v.module`, `a-v.pom`                         |

use crate::coordinate::Coordinate;
use crate::descriptor::DESCRIPTOR_EXTENSION;
use crate::oracle::ResolutionView;

/// Gradle module metadata extension
pub const MODULE_METADATA_EXTENSION: &str = "module";

/// File extension of the main artifact for a POM packaging
pub fn primary_extension(packaging: &str) -> &'static str {
    match packaging {
        "pom" => DESCRIPTOR_EXTENSION,
        "aar" => "aar",
        "war" => "war",
        "ear" => "ear",
        "zip" => "zip",
        _ => "jar",
    }
}

/// `group/path/artifact/version/file_name`
pub fn relative_path(coordinate: &Coordinate, file_name: &str) -> String {
    format!("{}/{}", coordinate.repository_path(), file_name)
}

/// File names `view` selects for one module
pub fn variant_files(
    coordinate: &Coordinate,
    view: ResolutionView,
    packaging: &str,
    classifier: Option<&str>,
) -> Vec<String> {
    match view {
        ResolutionView::Primary => match classifier {
            Some(classifier) => vec![coordinate.file_name(Some(classifier), "jar")],
            None => vec![coordinate.file_name(None, primary_extension(packaging))],
        },
        ResolutionView::AllFiles => vec![
            coordinate.file_name(None, DESCRIPTOR_EXTENSION),
            coordinate.file_name(None, MODULE_METADATA_EXTENSION),
            coordinate.file_name(Some("javadoc"), "jar"),
            coordinate.file_name(Some("sources"), "jar"),
        ],
        ResolutionView::PlatformMetadata => vec![
            coordinate.file_name(None, MODULE_METADATA_EXTENSION),
            coordinate.file_name(None, DESCRIPTOR_EXTENSION),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lib() -> Coordinate {
        "com.example:lib:1.2".parse().unwrap()
    }

    #[test]
    fn test_primary_extension() {
        assert_eq!(primary_extension("jar"), "jar");
        assert_eq!(primary_extension("bundle"), "jar");
        assert_eq!(primary_extension("maven-plugin"), "jar");
        assert_eq!(primary_extension("pom"), "pom");
        assert_eq!(primary_extension("aar"), "aar");
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(&lib(), "lib-1.2.jar"),
            "com/example/lib/1.2/lib-1.2.jar"
        );
    }

    #[test]
    fn test_variant_files() {
        assert_eq!(
            variant_files(&lib(), ResolutionView::Primary, "jar", None),
            vec!["lib-1.2.jar"]
        );
        assert_eq!(
            variant_files(&lib(), ResolutionView::Primary, "pom", None),
            vec!["lib-1.2.pom"]
        );
        assert_eq!(
            variant_files(&lib(), ResolutionView::Primary, "jar", Some("natives-linux")),
            vec!["lib-1.2-natives-linux.jar"]
        );
        assert_eq!(
            variant_files(&lib(), ResolutionView::AllFiles, "jar", None),
            vec![
                "lib-1.2.pom",
                "lib-1.2.module",
                "lib-1.2-javadoc.jar",
                "lib-1.2-sources.jar"
            ]
        );
        assert_eq!(
            variant_files(&lib(), ResolutionView::PlatformMetadata, "jar", None),
            vec!["lib-1.2.module", "lib-1.2.pom"]
        );
    }
}
