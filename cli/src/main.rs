use offline_mirror::commands::{self, download::DownloadOptions};
use offline_mirror::logging;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "offline-mirror",
    about = "Mirror a project's full dependency closure into a Maven-layout directory for offline builds",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Resolve declaration sets and copy every file they need into a mirror
    ///
    /// The closure includes transitive dependencies, javadoc and sources jars,
    /// Gradle module metadata, parent POMs and imported BOMs.
    ///
    /// Examples:
    ///   offline-mirror download -o offline-repo
    ///   offline-mirror download -o offline-repo -s runtime --no-bootstrap
    ///   offline-mirror download -o offline-repo -d com.example:lib:1.2 -r ~/.m2/repository
    Download {
        /// Mirror root directory
        #[arg(long, short = 'o', value_name = "DIR")]
        output: PathBuf,

        /// Project manifest (defaults to ./offline-mirror.toml when present)
        #[arg(long, short = 'm', value_name = "FILE")]
        manifest: Option<PathBuf>,

        /// Only resolve these sets (repeatable; defaults to all sets)
        #[arg(long = "set", short = 's', value_name = "NAME")]
        sets: Vec<String>,

        /// Resolve this dependency instead of the manifest's sets, as group:artifact:version (repeatable)
        #[arg(long = "dependency", short = 'd', value_name = "COORDINATE")]
        dependencies: Vec<String>,

        /// Leave out the manifest's bootstrap sets
        #[arg(long)]
        no_bootstrap: bool,

        /// Repository URL or directory, searched before the manifest's (repeatable)
        #[arg(long = "repository", short = 'r', value_name = "REPO")]
        repositories: Vec<String>,

        /// Download cache for remote repositories
        #[arg(long, value_name = "DIR")]
        cache_dir: Option<PathBuf>,

        /// Debug logging
        #[arg(long, short = 'v')]
        verbose: bool,
    },

    /// List the manifest's declaration sets
    Sets {
        /// Project manifest (defaults to ./offline-mirror.toml)
        #[arg(long, short = 'm', value_name = "FILE")]
        manifest: Option<PathBuf>,
    },

    /// Print the mirror directory of a coordinate
    Path {
        /// Coordinate as group:artifact:version
        coordinate: String,

        /// Mirror root directory
        #[arg(long, short = 'o', value_name = "DIR", default_value = ".")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Download {
            output,
            manifest,
            sets,
            dependencies,
            no_bootstrap,
            repositories,
            cache_dir,
            verbose,
        } => {
            logging::init(verbose)?;

            let options = DownloadOptions {
                output,
                manifest,
                sets,
                dependencies,
                include_bootstrap: !no_bootstrap,
                repositories,
                cache_dir,
            };
            let summary = commands::download::download(&options)?;

            println!(
                "Mirrored {} files for {} modules into {}",
                summary.files,
                summary.modules,
                options.output.display()
            );
        }

        Command::Sets { manifest } => {
            print!("{}", commands::sets::describe_sets(manifest.as_deref())?);
        }

        Command::Path { coordinate, output } => {
            println!(
                "{}",
                commands::path::mirror_path(&coordinate, &output)?.display()
            );
        }
    }

    Ok(())
}
