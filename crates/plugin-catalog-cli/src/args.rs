use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "plugin-catalog")]
#[command(about = "Build a combined plugin catalog and marketplace map from manifest.json files")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: <ROOT>/plugin-catalog.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect all manifests and write the combined catalog
    Build {
        /// Plugins root directory
        root: PathBuf,

        /// Directory receiving manifests.json
        #[arg(short, long)]
        out: PathBuf,

        /// Also write the marketplace map next to the catalog
        #[arg(long)]
        map: bool,

        /// Fail when two components share a name
        #[arg(long)]
        strict: bool,

        /// Directory component paths are relative to (default: current directory)
        #[arg(long)]
        base_dir: Option<PathBuf>,
    },

    /// List discovered plugins and their components
    List {
        /// Plugins root directory
        root: PathBuf,

        /// Directory component paths are relative to (default: current directory)
        #[arg(long)]
        base_dir: Option<PathBuf>,
    },

    /// Print the component name -> path map as JSON
    Map {
        /// Plugins root directory
        root: PathBuf,

        /// Fail when two components share a name
        #[arg(long)]
        strict: bool,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,

        /// Directory component paths are relative to (default: current directory)
        #[arg(long)]
        base_dir: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        /// Directory holding plugin-catalog.toml (default: current directory)
        #[arg(long)]
        dir: Option<PathBuf>,

        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., scan.marker)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., scan.exclude)
        key: String,

        /// Value to set (e.g., "node_modules,dist" or "[node_modules, dist]")
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Initialize config file with defaults
    Init,
}
