use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use plugin_catalog_core::catalog::write_catalog;
use plugin_catalog_core::marketplace::{
    create_marketplace_map, write_marketplace_map, MarketplaceMap,
};
use plugin_catalog_core::{CatalogError, Config, ManifestAggregator, PluginManifest, Result};

mod args;
use args::{Cli, Commands, ConfigAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Some(Commands::Build {
            root,
            out,
            map,
            strict,
            base_dir,
        }) => handle_build(
            config_path,
            &root,
            &out,
            map,
            strict,
            base_dir,
            cli.quiet,
        ),
        Some(Commands::List { root, base_dir }) => handle_list(config_path, &root, base_dir),
        Some(Commands::Map {
            root,
            strict,
            pretty,
            base_dir,
        }) => handle_map(config_path, &root, strict, pretty, base_dir),
        Some(Commands::Config { dir, action }) => {
            let dir = dir.unwrap_or_else(|| PathBuf::from("."));
            handle_config(action, config_path, &dir)
        }
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// `RUST_LOG` wins; otherwise -v selects debug and -q errors only
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = match (verbose, quiet) {
        (true, _) => "plugin_catalog_core=debug,plugin_catalog=debug",
        (false, true) => "error",
        (false, false) => "warn",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(io::stderr),
        )
        .init();
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "plugin-catalog", &mut io::stdout());
}

/// Explicit `--config` must exist; otherwise look in the plugins root
fn load_config(config_path: Option<&Path>, root: &Path) -> Result<Config> {
    debug!(
        "Loading config from {}",
        config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| Config::path(root))
            .display()
    );
    match config_path {
        Some(path) if !path.exists() => Err(CatalogError::ConfigParse {
            path: path.to_path_buf(),
            message: "file not found".to_string(),
        }),
        Some(path) => Config::load(path),
        None => Config::load_from_root(root),
    }
}

fn build_aggregator(config: Config, base_dir: Option<PathBuf>) -> ManifestAggregator {
    let aggregator = ManifestAggregator::new(config);
    match base_dir {
        Some(dir) => aggregator.with_base_dir(dir),
        None => aggregator,
    }
}

fn build_map(manifests: &[PluginManifest], strict: bool) -> Result<MarketplaceMap> {
    let map = create_marketplace_map(manifests);
    if strict {
        return map.strict();
    }
    for collision in map.collisions() {
        eprintln!(
            "{} component '{}' at {} overrides {}",
            "[WARN]".yellow().bold(),
            collision.name,
            collision.path,
            collision.previous_path
        );
    }
    Ok(map)
}

fn handle_build(
    config_path: Option<&Path>,
    root: &Path,
    out: &Path,
    write_map: bool,
    strict: bool,
    base_dir: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let config = load_config(config_path, root)?;
    let output = config.output.clone();
    let manifests = build_aggregator(config, base_dir).collect(root)?;

    let map = if write_map || strict {
        Some(build_map(&manifests, strict)?)
    } else {
        None
    };

    let catalog_path = write_catalog(&manifests, out, &output)?;
    if !quiet {
        println!(
            "{} {} plugin(s) -> {}",
            "[OK]".green().bold(),
            manifests.len(),
            catalog_path.display()
        );
    }

    if let (true, Some(map)) = (write_map, map) {
        let map_path = write_marketplace_map(&map, out, &output)?;
        if !quiet {
            println!(
                "{} {} component(s) -> {}",
                "[OK]".green().bold(),
                map.len(),
                map_path.display()
            );
        }
    }

    Ok(())
}

fn handle_list(config_path: Option<&Path>, root: &Path, base_dir: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path, root)?;
    let manifests = build_aggregator(config, base_dir).collect(root)?;

    if manifests.is_empty() {
        println!("No manifests found under {}", root.display());
        return Ok(());
    }

    println!();
    for manifest in &manifests {
        println!(
            "{} {} {}",
            manifest.name().cyan().bold(),
            manifest.version().dimmed(),
            format!("({})", manifest.license()).as_str().dimmed()
        );
        println!("  {}", manifest.title());
        println!("  by {}", manifest.author());
        for component in manifest.components() {
            println!(
                "  ├── {} {} {}",
                component.name().green(),
                component.version().dimmed(),
                component.path()
            );
        }
        println!();
    }
    println!("Total: {} plugin(s)", manifests.len());

    Ok(())
}

fn handle_map(
    config_path: Option<&Path>,
    root: &Path,
    strict: bool,
    pretty: bool,
    base_dir: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_path, root)?;
    let pretty = pretty || config.output.pretty;
    let manifests = build_aggregator(config, base_dir).collect(root)?;
    let map = build_map(&manifests, strict)?;

    println!("{}", map.to_json(pretty)?);
    Ok(())
}

fn handle_config(action: ConfigAction, config_path: Option<&Path>, dir: &Path) -> Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| Config::path(dir));

    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(&path)?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}", value);
                }
                None => {
                    return Err(CatalogError::ConfigKeyNotFound { key });
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(&path)?;
            config.set(&key, &value)?;
            config.save(&path)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let config = Config::load(&path)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}
