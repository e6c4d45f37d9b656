use clap::{Parser, Subcommand};
use colored::Colorize;
use gc_core::config::ConfigLoader;
use gc_protocol::ConfigDocument;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Locate, upgrade and update a project's gen.yaml.
#[derive(Parser, Debug)]
#[command(name = "genconfig", version, about)]
struct Cli {
    /// Log loader activity to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load gen.yaml, migrate it to the current version, add languages and write it back.
    Load {
        /// Directory to start searching from.
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Language that must be present. May be repeated.
        #[arg(short, long = "lang", value_name = "LANG")]
        languages: Vec<String>,

        /// Print the resulting document as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the path of the gen.yaml a load would use, without touching it.
    Locate {
        /// Directory to start searching from.
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Level is overridden by `RUST_LOG`.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Load {
            dir,
            languages,
            json,
        } => {
            let loader = ConfigLoader::new().with_languages(languages);
            let path = loader.locate(&dir)?;
            debug!(path = %path.display(), "Resolved config path");

            let config = loader.load(&dir)?;
            if json {
                print_json(&path, &config)?;
            } else {
                print_summary(&path, &config);
            }
        }
        Command::Locate { dir } => {
            let path = ConfigLoader::new().locate(&dir)?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

fn print_summary(path: &Path, config: &ConfigDocument) {
    println!(
        "{} {} (configVersion {})",
        "Config:".bold(),
        path.display(),
        config.config_version
    );

    if config.languages.is_empty() {
        println!("  no languages configured");
    }
    for (language, settings) in &config.languages {
        if config.is_new(language) {
            println!("  {language} {} {}", settings.version, "(new)".green());
        } else {
            println!("  {language} {}", settings.version);
        }
    }
}

fn print_json(path: &Path, config: &ConfigDocument) -> color_eyre::Result<()> {
    let output = serde_json::json!({
        "path": path.display().to_string(),
        "document": config,
        "new": config.new,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
