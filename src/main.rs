//! CLI entry point for blog-gen

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blog-gen")]
#[command(version)]
#[command(about = "Generate Jekyll sources from headless CMS exports", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate posts, press releases and the blog home
    #[command(alias = "g")]
    Generate {
        /// Jekyll source directory, relative to the base directory
        #[arg(short, long)]
        source: Option<String>,

        /// Data directory holding the CMS feeds, relative to the source
        #[arg(long)]
        data_dir: Option<String>,
    },

    /// Remove generated documents
    Clean,

    /// List the entries of a content type feed
    List {
        /// Content type (posts, categories, authors, assets, blog_home, press_releases)
        #[arg(default_value = "posts")]
        r#type: String,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blog_gen=debug,info"
    } else {
        "blog_gen=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Generate { source, data_dir } => {
            let mut config = blog_gen::Site::load_config(&base_dir)?;
            if let Some(source) = source {
                config.source = source;
            }
            if let Some(data_dir) = data_dir {
                config.data_dir = data_dir;
            }

            let site = blog_gen::Site::with_config(&base_dir, config);
            let report = site.generate()?;

            for skipped in &report.skipped {
                println!(
                    "Skipped {} {}: {}",
                    skipped.content_type, skipped.key, skipped.reason
                );
            }
            println!("Generated {}", report.summary());
        }

        Commands::Clean => {
            let site = blog_gen::Site::new(&base_dir)?;
            let removed = site.clean()?;
            println!("Removed {} generated files", removed);
        }

        Commands::List { r#type } => {
            let site = blog_gen::Site::new(&base_dir)?;
            blog_gen::commands::list::run(&site, &r#type)?;
        }

        Commands::Version => {
            println!("blog-gen version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
