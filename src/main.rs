//! CLI entry point for microcms-content

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "microcms-content")]
#[command(version)]
#[command(about = "Fetch blog content from microCMS and adapt it for static sites", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Hide drafts, overriding the `production` config value
    #[arg(long, global = true)]
    production: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter _config.yml
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// List site content
    List {
        /// Type of content to list (post, tag, category)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Print a single post as JSON
    Show {
        /// Slug (content id) of the post
        slug: String,
    },

    /// Export posts, tags and categories as JSON files
    #[command(alias = "g")]
    Export {
        /// Output directory (defaults to the configured public_dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Serve the content views as JSON
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// Remove exported files
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "microcms_content=debug,info"
    } else {
        "microcms_content=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let load_site = || -> Result<microcms_content::Site> {
        let mut site = microcms_content::Site::new(&base_dir)?;
        if cli.production {
            site.config.production = true;
        }
        Ok(site)
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            microcms_content::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::List { r#type } => {
            let site = load_site()?;
            microcms_content::commands::list::run(&site, &r#type).await?;
        }

        Commands::Show { slug } => {
            let site = load_site()?;
            microcms_content::commands::show::run(&site, &slug).await?;
        }

        Commands::Export { out } => {
            let mut site = load_site()?;
            if let Some(out) = out {
                site.public_dir = if out.is_absolute() {
                    out
                } else {
                    base_dir.join(out)
                };
            }
            tracing::info!("Exporting content...");
            site.export().await?;
            println!("Exported successfully!");
        }

        Commands::Serve { port, ip, open } => {
            let site = load_site()?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            microcms_content::server::start(site, &ip, port, open).await?;
        }

        Commands::Clean => {
            let site = load_site()?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("microcms-content version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
