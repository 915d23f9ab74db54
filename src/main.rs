//! CLI entry point for postdex

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postdex::config::Mode;

#[derive(Parser)]
#[command(name = "postdex")]
#[command(version)]
#[command(about = "Markdown post index and route data generator for a personal blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Development mode: re-read posts on every access (also POSTDEX_ENV=development)
    #[arg(long, global = true)]
    dev: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Post id (defaults to the slugified title)
        #[arg(short, long)]
        id: Option<String>,
    },

    /// Write route data files
    #[command(alias = "g", alias = "generate")]
    Build,

    /// Serve route data over HTTP
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Remove the public folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postdex=debug,info"
    } else {
        "postdex=info"
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
        None => std::env::current_dir().context("Cannot determine the current directory")?,
    };

    let mode = if cli.dev {
        Mode::Development
    } else {
        Mode::from_env()
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            postdex::commands::init::init_site(&target_dir)?;
            println!("Initialized empty site in {:?}", target_dir);
        }

        Commands::New { title, id } => {
            let blog = postdex::Blog::new(&base_dir, mode)?;
            tracing::info!("Creating new post with title: {}", title);
            let path = postdex::commands::new::create_post(&blog, &title, id.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::Build => {
            let blog = postdex::Blog::new(&base_dir, mode)?;
            tracing::info!("Building route data...");
            let written = blog.build().await?;
            println!("Wrote {} files to {:?}", written, blog.public_dir);
        }

        Commands::Serve { port, ip } => {
            let blog = postdex::Blog::new(&base_dir, mode)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            postdex::server::start(&blog, &ip, port).await?;
        }

        Commands::Clean => {
            let blog = postdex::Blog::new(&base_dir, mode)?;
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let blog = postdex::Blog::new(&base_dir, mode)?;
            postdex::commands::list::run(&blog, &r#type).await?;
        }

        Commands::Version => {
            println!("postdex version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
