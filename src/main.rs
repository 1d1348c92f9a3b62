//! CLI entry point for blog-listing

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blog_listing::commands::list::{ListType, PostQuery};
use blog_listing::Blog;

#[derive(Parser)]
#[command(name = "blog-listing")]
#[command(version)]
#[command(about = "Sort, filter and paginate the posts of a markdown blog", long_about = None)]
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
    /// List posts, tags or categories
    #[command(alias = "ls")]
    List {
        /// What to list
        #[arg(value_enum, default_value = "posts")]
        r#type: ListType,

        /// Only posts in this category
        #[arg(long)]
        category: Option<String>,

        /// Only posts with this tag
        #[arg(long)]
        tag: Option<String>,

        /// Page to show, starting at 1
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        page: i64,

        /// Posts per page (defaults to per_page from _config.yml)
        #[arg(long, allow_negative_numbers = true)]
        per_page: Option<i64>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blog_listing=debug,info"
    } else {
        "blog_listing=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::List {
            r#type,
            category,
            tag,
            page,
            per_page,
            json,
        } => {
            let blog = Blog::new(&base_dir)?;
            tracing::info!("Listing {:?} from {:?}", r#type, blog.posts_dir);

            let query = PostQuery {
                category,
                tag,
                page,
                per_page,
            };
            blog_listing::commands::list::run(&blog, r#type, &query, json)?;
        }

        Commands::Version => {
            println!("blog-listing version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
