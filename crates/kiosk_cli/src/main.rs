use clap::Parser;
use kiosk_core::{Article, Result};
use kiosk_feed::{FeedController, FeedState};
use kiosk_source::HttpArticleSource;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Cache store backend. Available: file (default), memory
    #[arg(long, default_value = "file")]
    store: String,
    /// Directory holding the file store's slots
    #[arg(long, default_value = ".kiosk-cache")]
    store_path: PathBuf,
    /// Site root of the upstream article API
    #[arg(long, default_value = "http://localhost:4000")]
    source_url: String,
    /// How many articles to request per fetch
    #[arg(long, default_value_t = kiosk_source::http::DEFAULT_LIMIT)]
    limit: usize,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the feed API over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
    /// Print today's ranked feed
    Show,
    /// Pull today's stories and print the fresh feed
    Pull,
    /// Drop the cached batch
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let store = kiosk_store::create_store(&cli.store, Some(&cli.store_path))?;
    info!("💾 Cache store initialized (using {})", cli.store);

    let source = Arc::new(HttpArticleSource::new(&cli.source_url)?);
    info!("🗞️ Article source: {}", cli.source_url);

    let controller = Arc::new(FeedController::new(store, source, cli.limit));

    match cli.command {
        Commands::Serve { addr } => {
            let app = kiosk_web::create_app(kiosk_web::AppState { controller });
            info!("🚀 Serving feed API on {}", addr);
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
        Commands::Show => {
            let state = controller.load().await;
            print_state(&state);
            // let a silent refresh finish before the process exits
            controller.wait_for_refresh().await;
        }
        Commands::Pull => {
            let state = controller.pull().await;
            print_state(&state);
        }
        Commands::Clear => {
            controller.clear().await?;
            info!("🧹 Cache cleared");
        }
    }

    Ok(())
}

fn print_state(state: &FeedState) {
    match state {
        FeedState::DisplayingCache { feed, refreshing } => {
            println!(
                "Cached feed, {} stories{}",
                feed.len(),
                if *refreshing { " (refreshing in background)" } else { "" }
            );
            print_feed(feed);
        }
        FeedState::DisplayingFresh { feed } if feed.is_empty() => {
            println!("No stories today.");
        }
        FeedState::DisplayingFresh { feed } => {
            println!("Fresh feed, {} stories", feed.len());
            print_feed(feed);
        }
        FeedState::AwaitingUserPull { last_error: Some(e) } => {
            println!("Pull failed: {}. Run `kiosk pull` to retry.", e);
        }
        FeedState::AwaitingUserPull { last_error: None } => {
            println!("Good morning! Run `kiosk pull` to fetch today's stories.");
        }
        FeedState::Idle | FeedState::Loading | FeedState::Pulling => {
            println!("Feed is loading...");
        }
    }
}

fn print_feed(feed: &[Article]) {
    for (i, article) in feed.iter().enumerate() {
        let marker = if i == 0 { "🌟" } else { "📰" };
        println!(
            "{} {} · {} ({})",
            marker,
            article.title,
            article.source_name,
            article.published_at.format("%Y-%m-%d %H:%M")
        );
    }
}
