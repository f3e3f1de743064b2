use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use gridcast::app;
use gridcast::config::AppConfig;
use gridcast::server;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridcast", about = "TV playout playlist generator")]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = "gridcast.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the media directory and list the catalog
    Scan,
    /// Generate and persist the playlist for a date
    Generate {
        /// Date to generate for (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Run the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "gridcast=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config);

    match cli.command {
        Commands::Scan => {
            let catalog = match app::scan_catalog(&config) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            };
            if catalog.is_empty_catalog() {
                println!(
                    "No media found under '{}'",
                    config.video_directory.display()
                );
                return;
            }
            for bucket in catalog.buckets() {
                println!("{} ({} items)", bucket.category, bucket.items.len());
                for item in &bucket.items {
                    println!("  {} [{}]", item.file_name(), item.duration_display());
                }
            }
        }
        Commands::Generate { date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            match app::generate_for_date(&config, date) {
                Ok(outcome) => {
                    println!(
                        "Playlist for {} written to {} ({} entries)",
                        date,
                        outcome.path.display(),
                        outcome.document.entries.len()
                    );
                    for gap in &outcome.document.unfillable {
                        println!(
                            "  UNFILLABLE slot {} at {}: {}",
                            gap.slot_index,
                            gap.start.format("%H:%M:%S"),
                            gap.reason
                        );
                    }
                    for warning in &outcome.document.warnings {
                        println!("  warning, slot {}: {}", warning.slot_index, warning.message);
                    }
                    if !outcome.document.is_fully_filled() {
                        std::process::exit(2);
                    }
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Serve { port } => {
            if let Err(e) = server::serve(config, port).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
    }
}
