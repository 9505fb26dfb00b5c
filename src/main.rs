use std::path::PathBuf;

use clap::Parser;
use tracing::error;

use playbook_browser::{app, loader};

/// Playbook Browser — terminal browser for the anti-pattern playbook.
#[derive(Parser, Debug)]
#[command(name = "playbook-browser", version, about)]
struct Cli {
    /// Path to the data directory containing the four playbook JSON files
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    /// Initial search term
    #[arg(long, default_value = "")]
    term: String,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // Validate data directory
    if !cli.data_dir.join("structure.json").exists() {
        eprintln!(
            "Error: structure.json not found in {}",
            cli.data_dir.display()
        );
        std::process::exit(1);
    }

    // Set up logging to file (we own the terminal)
    let log_dir = std::env::var("PLAYBOOK_BROWSER_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir().join("playbook-browser"));
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "browser.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("playbook_browser=info".parse()?),
        )
        .init();

    // Load all four datasets before any rendering begins. A single failure
    // is terminal for startup: log it, show nothing further.
    let catalog = match loader::load_catalog(&cli.data_dir).await {
        Ok(catalog) => catalog,
        Err(e) => {
            error!(error = %e, "failed to load playbook data");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut terminal = ratatui::init();

    // Run the app
    let mut app = app::App::new(catalog, cli.term);
    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}
