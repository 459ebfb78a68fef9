use std::io::stdout;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use posipick::app::{App, Sources, Submission};
use posipick::catalog::Catalog;
use posipick::config::{self, Config};
use posipick::fetch::FetchWorker;
use posipick::picker::SearchResponse;

/// Longest wait for terminal input before checking search responses again
const MAX_POLL_WAIT: Duration = Duration::from_millis(50);

/// Assign a person, a theme and structures to a position
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON catalog with "people", "themes" and "structures" rows, searched locally
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Base URL of the search backend (ignored with --data)
    #[arg(long, value_name = "URL")]
    api: Option<String>,

    /// Bearer token sent to the search backend
    #[arg(long)]
    token: Option<String>,

    /// Config file [default: ~/.config/posipick/config.toml]
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;

    let args = Args::parse();
    posipick::logging::init();

    // Everything that can fail runs before the terminal is taken over
    let config = match &args.config {
        Some(path) => config::load_config_from_path(path)
            .wrap_err_with(|| format!("Failed to load config {}", path.display()))?,
        None => config::load_config(),
    };
    let sources = build_sources(&args, &config)?;

    let (response_tx, response_rx) = mpsc::channel();
    let worker = FetchWorker::spawn(response_tx).wrap_err("Failed to start fetch worker")?;
    let app = App::new(sources, &config.picker);

    // Initialize terminal (handles raw mode, alternate screen, etc.)
    let terminal = ratatui::init();

    let result = run(terminal, app, &worker, &response_rx);

    // Restore terminal
    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();

    if let Some(submission) = result? {
        println!("{}", serde_json::to_string(&submission)?);
    }

    Ok(())
}

fn build_sources(args: &Args, config: &Config) -> Result<Sources> {
    if let Some(path) = &args.data {
        let catalog = Catalog::load(path)
            .wrap_err_with(|| format!("Failed to load catalog {}", path.display()))?;
        return Ok(Sources::local(catalog, &config.local));
    }

    let base_url = args.api.as_deref().unwrap_or(&config.api.base_url);
    let token = args.token.clone().or_else(|| config.api.token.clone());
    Ok(Sources::http(base_url, token))
}

fn run(
    mut terminal: DefaultTerminal,
    mut app: App,
    worker: &FetchWorker,
    responses: &Receiver<SearchResponse>,
) -> Result<Option<Submission>> {
    execute!(stdout(), EnableMouseCapture)?;

    loop {
        terminal.draw(|frame| app.render(frame))?;

        for request in app.poll_requests(Instant::now()) {
            if !worker.dispatch(request) {
                log::warn!("Fetch worker stopped, search dropped");
            }
        }
        while let Ok(response) = responses.try_recv() {
            app.apply_response(response);
        }

        // Wake up in time for the next debounced search
        let timeout = app.next_deadline().map_or(MAX_POLL_WAIT, |deadline| {
            deadline
                .saturating_duration_since(Instant::now())
                .min(MAX_POLL_WAIT)
        });
        if event::poll(timeout)? {
            app.handle_event(event::read()?, Instant::now());
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(app.submission().cloned())
}
