mod app;
mod event;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::{
    event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use placedash::api::http::format_fetch_error;
use placedash::api::PlaceholderClient;
use placedash::cache::QueryCache;
use placedash::config::Config;
use placedash::view::{load_view, Route, ViewState};
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use ui::splash::{render as render_splash, SplashState};

/// Longest the splash waits for the first view before handing over to the UI,
/// which keeps showing Loading until the fetches settle
const SPLASH_WAIT: Duration = Duration::from_secs(3);

/// Terminal dashboard for the JSONPlaceholder API
#[derive(Parser, Debug)]
#[command(name = "placedash", version, about, long_about = None)]
struct Args {
    /// API base URL (overrides PLACEDASH_API_URL and the config file)
    #[arg(long)]
    api_url: Option<String>,

    /// View to open: dashboard, users, users/ID, posts or posts/ID
    #[arg(long)]
    view: Option<Route>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load one view and print its data instead of starting the UI
    Dump {
        /// View to load: dashboard, users, users/ID, posts or posts/ID
        route: Route,

        /// Search filter for list views
        #[arg(long, default_value = "")]
        search: String,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Logging disabled: cannot open {}: {}", log_path.display(), e);
            return None;
        },
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("placedash started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(dir) = Config::dir() {
        return dir.join("placedash.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".placedash").join("placedash.log");
    }
    PathBuf::from("placedash.log")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    let config = Config::load();
    let api_url = config.effective_api_url(args.api_url.as_deref());
    tracing::info!("Using API: {}", api_url);

    if let Some(Command::Dump {
        route,
        search,
        format,
    }) = &args.command
    {
        return dump(&api_url, *route, search, *format).await;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Initialize and run
    let result = initialize_with_splash(&mut terminal, &args, &api_url, config).await;

    match result {
        Ok(Some(mut app)) => {
            let run_result = run_app(&mut terminal, &mut app).await;
            app.save_last_view();
            cleanup_terminal(&mut terminal)?;

            if let Err(err) = run_result {
                eprintln!("Error: {err:?}");
            }
        },
        Ok(None) => {
            cleanup_terminal(&mut terminal)?;
        },
        Err(err) => {
            cleanup_terminal(&mut terminal)?;
            eprintln!("Initialization error: {err:?}");
        },
    }

    Ok(())
}

/// Non-interactive mode: resolve one view and print it
async fn dump(api_url: &str, route: Route, search: &str, format: OutputFormat) -> Result<()> {
    let client = PlaceholderClient::new(api_url)?;
    let cache = QueryCache::new(client);

    match load_view(&cache, route, search).await {
        ViewState::Ready(data) => {
            let output = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&data)?,
                OutputFormat::Yaml => serde_yaml::to_string(&data)?,
            };
            println!("{}", output);
            Ok(())
        },
        ViewState::Error(err) => {
            tracing::warn!("Dump of {} failed: {}", route, err);
            anyhow::bail!("{}", format_fetch_error(&err))
        },
        ViewState::Loading => anyhow::bail!("View {} did not finish loading", route),
    }
}

fn cleanup_terminal<B: Backend + std::io::Write>(terminal: &mut Terminal<B>) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

async fn initialize_with_splash<B: Backend>(
    terminal: &mut Terminal<B>,
    args: &Args,
    api_url: &str,
    config: Config,
) -> Result<Option<App>>
where
    B::Error: Send + Sync + 'static,
{
    let mut splash = SplashState::new();

    // Render initial splash
    terminal.draw(|f| render_splash(f, &splash))?;

    if check_abort()? {
        return Ok(None);
    }

    // Step 1: Configuration
    let route = config.effective_view(args.view);
    tracing::info!("Opening view: {}", route);

    splash.set_message(&format!("Loading config [view: {}]", route));
    terminal.draw(|f| render_splash(f, &splash))?;
    splash.complete_step();

    if check_abort()? {
        return Ok(None);
    }

    // Step 2: HTTP client
    splash.set_message(&format!("Connecting to {}", api_url));
    terminal.draw(|f| render_splash(f, &splash))?;

    let client = PlaceholderClient::new(api_url)
        .with_context(|| format!("Invalid API URL: {}", api_url))?;
    let mut app = App::new(client, config, route);
    splash.complete_step();

    // Step 3: First view
    splash.set_message(&format!("Fetching {}", route.title().to_lowercase()));
    let started = Instant::now();
    loop {
        app.refresh_view();
        terminal.draw(|f| render_splash(f, &splash))?;

        if !matches!(app.view, ViewState::Loading) || started.elapsed() > SPLASH_WAIT {
            break;
        }
        if check_abort()? {
            return Ok(None);
        }
        tokio::time::sleep(event::TICK_RATE).await;
    }
    splash.complete_step();

    splash.set_message("Ready!");
    terminal.draw(|f| render_splash(f, &splash))?;

    tokio::time::sleep(Duration::from_millis(200)).await;

    Ok(Some(app))
}

fn check_abort() -> Result<bool> {
    if poll(Duration::ZERO)? {
        if let Event::Key(key) = read()? {
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        app.refresh_view();
        terminal.draw(|f| ui::render(f, app))?;

        if event::handle_events(app).await? {
            return Ok(());
        }
    }
}
