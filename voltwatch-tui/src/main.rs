// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod alerts;
mod app;
mod chart;
mod config;
mod events;
mod source;
mod ui;

use app::{App, View};
use config::AppConfig;
use source::{FileSource, HttpSource, LiveSource, WindowSource};
use voltwatch_client::StationClient;
use voltwatch_types::{Page, Window};

#[derive(Parser, Debug)]
#[command(name = "voltwatch")]
#[command(about = "Terminal dashboard for off-grid station telemetry")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Station API endpoint, e.g. http://station.local:8000
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Replay captured window payloads from this directory instead of a station
    #[arg(short, long, conflicts_with = "endpoint")]
    file: Option<PathBuf>,

    /// Connect to a live reading feed (host:port)
    #[arg(short, long, conflicts_with = "file")]
    live: Option<String>,

    /// Page shown at startup (system, router, camera, network)
    #[arg(short, long)]
    page: Option<Page>,

    /// Time window selected at startup (1h, 3h, 6h, 12h, 1d, 2d)
    #[arg(short, long)]
    window: Option<Window>,

    /// Auto-refresh interval in seconds, 0 to disable
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Append tracing output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Only browse alerts with this severity level
    #[arg(long)]
    alert_level: Option<String>,

    /// Only browse alerts from this source
    #[arg(long)]
    alert_source: Option<String>,
}

impl Args {
    /// Fold CLI flags over the loaded configuration. Flags win.
    fn apply(self, config: &mut AppConfig) -> Option<String> {
        if let Some(endpoint) = self.endpoint {
            config.endpoint = endpoint;
        }
        if let Some(page) = self.page {
            config.page = page;
        }
        if let Some(window) = self.window {
            config.window = window;
        }
        if let Some(refresh) = self.refresh {
            config.refresh_secs = refresh;
        }
        if let Some(log_file) = self.log_file {
            config.log_file = Some(log_file);
        }
        if let Some(level) = self.alert_level {
            config.alert_level = Some(level);
        }
        if let Some(source) = self.alert_source {
            config.alert_source = Some(source);
        }
        self.live
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    let file = args.file.clone();
    let live = args.apply(&mut config);

    init_tracing(&config)?;

    if let Some(ref dir) = file {
        return run_with_file(dir, &config);
    }
    run_with_station(&config, live.as_deref())
}

/// Write tracing output to the configured log file.
///
/// Without a log file no subscriber is installed at all; the alternate
/// screen owns stdout and stderr while the TUI runs.
fn init_tracing(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "voltwatch=debug".into()),
        ))
        .with(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
        .init();
    Ok(())
}

/// Run against captured window payloads on disk.
fn run_with_file(dir: &Path, config: &AppConfig) -> Result<()> {
    // Fetches still run as spawned tasks, so a runtime is needed even
    // without a network connection.
    let rt = tokio::runtime::Runtime::new()?;
    let _enter = rt.enter();

    let source = Arc::new(FileSource::new(dir));
    run_tui(config, source, None, None)
}

/// Run against a live station.
fn run_with_station(config: &AppConfig, live_addr: Option<&str>) -> Result<()> {
    let client = StationClient::builder()
        .endpoint(&config.endpoint)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;

    let rt = tokio::runtime::Runtime::new()?;

    // Connect the live feed before entering the runtime context;
    // block_on would panic inside the enter guard.
    let live_source = match live_addr {
        Some(addr) => Some(rt.block_on(connect_live(addr))?),
        None => None,
    };
    let _enter = rt.enter();

    let source = Arc::new(HttpSource::new(client.clone()));
    run_tui(config, source, Some(client), live_source)
}

async fn connect_live(addr: &str) -> Result<LiveSource> {
    use tokio::net::TcpStream;

    println!("Connecting to {}...", addr);
    let stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("failed to connect to {}", addr))?;
    println!("Connected!");
    Ok(LiveSource::spawn(stream, addr))
}

/// Run the TUI with the given window source.
fn run_tui(
    config: &AppConfig,
    source: Arc<dyn WindowSource>,
    client: Option<StationClient>,
    live_source: Option<LiveSource>,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Create the app and dispatch the initial fetches
    let mut app = App::new(config, source, client, live_source);
    app.start();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(0, area.height / 2 - 2, area.width, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            match app.view {
                View::Telemetry => {
                    let chunks = Layout::vertical([
                        Constraint::Length(1), // Header bar
                        Constraint::Length(1), // Tabs
                        Constraint::Length(3), // Live gauges
                        Constraint::Min(8),    // Chart
                        Constraint::Length(1), // Status bar
                    ])
                    .split(area);

                    ui::common::render_header(frame, app, chunks[0]);
                    ui::common::render_tabs(frame, app, chunks[1]);
                    ui::live::render(frame, app, chunks[2]);
                    ui::chart::render(frame, app, chunks[3]);
                    ui::common::render_status_bar(frame, app, chunks[4]);
                }
                View::Alerts => {
                    let chunks = Layout::vertical([
                        Constraint::Length(1), // Header bar
                        Constraint::Length(1), // Tabs
                        Constraint::Min(8),    // Alert table
                        Constraint::Length(1), // Status bar
                    ])
                    .split(area);

                    ui::common::render_header(frame, app, chunks[0]);
                    ui::common::render_tabs(frame, app, chunks[1]);
                    ui::alerts::render(frame, app, chunks[2]);
                    ui::common::render_status_bar(frame, app, chunks[3]);
                }
            }

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => {
                    if let Some(command) = events::map_key(app, key) {
                        app.handle(command);
                    }
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Fold in completed fetches and the newest live reading
        app.drain_outcomes();
        app.poll_live();

        // Auto-refresh periodically
        if !app.refresh_interval.is_zero() && last_refresh.elapsed() >= app.refresh_interval {
            app.auto_refresh();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}
