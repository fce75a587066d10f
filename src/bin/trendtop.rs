use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::{execute, terminal};
use ratatui::prelude::*;
use tech_trends::config::Config;
use tech_trends::dashboard::{Action, App, ui};
use tech_trends::report::ReportRenderer;
use tracing_subscriber::EnvFilter;

/// How often the cache is consulted for an expired dataset
const REFRESH_EVERY: Duration = Duration::from_secs(30);

fn init_logging(config: &Config) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.report.output_dir)?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.report.output_dir.join("trendtop.log"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.runtime.log_level)
                .unwrap_or_else(|_| EnvFilter::new("tech_trends=info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;
    init_logging(&config)?;

    let renderer = ReportRenderer::detect(&config.report);
    let mut app = App::new(&config, renderer)?;
    tracing::info!(available = app.renderer().is_available(), "trendtop started");

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(path) = &app.last_export {
        println!("Последний экспорт: {}", path.display());
    }
    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let mut last_refresh = Instant::now();

    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        if last_refresh.elapsed() >= REFRESH_EVERY {
            app.refresh();
            last_refresh = Instant::now();
        }

        if event::poll(Duration::from_millis(200))?
            && let Event::Key(k) = event::read()?
            && k.kind == KeyEventKind::Press
            && let Some(action) = Action::from_key(k)
        {
            app.apply(action);
        }
    }

    tracing::info!("trendtop exiting");
    Ok(())
}
