use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use prettytable::{Table, row};
use std::path::{Path, PathBuf};
use tech_trends::config::{Config, RuntimeConfig};
use tech_trends::domain::Domain;
use tech_trends::export;
use tech_trends::report::{Recommendation, ReportInput, ReportKind, ReportRenderer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tech-trends")]
#[command(about = "Science-to-technology trend monitor: mock data, CSV export and PDF reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tracked domains with their CPC codes and topics
    Domains,
    /// Print the metrics summary of a domain
    Show {
        /// Domain key or label (e.g. semiconductors, "Генная инженерия")
        #[arg(long, default_value = "semiconductors")]
        domain: Domain,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Export the monthly timeline as CSV
    Timeline {
        #[arg(long, default_value = "semiconductors")]
        domain: Domain,
        /// Output file (defaults to {slug}_timeline.csv in the output dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Export the example publication table as CSV
    Publications {
        #[arg(long, default_value = "semiconductors")]
        domain: Domain,
        /// Output file (defaults to {slug}_data.csv in the output dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Render the recent-activity chart as PNG
    Chart {
        #[arg(long, default_value = "semiconductors")]
        domain: Domain,
        /// Output file (defaults to {slug}_chart.png in the output dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate a PDF report
    Report {
        #[arg(long, default_value = "semiconductors")]
        domain: Domain,
        #[arg(long, value_enum, default_value = "topic-card")]
        kind: ReportKind,
        /// Directory for the PDF (defaults to the configured output dir)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Show renderer availability and effective configuration
    Status,
}

/// Write to an explicit path, or to `default_name` inside the output dir
fn write_output(
    out: Option<PathBuf>,
    output_dir: &Path,
    default_name: &str,
    bytes: &[u8],
) -> Result<PathBuf> {
    let path = match out {
        Some(path) => {
            let dir = path.parent().unwrap_or(Path::new("."));
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .context("output path has no file name")?;
            export::write_file(dir, name, bytes)?
        }
        None => export::write_file(output_dir, default_name, bytes)?,
    };
    Ok(path)
}

fn print_domains() {
    let mut table = Table::new();
    table.add_row(row!["Key", "Домен", "Коды CPC", "Topics"]);
    for domain in Domain::ALL {
        let profile = domain.profile();
        table.add_row(row![
            domain.key(),
            domain.display_label(),
            profile.cpc_codes.join(", "),
            profile.topics.join(", "),
        ]);
    }
    table.printstd();
}

fn print_metrics(domain: Domain, dataset: &tech_trends::DomainDataset) {
    let m = &dataset.metrics;
    println!("{}", domain.display_label());

    let mut table = Table::new();
    table.add_row(row!["Показатель", "Значение", "Изменение"]);
    table.add_row(row![
        "Публикации",
        m.papers_total,
        format!("+{}%", m.papers_growth)
    ]);
    table.add_row(row![
        "Патенты",
        m.patents_total,
        format!("+{}%", m.patents_growth)
    ]);
    table.add_row(row![
        "Time Lag",
        format!("{} года", m.time_lag),
        format!("{} vs 2024", m.time_lag_change)
    ]);
    table.add_row(row![
        "Trend Score",
        format!("{}/100", m.trend_score),
        m.trend_status()
    ]);
    table.add_row(row!["AI-интеграция", format!("{}%", m.ai_share), "в патентах"]);
    table.printstd();

    let mut players = Table::new();
    players.add_row(row!["Компания", "Патенты"]);
    for a in &m.top_assignees {
        players.add_row(row![a.name, a.patents]);
    }
    players.printstd();

    let mut geo = Table::new();
    geo.add_row(row!["Страна", "Доля (%)"]);
    for c in &m.countries {
        geo.add_row(row![c.code, c.share_pct]);
    }
    geo.printstd();

    for line in Recommendation::for_score(m.trend_score).lines() {
        println!("{}", line);
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let runtime = RuntimeConfig::load_from_env();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&runtime.log_level)
                .unwrap_or_else(|_| EnvFilter::new("tech_trends=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;
    let window = config.dataset.window()?;
    let output_dir = config.report.output_dir.clone();

    match cli.command {
        Commands::Domains => print_domains(),
        Commands::Show { domain, json } => {
            let dataset = tech_trends::generate(domain, &window);
            if json {
                println!("{}", serde_json::to_string_pretty(&dataset.metrics)?);
            } else {
                print_metrics(domain, &dataset);
            }
        }
        Commands::Timeline { domain, out } => {
            let dataset = tech_trends::generate(domain, &window);
            let bytes = export::timeline_csv(&dataset.series)?;
            let path = write_output(out, &output_dir, &export::timeline_file_name(domain), &bytes)?;
            println!("📥 CSV сохранен: {}", path.display());
        }
        Commands::Publications { domain, out } => {
            let dataset = tech_trends::generate(domain, &window);
            let bytes = export::publications_csv(&dataset.publications)?;
            let path = write_output(
                out,
                &output_dir,
                &export::publications_file_name(domain),
                &bytes,
            )?;
            println!("📥 CSV сохранен: {}", path.display());
        }
        Commands::Chart { domain, out } => {
            let renderer = ReportRenderer::detect(&config.report);
            let dataset = tech_trends::generate(domain, &window);
            match renderer.chart_png(ReportInput::from_dataset(&dataset))? {
                Some(png) => {
                    let name = format!("{}_chart.png", domain.slug());
                    let path = write_output(out, &output_dir, &name, &png)?;
                    println!("📈 График сохранен: {}", path.display());
                }
                None => eprintln!("{}", ReportRenderer::GUIDANCE),
            }
        }
        Commands::Report {
            domain,
            kind,
            out_dir,
        } => {
            let renderer = ReportRenderer::detect(&config.report);
            let dataset = tech_trends::generate(domain, &window);
            match renderer.generate(kind, ReportInput::from_dataset(&dataset), Local::now())? {
                Some(artifact) => {
                    let dir = out_dir.unwrap_or(output_dir);
                    let path = artifact.write_to(&dir)?;
                    info!(path = %path.display(), "report written");
                    println!("{} {}", kind.success_message(), path.display());
                }
                None => eprintln!("{}", ReportRenderer::GUIDANCE),
            }
        }
        Commands::Status => {
            let renderer = ReportRenderer::detect(&config.report);
            let mut table = Table::new();
            table.add_row(row!["Параметр", "Значение"]);
            table.add_row(row![
                "Config",
                config
                    .runtime
                    .config_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(defaults)".to_string())
            ]);
            table.add_row(row![
                "Window",
                format!("{} .. {} ({} мес.)", config.dataset.start, config.dataset.end, window.months())
            ]);
            table.add_row(row!["Cache TTL (s)", config.dataset.cache_ttl_secs]);
            table.add_row(row!["Output dir", output_dir.display()]);
            table.add_row(row!["Font family", config.report.font_family]);
            table.add_row(row![
                "PDF",
                match renderer.fonts() {
                    Some(fonts) => format!("доступен ({})", fonts.source().display()),
                    None => "недоступен".to_string(),
                }
            ]);
            table.add_row(row!["Chart points", renderer.chart_points()]);
            table.printstd();
            if !renderer.is_available() {
                eprintln!("{}", ReportRenderer::GUIDANCE);
            }
        }
    }

    Ok(())
}
