//! Report generation: recommendation rules, chart rendering and PDF assembly.
//!
//! Rendering needs a TrueType font family. It is looked up once when the
//! [`ReportRenderer`] is built; without it every generation call yields `None`
//! and callers surface [`ReportRenderer::GUIDANCE`] instead.

pub mod chart;
pub mod fonts;
pub mod pdf;
pub mod recommendation;

pub use recommendation::Recommendation;

use crate::config::ReportConfig;
use crate::dataset::{DomainDataset, TimeSeries};
use crate::domain::Domain;
use crate::error::Result;
use crate::metrics::MetricsSummary;
use chrono::{DateTime, Local, NaiveDate};
use fonts::ReportFonts;
use serde::{Deserialize, Serialize};

/// Named presets of the same report; they differ only in naming and UI copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    TopicCard,
    DeepDive,
    Metrics,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [ReportKind::TopicCard, ReportKind::DeepDive, ReportKind::Metrics];

    pub fn title(self) -> &'static str {
        match self {
            ReportKind::TopicCard => "🎴 Topic Card",
            ReportKind::DeepDive => "📊 Monthly Deep Dive",
            ReportKind::Metrics => "📋 Экспорт метрик в PDF",
        }
    }

    pub fn tagline(self) -> &'static str {
        match self {
            ReportKind::TopicCard => "⚡ Быстрый отчет по технологии",
            ReportKind::DeepDive => "🔍 Детальный анализ с рекомендациями",
            ReportKind::Metrics => "Быстрый экспорт",
        }
    }

    pub fn highlights(self) -> &'static [&'static str] {
        match self {
            ReportKind::TopicCard => &[
                "Название темы + домен",
                "Ключевые метрики",
                "Топ-5 игроков",
                "График динамики",
                "Рекомендации",
            ],
            ReportKind::DeepDive => &[
                "Executive summary",
                "Наука vs Патенты",
                "Кластеры подтехнологий",
                "Конкурентный анализ",
                "Список \"что читать\"",
            ],
            ReportKind::Metrics => &["Ключевые метрики"],
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            ReportKind::TopicCard => "✅ Topic Card готов!",
            ReportKind::DeepDive => "✅ Deep Dive отчет готов!",
            ReportKind::Metrics => "✅ PDF готов!",
        }
    }

    /// Suggested download name; dated presets use the generation day
    pub fn file_name(self, domain: Domain, day: NaiveDate) -> String {
        let slug = domain.slug();
        let stamp = day.format("%Y%m%d");
        match self {
            ReportKind::TopicCard => format!("topic_card_{}_{}.pdf", slug, stamp),
            ReportKind::DeepDive => format!("deep_dive_{}_{}.pdf", slug, stamp),
            ReportKind::Metrics => format!("metrics_{}.pdf", slug),
        }
    }
}

/// Inputs of one report: the domain, its metrics and its time series
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    pub domain: Domain,
    pub metrics: &'a MetricsSummary,
    pub series: &'a TimeSeries,
}

impl<'a> ReportInput<'a> {
    pub fn from_dataset(dataset: &'a DomainDataset) -> Self {
        Self {
            domain: dataset.domain,
            metrics: &dataset.metrics,
            series: &dataset.series,
        }
    }
}

/// Finished in-memory PDF, ready to be written or offered for download
#[derive(Debug, Clone, PartialEq)]
pub struct ReportArtifact {
    pub kind: ReportKind,
    pub domain: Domain,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ReportArtifact {
    pub fn write_to(&self, dir: &std::path::Path) -> Result<std::path::PathBuf> {
        crate::export::write_file(dir, &self.file_name, &self.bytes)
    }
}

/// Report formatter bound to the font lookup done at construction
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    fonts: Option<ReportFonts>,
    chart_points: usize,
}

impl ReportRenderer {
    pub const GUIDANCE: &'static str = "⚠️ Для экспорта PDF установите шрифты LiberationSans \
        (например, пакет fonts-liberation) или укажите каталог в TT_FONT_DIR";

    /// Probe for fonts once; logs a warning when reports are unavailable
    pub fn detect(config: &ReportConfig) -> Self {
        let fonts = fonts::locate(config.font_dir.as_deref(), &config.font_family);
        if fonts.is_none() {
            tracing::warn!(
                family = %config.font_family,
                "report fonts not found; PDF and chart export disabled"
            );
        }
        Self {
            fonts,
            chart_points: config.chart_points,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            fonts: None,
            chart_points: pdf::CHART_POINTS,
        }
    }

    pub fn with_fonts(fonts: ReportFonts) -> Self {
        Self {
            fonts: Some(fonts),
            chart_points: pdf::CHART_POINTS,
        }
    }

    pub fn chart_points(&self) -> usize {
        self.chart_points
    }

    pub fn is_available(&self) -> bool {
        self.fonts.is_some()
    }

    pub fn fonts(&self) -> Option<&ReportFonts> {
        self.fonts.as_ref()
    }

    /// Render a report; `Ok(None)` when the renderer is unavailable
    pub fn generate(
        &self,
        kind: ReportKind,
        input: ReportInput<'_>,
        generated_at: DateTime<Local>,
    ) -> Result<Option<ReportArtifact>> {
        let Some(fonts) = &self.fonts else {
            tracing::debug!(?kind, "report requested while renderer unavailable");
            return Ok(None);
        };

        let bytes = pdf::render(fonts, &input, self.chart_points, generated_at)?;
        tracing::info!(
            ?kind,
            domain = input.domain.key(),
            bytes = bytes.len(),
            "report generated"
        );
        Ok(Some(ReportArtifact {
            kind,
            domain: input.domain,
            file_name: kind.file_name(input.domain, generated_at.date_naive()),
            bytes,
        }))
    }

    /// PNG of the recent-activity chart; `Ok(None)` when the renderer is unavailable
    pub fn chart_png(&self, input: ReportInput<'_>) -> Result<Option<Vec<u8>>> {
        if self.fonts.is_none() {
            return Ok(None);
        }
        let image = chart::render(
            &format!("{}: Динамика за 2 года", input.domain.label()),
            input.series.tail(self.chart_points),
        )?;
        Ok(Some(chart::encode_png(&image)?))
    }
}
