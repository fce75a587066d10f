//! Terminal dashboard: session state, key bindings and actions.
//!
//! `App` is the only mutable store in the program. It owns the user's
//! selections and the dataset cache; the provider, exporters and report
//! formatter are called with references into it.

pub mod ui;

use crate::cache::DatasetCache;
use crate::config::Config;
use crate::dataset::{DomainDataset, SeriesPoint};
use crate::domain::Domain;
use crate::error::Result;
use crate::export;
use crate::report::{ReportInput, ReportKind, ReportRenderer};
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Trends,
    Subtopics,
    Data,
    Reports,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Trends, Tab::Subtopics, Tab::Data, Tab::Reports];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Trends => "📈 Тренды",
            Tab::Subtopics => "🔬 Подтехнологии",
            Tab::Data => "📊 Данные",
            Tab::Reports => "📄 Отчеты",
        }
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn previous(self) -> Self {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

pub const YEAR_MIN: i32 = 2015;
pub const YEAR_MAX: i32 = 2025;

/// Inclusive year filter for the trends chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub from: i32,
    pub to: i32,
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            from: 2020,
            to: YEAR_MAX,
        }
    }
}

impl YearRange {
    /// Move the start, keeping `YEAR_MIN <= from <= to`
    pub fn shift_start(&mut self, delta: i32) {
        self.from = (self.from + delta).clamp(YEAR_MIN, self.to);
    }

    /// Move the end, keeping `from <= to <= YEAR_MAX`
    pub fn shift_end(&mut self, delta: i32) {
        self.to = (self.to + delta).clamp(self.from, YEAR_MAX);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Country {
    Us,
    Cn,
    Jp,
    Kr,
    Ep,
    Wo,
}

impl Country {
    pub const ALL: [Country; 6] = [
        Country::Us,
        Country::Cn,
        Country::Jp,
        Country::Kr,
        Country::Ep,
        Country::Wo,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Country::Us => "US",
            Country::Cn => "CN",
            Country::Jp => "JP",
            Country::Kr => "KR",
            Country::Ep => "EP",
            Country::Wo => "WO",
        }
    }

    pub fn hotkey(self) -> char {
        match self {
            Country::Us => 'u',
            Country::Cn => 'c',
            Country::Jp => 'j',
            Country::Kr => 'k',
            Country::Ep => 'e',
            Country::Wo => 'w',
        }
    }

    fn index(self) -> usize {
        Country::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }
}

/// Patent-office checkboxes; shown in the sidebar, not applied to the data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryToggles([bool; 6]);

impl Default for CountryToggles {
    fn default() -> Self {
        // US, CN, EP on
        Self([true, true, false, false, true, false])
    }
}

impl CountryToggles {
    pub fn is_on(&self, country: Country) -> bool {
        self.0[country.index()]
    }

    pub fn toggle(&mut self, country: Country) {
        let slot = &mut self.0[country.index()];
        *slot = !*slot;
    }

    pub fn enabled(&self) -> Vec<Country> {
        Country::ALL.into_iter().filter(|c| self.is_on(*c)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub level: StatusLevel,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextTab,
    PreviousTab,
    SelectTab(Tab),
    NextDomain,
    PreviousDomain,
    ShiftRangeStart(i32),
    ShiftRangeEnd(i32),
    ToggleCountry(Country),
    GenerateReport(ReportKind),
    ExportPublications,
    ExportTimeline,
}

impl Action {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Action::Quit),
                _ => None,
            };
        }
        let action = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Tab => Action::NextTab,
            KeyCode::BackTab => Action::PreviousTab,
            KeyCode::Char('1') => Action::SelectTab(Tab::Trends),
            KeyCode::Char('2') => Action::SelectTab(Tab::Subtopics),
            KeyCode::Char('3') => Action::SelectTab(Tab::Data),
            KeyCode::Char('4') => Action::SelectTab(Tab::Reports),
            KeyCode::Right => Action::NextDomain,
            KeyCode::Left => Action::PreviousDomain,
            KeyCode::Char('[') => Action::ShiftRangeStart(-1),
            KeyCode::Char(']') => Action::ShiftRangeStart(1),
            KeyCode::Char('{') => Action::ShiftRangeEnd(-1),
            KeyCode::Char('}') => Action::ShiftRangeEnd(1),
            KeyCode::Char('p') => Action::GenerateReport(ReportKind::TopicCard),
            KeyCode::Char('d') => Action::GenerateReport(ReportKind::DeepDive),
            KeyCode::Char('m') => Action::GenerateReport(ReportKind::Metrics),
            KeyCode::Char('s') => Action::ExportPublications,
            KeyCode::Char('t') => Action::ExportTimeline,
            KeyCode::Char(ch) => {
                return Country::ALL
                    .into_iter()
                    .find(|c| c.hotkey() == ch)
                    .map(Action::ToggleCountry);
            }
            _ => return None,
        };
        Some(action)
    }
}

pub struct App {
    pub domain: Domain,
    pub tab: Tab,
    pub years: YearRange,
    pub countries: CountryToggles,
    pub status: Option<StatusLine>,
    pub last_export: Option<PathBuf>,
    pub last_refresh: DateTime<Local>,
    pub should_quit: bool,
    cache: DatasetCache,
    dataset: Arc<DomainDataset>,
    renderer: ReportRenderer,
    output_dir: PathBuf,
}

impl App {
    pub fn new(config: &Config, renderer: ReportRenderer) -> Result<Self> {
        let mut cache = DatasetCache::new(
            config.dataset.window()?,
            config.dataset.cache_ttl(),
            config.dataset.cache_capacity,
        );
        let domain = Domain::Semiconductors;
        let dataset = cache.get(domain);
        Ok(Self {
            domain,
            tab: Tab::Trends,
            years: YearRange::default(),
            countries: CountryToggles::default(),
            status: Some(StatusLine {
                level: StatusLevel::Info,
                text: "←/→ домен • 1-4 вкладки • q выход".to_string(),
            }),
            last_export: None,
            last_refresh: Local::now(),
            should_quit: false,
            cache,
            dataset,
            renderer,
            output_dir: config.report.output_dir.clone(),
        })
    }

    pub fn dataset(&self) -> &DomainDataset {
        &self.dataset
    }

    pub fn renderer(&self) -> &ReportRenderer {
        &self.renderer
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Series points inside the selected year range
    pub fn visible_points(&self) -> &[SeriesPoint] {
        self.dataset.series.within_years(self.years.from, self.years.to)
    }

    /// Re-read the current domain through the cache (regenerates after expiry)
    pub fn refresh(&mut self) {
        let dataset = self.cache.get(self.domain);
        if !Arc::ptr_eq(&dataset, &self.dataset) {
            self.last_refresh = Local::now();
        }
        self.dataset = dataset;
    }

    fn select_domain(&mut self, domain: Domain) {
        self.domain = domain;
        self.refresh();
        tracing::debug!(domain = domain.key(), "domain selected");
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::NextTab => self.tab = self.tab.next(),
            Action::PreviousTab => self.tab = self.tab.previous(),
            Action::SelectTab(tab) => self.tab = tab,
            Action::NextDomain => self.select_domain(self.domain.next()),
            Action::PreviousDomain => self.select_domain(self.domain.previous()),
            Action::ShiftRangeStart(delta) => self.years.shift_start(delta),
            Action::ShiftRangeEnd(delta) => self.years.shift_end(delta),
            Action::ToggleCountry(country) => self.countries.toggle(country),
            Action::GenerateReport(kind) => self.generate_report(kind),
            Action::ExportPublications => {
                let result = export::export_publications(&self.dataset, &self.output_dir);
                self.finish_export(result, "📥 CSV сохранен");
            }
            Action::ExportTimeline => {
                let result = export::export_timeline(&self.dataset, &self.output_dir);
                self.finish_export(result, "📥 CSV сохранен");
            }
        }
    }

    /// Blocks until the document is rendered; leaves state untouched when the renderer is unavailable
    fn generate_report(&mut self, kind: ReportKind) {
        let input = ReportInput::from_dataset(&self.dataset);
        match self.renderer.generate(kind, input, Local::now()) {
            Ok(Some(artifact)) => {
                let result = artifact.write_to(&self.output_dir);
                self.finish_export(result, kind.success_message());
            }
            Ok(None) => {}
            Err(e) => {
                tracing::error!(?kind, error = %e, "report generation failed");
                self.status = Some(StatusLine {
                    level: StatusLevel::Error,
                    text: format!("Ошибка генерации отчета: {}", e),
                });
            }
        }
    }

    fn finish_export(&mut self, result: Result<PathBuf>, success: &str) {
        match result {
            Ok(path) => {
                self.status = Some(StatusLine {
                    level: StatusLevel::Success,
                    text: format!("{} → {}", success, path.display()),
                });
                self.last_export = Some(path);
            }
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                self.status = Some(StatusLine {
                    level: StatusLevel::Error,
                    text: format!("Ошибка экспорта: {}", e),
                });
            }
        }
    }
}
