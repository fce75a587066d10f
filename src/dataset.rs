//! Seeded mock dataset provider.
//!
//! Every domain owns a fixed seed, so generating the same domain over the same
//! window always yields bit-identical series. Publications are drawn first and
//! patents second from one generator; reordering those draws changes the data.

use crate::domain::Domain;
use crate::error::{Result, TechTrendsError};
use crate::metrics::{MetricsSummary, SubtopicGrowth, dashboard_subtopics_for, metrics_for};
use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

/// Inclusive range of months covered by a time series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesWindow {
    /// First day of the first month
    pub start: NaiveDate,
    /// First day of the last month
    pub end: NaiveDate,
}

impl SeriesWindow {
    /// Parse a window from "YYYY-MM" month strings
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start = parse_month(start)?;
        let end = parse_month(end)?;
        if start > end {
            return Err(TechTrendsError::Validation {
                message: format!("series window start {} is after end {}", start, end),
            });
        }
        Ok(Self { start, end })
    }

    /// Number of months in the window, both ends included
    pub fn months(&self) -> usize {
        let span = (self.end.year() - self.start.year()) * 12 + self.end.month() as i32
            - self.start.month() as i32;
        (span + 1).max(0) as usize
    }
}

impl Default for SeriesWindow {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
        }
    }
}

fn parse_month(value: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(
        &format!("{}-01", value.trim()),
        "%Y-%m-%d",
    )?)
}

fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Month-end dates for every month in the window
pub fn month_ends(window: &SeriesWindow) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(window.months());
    let (mut year, mut month) = (window.start.year(), window.start.month());
    for _ in 0..window.months() {
        if let Some(date) = month_end(year, month) {
            dates.push(date);
        }
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    dates
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub publications: f64,
    pub patents: f64,
}

/// Monthly publication/patent counts ordered by date
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeSeries {
    points: Vec<SeriesPoint>,
}

impl TimeSeries {
    pub fn new(points: Vec<SeriesPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn publications(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.publications).collect()
    }

    pub fn patents(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.patents).collect()
    }

    /// The most recent `n` points (all of them when the series is shorter)
    pub fn tail(&self, n: usize) -> &[SeriesPoint] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }

    /// Points whose year falls inside `from..=to`
    pub fn within_years(&self, from: i32, to: i32) -> &[SeriesPoint] {
        let lo = self.points.partition_point(|p| p.date.year() < from);
        let hi = self.points.partition_point(|p| p.date.year() <= to);
        if lo >= hi { &[] } else { &self.points[lo..hi] }
    }
}

/// "Deep dive" card for one fast-growing sub-technology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtopicDetail {
    pub name: String,
    pub growth_pct: u32,
    pub publications: u32,
    pub patents: u32,
    pub time_lag: f64,
    pub top_assignee: String,
    pub ai_share: u32,
    pub trend_score: u32,
}

/// One row of the example publication table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationRecord {
    pub date: NaiveDate,
    pub title: String,
    pub citations: u32,
    pub authors: String,
    pub kind: String,
}

/// Everything the dashboard and the report need for one domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainDataset {
    pub domain: Domain,
    pub series: TimeSeries,
    pub metrics: MetricsSummary,
    pub subtopics: Vec<SubtopicGrowth>,
    pub subtopic_details: Vec<SubtopicDetail>,
    pub publications: Vec<PublicationRecord>,
}

#[derive(Debug, Clone, Copy)]
struct WalkParams {
    base: f64,
    sigma: f64,
    drift: f64,
}

#[derive(Debug, Clone, Copy)]
struct DomainSeed {
    seed: u64,
    publications: WalkParams,
    patents: WalkParams,
}

fn seed_for(domain: Domain) -> DomainSeed {
    match domain {
        Domain::Semiconductors => DomainSeed {
            seed: 42,
            publications: WalkParams {
                base: 40.0,
                sigma: 1.5,
                drift: 1.5,
            },
            patents: WalkParams {
                base: 20.0,
                sigma: 1.2,
                drift: 1.0,
            },
        },
        Domain::GeneEngineering => DomainSeed {
            seed: 123,
            publications: WalkParams {
                base: 30.0,
                sigma: 1.8,
                drift: 2.0,
            },
            patents: WalkParams {
                base: 15.0,
                sigma: 1.5,
                drift: 1.2,
            },
        },
    }
}

/// base + cumulative sum of N(0, 1) * sigma + drift
fn random_walk(rng: &mut StdRng, len: usize, params: WalkParams) -> Vec<f64> {
    let mut level = params.base;
    (0..len)
        .map(|_| {
            let step: f64 = rng.sample(StandardNormal);
            level += step * params.sigma + params.drift;
            level
        })
        .collect()
}

const DETAIL_CARDS: usize = 3;
const EXAMPLE_ROWS: usize = 20;

fn subtopic_details(
    seed: u64,
    subtopics: &[SubtopicGrowth],
    metrics: &MetricsSummary,
) -> Vec<SubtopicDetail> {
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
    subtopics
        .iter()
        .take(DETAIL_CARDS)
        .map(|sub| {
            let publications = rng.gen_range(100..500);
            let patents = rng.gen_range(50..300);
            let time_lag = (rng.gen_range(2.0..5.0_f64) * 10.0).round() / 10.0;
            let top_assignee = metrics
                .top_assignees
                .choose(&mut rng)
                .map(|a| a.name.clone())
                .unwrap_or_default();
            SubtopicDetail {
                name: sub.name.clone(),
                growth_pct: sub.growth_pct,
                publications,
                patents,
                time_lag,
                top_assignee,
                ai_share: rng.gen_range(10..60),
                trend_score: rng.gen_range(65..95),
            }
        })
        .collect()
}

fn example_publications(seed: u64, domain: Domain, series: &TimeSeries) -> Vec<PublicationRecord> {
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(2));
    series
        .points()
        .iter()
        .take(EXAMPLE_ROWS)
        .enumerate()
        .map(|(i, point)| PublicationRecord {
            date: point.date,
            title: format!("{} - публикация {}", domain.label(), i),
            citations: rng.gen_range(10..100),
            authors: format!("Author {}, Author {}", i, i + 1),
            kind: "Научная статья".to_string(),
        })
        .collect()
}

/// Build the full mock dataset for a domain
pub fn generate(domain: Domain, window: &SeriesWindow) -> DomainDataset {
    let params = seed_for(domain);
    let dates = month_ends(window);

    let mut rng = StdRng::seed_from_u64(params.seed);
    let publications = random_walk(&mut rng, dates.len(), params.publications);
    let patents = random_walk(&mut rng, dates.len(), params.patents);

    let series = TimeSeries::new(
        dates
            .into_iter()
            .zip(publications)
            .zip(patents)
            .map(|((date, publications), patents)| SeriesPoint {
                date,
                publications,
                patents,
            })
            .collect(),
    );

    let metrics = metrics_for(domain);
    let subtopics = dashboard_subtopics_for(domain);
    let subtopic_details = subtopic_details(params.seed, &subtopics, &metrics);
    let publications = example_publications(params.seed, domain, &series);

    tracing::debug!(
        domain = domain.key(),
        points = series.len(),
        "generated mock dataset"
    );

    DomainDataset {
        domain,
        series,
        metrics,
        subtopics,
        subtopic_details,
        publications,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_has_85_months() {
        let window = SeriesWindow::default();
        assert_eq!(window.months(), 85);
        let dates = month_ends(&window);
        assert_eq!(dates.len(), 85);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2018, 1, 31).unwrap());
        assert_eq!(dates[1], NaiveDate::from_ymd_opt(2018, 2, 28).unwrap());
        assert_eq!(dates[84], NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn leap_february_ends_on_29th() {
        let window = SeriesWindow::parse("2020-02", "2020-02").unwrap();
        assert_eq!(
            month_ends(&window),
            vec![NaiveDate::from_ymd_opt(2020, 2, 29).unwrap()]
        );
    }

    #[test]
    fn inverted_window_rejected() {
        assert!(SeriesWindow::parse("2025-01", "2018-01").is_err());
        assert!(SeriesWindow::parse("2025-13", "2026-01").is_err());
    }

    #[test]
    fn tail_and_year_filter() {
        let dataset = generate(Domain::Semiconductors, &SeriesWindow::default());
        let tail = dataset.series.tail(24);
        assert_eq!(tail.len(), 24);
        assert_eq!(tail[23], *dataset.series.points().last().unwrap());
        assert_eq!(dataset.series.tail(500).len(), 85);

        let recent = dataset.series.within_years(2020, 2025);
        assert_eq!(recent.len(), 5 * 12 + 1);
        assert!(recent.iter().all(|p| p.date.year() >= 2020));
        assert!(dataset.series.within_years(2030, 2031).is_empty());
        assert!(dataset.series.within_years(2022, 2020).is_empty());
    }

    #[test]
    fn detail_cards_stay_in_range() {
        let dataset = generate(Domain::GeneEngineering, &SeriesWindow::default());
        assert_eq!(dataset.subtopic_details.len(), 3);
        assert_eq!(dataset.subtopic_details[0].name, "CRISPR-Cas9");
        assert_eq!(dataset.subtopic_details[0].growth_pct, 52);
        for card in &dataset.subtopic_details {
            assert!((100..500).contains(&card.publications));
            assert!((50..300).contains(&card.patents));
            assert!((2.0..=5.0).contains(&card.time_lag));
            assert!((65..95).contains(&card.trend_score));
            assert!(dataset.metrics.assignee_names().contains(&card.top_assignee.as_str()));
        }
    }

    #[test]
    fn example_table_has_twenty_rows() {
        let dataset = generate(Domain::Semiconductors, &SeriesWindow::default());
        assert_eq!(dataset.publications.len(), 20);
        assert_eq!(dataset.publications[3].title, "Полупроводники - публикация 3");
        assert_eq!(dataset.publications[3].authors, "Author 3, Author 4");
        assert_eq!(dataset.publications[0].date, dataset.series.points()[0].date);
    }
}
