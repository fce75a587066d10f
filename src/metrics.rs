//! Fixed per-domain metrics: totals, growth, trend score, assignees and geography.

use crate::domain::Domain;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative label derived from the trend score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendStatus {
    Hot,
    Emerging,
    Maturing,
}

impl TrendStatus {
    /// Score thresholds: above 80 is hot, above 60 emerging, everything else maturing
    pub fn from_score(score: u8) -> Self {
        if score > 80 {
            TrendStatus::Hot
        } else if score > 60 {
            TrendStatus::Emerging
        } else {
            TrendStatus::Maturing
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            TrendStatus::Hot => "🔥",
            TrendStatus::Emerging => "📈",
            TrendStatus::Maturing => "💤",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TrendStatus::Hot => "Hot",
            TrendStatus::Emerging => "Emerging",
            TrendStatus::Maturing => "Maturing",
        }
    }
}

impl fmt::Display for TrendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon(), self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignee {
    pub name: String,
    pub patents: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryShare {
    pub code: String,
    pub share_pct: u32,
}

/// Aggregate record shown on the metric cards and in the report tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub papers_total: u32,
    pub papers_growth: i32,
    pub patents_total: u32,
    pub patents_growth: i32,
    /// Years between publication and patent activity
    pub time_lag: f64,
    pub time_lag_change: f64,
    pub trend_score: u8,
    pub ai_share: u8,
    /// Ranked, highest first
    pub top_assignees: Vec<Assignee>,
    /// Ranked, highest first
    pub countries: Vec<CountryShare>,
}

impl MetricsSummary {
    pub fn trend_status(&self) -> TrendStatus {
        TrendStatus::from_score(self.trend_score)
    }

    pub fn assignee_names(&self) -> Vec<&str> {
        self.top_assignees.iter().map(|a| a.name.as_str()).collect()
    }

    pub fn assignee_values(&self) -> Vec<u32> {
        self.top_assignees.iter().map(|a| a.patents).collect()
    }

    pub fn country_codes(&self) -> Vec<&str> {
        self.countries.iter().map(|c| c.code.as_str()).collect()
    }

    pub fn country_values(&self) -> Vec<u32> {
        self.countries.iter().map(|c| c.share_pct).collect()
    }
}

/// Year-over-year growth of one sub-technology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtopicGrowth {
    pub name: String,
    pub growth_pct: u32,
}

fn assignees(rows: &[(&str, u32)]) -> Vec<Assignee> {
    rows.iter()
        .map(|(name, patents)| Assignee {
            name: (*name).to_string(),
            patents: *patents,
        })
        .collect()
}

fn countries(rows: &[(&str, u32)]) -> Vec<CountryShare> {
    rows.iter()
        .map(|(code, share)| CountryShare {
            code: (*code).to_string(),
            share_pct: *share,
        })
        .collect()
}

pub fn metrics_for(domain: Domain) -> MetricsSummary {
    match domain {
        Domain::Semiconductors => MetricsSummary {
            papers_total: 1234,
            papers_growth: 12,
            patents_total: 892,
            patents_growth: 8,
            time_lag: 3.2,
            time_lag_change: -0.5,
            trend_score: 78,
            ai_share: 32,
            top_assignees: assignees(&[
                ("TSMC", 234),
                ("Intel", 189),
                ("Samsung", 156),
                ("Qualcomm", 98),
                ("Micron", 76),
            ]),
            countries: countries(&[("US", 45), ("CN", 25), ("JP", 12), ("KR", 10), ("EP", 8)]),
        },
        Domain::GeneEngineering => MetricsSummary {
            papers_total: 2156,
            papers_growth: 28,
            patents_total: 743,
            patents_growth: 35,
            time_lag: 4.8,
            time_lag_change: -1.2,
            trend_score: 92,
            ai_share: 18,
            top_assignees: assignees(&[
                ("Editas Medicine", 145),
                ("CRISPR Therapeutics", 132),
                ("Intellia", 98),
                ("Vertex", 67),
                ("Moderna", 54),
            ]),
            countries: countries(&[("US", 58), ("CN", 18), ("EP", 12), ("JP", 7), ("KR", 5)]),
        },
    }
}

fn subtopics(rows: &[(&str, u32)]) -> Vec<SubtopicGrowth> {
    rows.iter()
        .map(|(name, growth)| SubtopicGrowth {
            name: (*name).to_string(),
            growth_pct: *growth,
        })
        .collect()
}

/// Subtopic table printed in the PDF report
pub fn subtopics_for(domain: Domain) -> Vec<SubtopicGrowth> {
    subtopics(match domain {
        Domain::Semiconductors => &[
            ("Квантовые вычисления", 55),
            ("Advanced Packaging", 45),
            ("GaN/SiC устройства", 38),
            ("EUV литография", 42),
            ("MRAM память", 28),
        ],
        Domain::GeneEngineering => &[
            ("CRISPR-Cas12/13", 68),
            ("Липидные наночастицы", 73),
            ("CAR-T терапия", 52),
            ("Base editing", 48),
            ("Вирусные векторы", 41),
        ],
    })
}

/// Subtopic bars on the dashboard; the first three also get detail cards
pub fn dashboard_subtopics_for(domain: Domain) -> Vec<SubtopicGrowth> {
    subtopics(match domain {
        Domain::Semiconductors => &[
            ("Литография (EUV/DUV)", 45),
            ("Advanced Packaging", 38),
            ("GaN/SiC устройства", 32),
            ("MRAM/FRAM память", 28),
            ("Квантовые вычисления", 55),
        ],
        Domain::GeneEngineering => &[
            ("CRISPR-Cas9", 52),
            ("CRISPR-Cas12/13", 68),
            ("Вирусные векторы (AAV)", 41),
            ("Липидные наночастицы", 73),
            ("CAR-T терапия", 47),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_thresholds() {
        assert_eq!(TrendStatus::from_score(100), TrendStatus::Hot);
        assert_eq!(TrendStatus::from_score(81), TrendStatus::Hot);
        assert_eq!(TrendStatus::from_score(80), TrendStatus::Emerging);
        assert_eq!(TrendStatus::from_score(61), TrendStatus::Emerging);
        assert_eq!(TrendStatus::from_score(60), TrendStatus::Maturing);
        assert_eq!(TrendStatus::from_score(0), TrendStatus::Maturing);
    }

    #[test]
    fn status_matches_fixed_scores() {
        assert_eq!(
            metrics_for(Domain::Semiconductors).trend_status().to_string(),
            "📈 Emerging"
        );
        assert_eq!(
            metrics_for(Domain::GeneEngineering).trend_status().to_string(),
            "🔥 Hot"
        );
    }

    #[test]
    fn five_subtopics_per_domain() {
        for domain in Domain::ALL {
            assert_eq!(subtopics_for(domain).len(), 5);
            assert_eq!(dashboard_subtopics_for(domain).len(), 5);
        }
    }

    #[test]
    fn dashboard_and_report_lists_differ() {
        let dashboard = dashboard_subtopics_for(Domain::Semiconductors);
        assert_eq!(dashboard[0].name, "Литография (EUV/DUV)");
        assert_eq!(dashboard[0].growth_pct, 45);
        assert_eq!(subtopics_for(Domain::Semiconductors)[0].name, "Квантовые вычисления");

        let gene = dashboard_subtopics_for(Domain::GeneEngineering);
        assert_eq!(gene[0].name, "CRISPR-Cas9");
        assert_eq!(gene[4].growth_pct, 47);
    }
}
