//! Technology domains tracked by the monitor.

use crate::error::{Result, TechTrendsError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two hard-coded technology domains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Domain {
    Semiconductors,
    GeneEngineering,
}

/// Static description of a domain: display label plus patent classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainProfile {
    pub domain: Domain,
    pub label: &'static str,
    pub icon: &'static str,
    pub cpc_codes: &'static [&'static str],
    pub topics: &'static [&'static str],
}

const SEMICONDUCTORS: DomainProfile = DomainProfile {
    domain: Domain::Semiconductors,
    label: "Полупроводники",
    icon: "💻",
    cpc_codes: &["H01L", "H10", "G03F", "C23C", "H05K"],
    topics: &["Semiconductor devices", "Lithography", "Thin films"],
};

const GENE_ENGINEERING: DomainProfile = DomainProfile {
    domain: Domain::GeneEngineering,
    label: "Генная инженерия",
    icon: "🧬",
    cpc_codes: &["C12N15/00", "A61K48/00", "C12N9/22"],
    topics: &["CRISPR/Cas", "Gene therapy", "Vectors"],
};

impl Domain {
    /// All domains in selector order
    pub const ALL: [Domain; 2] = [Domain::Semiconductors, Domain::GeneEngineering];

    pub fn profile(self) -> &'static DomainProfile {
        match self {
            Domain::Semiconductors => &SEMICONDUCTORS,
            Domain::GeneEngineering => &GENE_ENGINEERING,
        }
    }

    pub fn label(self) -> &'static str {
        self.profile().label
    }

    /// Machine-friendly identifier accepted on the command line
    pub fn key(self) -> &'static str {
        match self {
            Domain::Semiconductors => "semiconductors",
            Domain::GeneEngineering => "gene-engineering",
        }
    }

    /// File-name fragment: lowercased label with spaces replaced by underscores
    pub fn slug(self) -> String {
        self.label().to_lowercase().replace(' ', "_")
    }

    /// Selector label as shown in the dashboard ("💻 Полупроводники")
    pub fn display_label(self) -> String {
        let profile = self.profile();
        format!("{} {}", profile.icon, profile.label)
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Domain {
    type Err = TechTrendsError;

    /// Accepts the CLI key, the Russian label, or the selector label with its icon.
    /// Unknown input is rejected with the closest known name as a hint.
    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(TechTrendsError::UnknownDomain {
                message: "domain cannot be empty".into(),
            });
        }

        let lowered = trimmed.to_lowercase();
        for domain in Domain::ALL {
            let label = domain.label().to_lowercase();
            if lowered == domain.key() || lowered == label || lowered.contains(&label) {
                return Ok(domain);
            }
        }

        let mut msg = format!(
            "'{}'. Known domains: {}",
            trimmed,
            Domain::ALL
                .iter()
                .map(|d| format!("{} ({})", d.key(), d.label()))
                .collect::<Vec<_>>()
                .join(", ")
        );
        if let Some(closest) = closest_domain(&lowered) {
            msg.push_str(&format!(". Did you mean '{}'?", closest.key()));
        }
        Err(TechTrendsError::UnknownDomain { message: msg })
    }
}

/// Pick the domain whose key or label is nearest to the input
fn closest_domain(input: &str) -> Option<Domain> {
    Domain::ALL
        .iter()
        .flat_map(|d| {
            [
                (*d, strsim::normalized_levenshtein(input, d.key())),
                (*d, strsim::normalized_levenshtein(input, &d.label().to_lowercase())),
            ]
        })
        .filter(|(_, score)| *score >= 0.4)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(d, _)| d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_and_labels() {
        assert_eq!("semiconductors".parse::<Domain>().unwrap(), Domain::Semiconductors);
        assert_eq!("Полупроводники".parse::<Domain>().unwrap(), Domain::Semiconductors);
        assert_eq!(
            "🧬 Генная инженерия".parse::<Domain>().unwrap(),
            Domain::GeneEngineering
        );
        assert_eq!("GENE-ENGINEERING".parse::<Domain>().unwrap(), Domain::GeneEngineering);
    }

    #[test]
    fn unknown_domain_suggests_closest() {
        let err = "semiconductor".parse::<Domain>().unwrap_err().to_string();
        assert!(err.contains("Did you mean 'semiconductors'"));

        let err = "quantum".parse::<Domain>().unwrap_err().to_string();
        assert!(err.contains("Known domains"));
    }

    #[test]
    fn slug_replaces_spaces() {
        assert_eq!(Domain::Semiconductors.slug(), "полупроводники");
        assert_eq!(Domain::GeneEngineering.slug(), "генная_инженерия");
    }

    #[test]
    fn selector_cycles() {
        assert_eq!(Domain::Semiconductors.next(), Domain::GeneEngineering);
        assert_eq!(Domain::GeneEngineering.next(), Domain::Semiconductors);
        assert_eq!(Domain::Semiconductors.previous(), Domain::GeneEngineering);
    }
}
