pub mod cache;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod export;
pub mod metrics;
pub mod report;

pub use cache::DatasetCache;
pub use config::Config;
pub use dataset::{DomainDataset, SeriesWindow, TimeSeries, generate};
pub use domain::Domain;
pub use error::{Result, TechTrendsError};
pub use metrics::{MetricsSummary, TrendStatus};
pub use report::{Recommendation, ReportArtifact, ReportInput, ReportKind, ReportRenderer};
