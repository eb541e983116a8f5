//! Seven-day risk history, trend aggregation and the weekly report.

pub mod report;
pub mod simulator;
pub mod trend;

pub use report::{WeeklyReport, WeeklyReportBuilder};
pub use simulator::{rng_from_seed, DailySeries, DailySnapshot, WeeklyHistorySimulator};
pub use trend::{AverageRiskLevel, HighestSymptom, Trend, TrendAggregates, TrendAnalyzer};
