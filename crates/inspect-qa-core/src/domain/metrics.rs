//! Aggregate quality metrics consumed by the presentation layer.

use serde::{Deserialize, Serialize};

/// Number of chart palette entries defect types cycle through.
pub const PALETTE_SIZE: usize = 5;

/// Rolling quality metrics over all recorded inspections.
///
/// Always derived: a new value replaces the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    /// Mean inspection score, rounded.
    pub overall_score: u8,
    /// Share of passed inspections in percent, two decimals.
    pub pass_rate: f64,
    /// Share of failed inspections in percent, two decimals.
    pub defect_rate: f64,
    /// Number of high-severity defects across all inspections.
    pub critical_issues: usize,
    /// Number of inspections in the collection.
    pub total_inspections: usize,
    /// Up to six monthly points, oldest first.
    pub monthly_trends: Vec<MonthlyTrendPoint>,
    /// Share of each defect category.
    pub defect_types: Vec<DefectTypeShare>,
}

impl QualityMetrics {
    /// Placeholder metrics shown before any inspection is recorded.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            overall_score: 92,
            pass_rate: 95.2,
            defect_rate: 4.8,
            critical_issues: 3,
            total_inspections: 0,
            monthly_trends: vec![
                MonthlyTrendPoint::new("Jan", 85, 12, 88),
                MonthlyTrendPoint::new("Feb", 87, 10, 90),
                MonthlyTrendPoint::new("Mar", 89, 8, 92),
                MonthlyTrendPoint::new("Apr", 91, 6, 94),
                MonthlyTrendPoint::new("May", 88, 9, 91),
                MonthlyTrendPoint::new("Jun", 92, 5, 95),
            ],
            defect_types: vec![
                DefectTypeShare::new("Scratch", 35, 0),
                DefectTypeShare::new("Crack", 25, 1),
                DefectTypeShare::new("Contamination", 20, 2),
                DefectTypeShare::new("Color", 15, 3),
                DefectTypeShare::new("Other", 5, 4),
            ],
        }
    }

    /// Sum of all defect-type shares.
    #[must_use]
    pub fn defect_share_total(&self) -> u32 {
        self.defect_types.iter().map(|d| u32::from(d.value)).sum()
    }
}

impl Default for QualityMetrics {
    fn default() -> Self {
        Self::seeded()
    }
}

/// One month of aggregated results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrendPoint {
    /// Short month label ("Jan".."Dec").
    pub month: String,
    /// Overall score for the month.
    pub score: u8,
    /// Failed inspection count.
    pub defects: usize,
    /// Pass rate, rounded to a whole percent.
    pub pass_rate: u8,
}

impl MonthlyTrendPoint {
    /// Creates a new trend point.
    #[must_use]
    pub fn new(month: impl Into<String>, score: u8, defects: usize, pass_rate: u8) -> Self {
        Self {
            month: month.into(),
            score,
            defects,
            pass_rate,
        }
    }
}

/// Share of one defect category in the distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefectTypeShare {
    /// Display name ("Scratch", ...).
    pub name: String,
    /// Share in percent.
    pub value: u8,
    /// Chart palette reference (`chart-1`..`chart-5`).
    pub color_ref: String,
}

impl DefectTypeShare {
    /// Creates a share, picking the palette entry from its position.
    #[must_use]
    pub fn new(name: impl Into<String>, value: u8, index: usize) -> Self {
        Self {
            name: name.into(),
            value,
            color_ref: palette_ref(index),
        }
    }
}

/// Palette reference for the n-th entry of a distribution.
#[must_use]
pub fn palette_ref(index: usize) -> String {
    format!("chart-{}", index % PALETTE_SIZE + 1)
}

/// Short English label for a calendar month.
#[must_use]
pub const fn month_label(month: time::Month) -> &'static str {
    use time::Month;
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// Returns true if `label` is one of the twelve short month labels.
#[must_use]
pub fn is_month_label(label: &str) -> bool {
    MONTH_LABELS.contains(&label)
}

/// All short month labels, January first.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
