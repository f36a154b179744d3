//! Wire types for the experiment platform API.
//!
//! Field names and encodings match the platform's JSON exactly: camelCase
//! keys, and attribution windows carried as their length in seconds,
//! rendered as a string (`"86400"` for 24 hours).

use serde::{Deserialize, Serialize};

use crate::format::MetricKind;

/// Fixed attribution windows supported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributionWindow {
    OneHour,
    SixHours,
    TwelveHours,
    TwentyFourHours,
    SeventyTwoHours,
    OneWeek,
    TwoWeeks,
    ThreeWeeks,
    FourWeeks,
}

impl AttributionWindow {
    /// All supported windows, shortest first.
    pub const ALL: [AttributionWindow; 9] = [
        AttributionWindow::OneHour,
        AttributionWindow::SixHours,
        AttributionWindow::TwelveHours,
        AttributionWindow::TwentyFourHours,
        AttributionWindow::SeventyTwoHours,
        AttributionWindow::OneWeek,
        AttributionWindow::TwoWeeks,
        AttributionWindow::ThreeWeeks,
        AttributionWindow::FourWeeks,
    ];

    /// Window length in seconds.
    pub fn seconds(self) -> u32 {
        match self {
            Self::OneHour => 3_600,
            Self::SixHours => 21_600,
            Self::TwelveHours => 43_200,
            Self::TwentyFourHours => 86_400,
            Self::SeventyTwoHours => 259_200,
            Self::OneWeek => 604_800,
            Self::TwoWeeks => 1_209_600,
            Self::ThreeWeeks => 1_814_400,
            Self::FourWeeks => 2_419_200,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::OneHour => "1 hour",
            Self::SixHours => "6 hours",
            Self::TwelveHours => "12 hours",
            Self::TwentyFourHours => "24 hours",
            Self::SeventyTwoHours => "72 hours",
            Self::OneWeek => "1 week",
            Self::TwoWeeks => "2 weeks",
            Self::ThreeWeeks => "3 weeks",
            Self::FourWeeks => "4 weeks",
        }
    }

    /// Look up a window by its length in seconds.
    pub fn from_seconds(seconds: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|w| w.seconds() == seconds)
    }
}

impl Serialize for AttributionWindow {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.seconds().to_string())
    }
}

impl<'de> Deserialize<'de> for AttributionWindow {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let seconds: u32 = raw
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid attribution window: {raw:?}")))?;
        Self::from_seconds(seconds).ok_or_else(|| {
            serde::de::Error::custom(format!("unknown attribution window: {seconds} seconds"))
        })
    }
}

/// A metric definition as served by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub metric_id: u64,
    pub name: String,
    pub description: String,
    pub parameter_type: MetricKind,
}

/// Response containing the platform's metric catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricListResponse {
    pub metrics: Vec<Metric>,
}

impl MetricListResponse {
    pub fn new(metrics: Vec<Metric>) -> Self {
        Self { metrics }
    }
}

/// Lifecycle state of an experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentStatus {
    Staging,
    Running,
    Completed,
    Disabled,
}

/// One arm of an experiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    pub name: String,
    pub allocated_percentage: f64,
    pub is_default: bool,
}

/// An experiment definition as served by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    pub experiment_id: u64,
    pub name: String,
    pub status: ExperimentStatus,
    pub variations: Vec<Variation>,
}

impl Experiment {
    /// Smallest allocation percentage across this experiment's variations.
    pub fn min_variation_allocation(&self) -> Option<f64> {
        let allocations: Vec<f64> = self
            .variations
            .iter()
            .map(|v| v.allocated_percentage)
            .collect();
        crate::stats::min_variation_allocation(&allocations)
    }
}

/// Request body for assigning a metric to an experiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricAssignmentRequest {
    pub metric_id: u64,
    pub attribution_window_seconds: AttributionWindow,
    pub change_expected: bool,
    pub is_primary: bool,
    /// Minimum practical difference in metric units, encoded as a string
    /// of the user-entered value after unit conversion.
    pub min_difference: String,
}

impl MetricAssignmentRequest {
    pub fn new(
        metric_id: u64,
        attribution_window: AttributionWindow,
        change_expected: bool,
        is_primary: bool,
        min_difference: impl Into<String>,
    ) -> Self {
        Self {
            metric_id,
            attribution_window_seconds: attribution_window,
            change_expected,
            is_primary,
            min_difference: min_difference.into(),
        }
    }
}
