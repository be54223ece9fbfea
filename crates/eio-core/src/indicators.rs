//! Indicator configuration.
//!
//! The indicator table is compiled in. It is built once at startup as a
//! [`FlowConfig`] and passed by reference into the accounting engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dollar-flow edges below this value (billion $) are dropped.
pub const DOLLAR_FLOW_THRESHOLD: f64 = 0.1;

/// Maximum number of factor-flow edges kept per indicator.
pub const MAX_FLOW_EDGES: usize = 5000;

/// Key under which dollar flows appear in `flow_types` and `sector_accounts`.
pub const DOLLARS_KEY: &str = "dollars";

/// Raw currency units per billion.
pub const BILLION: f64 = 1e9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndicatorCode {
    Ghg,
    Vadd,
    Jobs,
    Enrg,
    Watr,
    Land,
    Cmsw,
    Ccdd,
    Crhw,
    Smog,
    Hrsp,
    Acid,
}

impl IndicatorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ghg => "GHG",
            Self::Vadd => "VADD",
            Self::Jobs => "JOBS",
            Self::Enrg => "ENRG",
            Self::Watr => "WATR",
            Self::Land => "LAND",
            Self::Cmsw => "CMSW",
            Self::Ccdd => "CCDD",
            Self::Crhw => "CRHW",
            Self::Smog => "SMOG",
            Self::Hrsp => "HRSP",
            Self::Acid => "ACID",
        }
    }
}

impl fmt::Display for IndicatorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One configured indicator
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSpec {
    /// Row label in the D and N tables (e.g. "Greenhouse Gases")
    pub display_name: &'static str,
    pub code: IndicatorCode,
    /// Unit of the raw table values
    pub unit: &'static str,
    /// Unit after `scale` is applied
    pub unit_display: &'static str,
    /// Multiplier from `unit` to `unit_display`
    pub scale: f64,
    pub group: &'static str,
    pub color: &'static str,
    /// Edge threshold as a fraction of the indicator's economy-wide direct total
    pub threshold_fraction: f64,
}

const DEFAULT_THRESHOLD_FRACTION: f64 = 0.0001;

#[allow(clippy::too_many_arguments)]
fn spec(
    display_name: &'static str,
    code: IndicatorCode,
    unit: &'static str,
    unit_display: &'static str,
    scale: f64,
    group: &'static str,
    color: &'static str,
) -> IndicatorSpec {
    IndicatorSpec {
        display_name,
        code,
        unit,
        unit_display,
        scale,
        group,
        color,
        threshold_fraction: DEFAULT_THRESHOLD_FRACTION,
    }
}

/// The twelve indicators exported by default, in output order.
pub fn key_indicators() -> Vec<IndicatorSpec> {
    use IndicatorCode::*;

    vec![
        spec("Greenhouse Gases", Ghg, "kg CO2 eq", "Mt CO2 eq", 1e-9, "Environmental", "#dc2626"),
        spec("Value Added", Vadd, "$", "Billion $", 1e-9, "Economic", "#16a34a"),
        spec("Jobs Supported", Jobs, "jobs", "Thousand Jobs", 1e-3, "Economic", "#2563eb"),
        spec("Energy Use", Enrg, "MJ", "TJ", 1e-6, "Environmental", "#ea580c"),
        spec("Freshwater withdrawals", Watr, "kg", "Billion kg", 1e-9, "Environmental", "#0ea5e9"),
        spec("Land use", Land, "m2*yr", "Thousand km²", 1e-9, "Environmental", "#84cc16"),
        spec("Commercial Municipal Solid Waste", Cmsw, "kg", "Mt", 1e-9, "Waste", "#a855f7"),
        spec(
            "Commercial Construction and Demolition Debris",
            Ccdd,
            "kg",
            "Mt",
            1e-9,
            "Waste",
            "#f97316",
        ),
        spec("Commercial RCRA Hazardous Waste", Crhw, "kg", "kt", 1e-6, "Waste", "#ef4444"),
        spec("Smog Formation Potential", Smog, "kg O3 eq", "kt O3 eq", 1e-6, "Environmental", "#8b5cf6"),
        spec(
            "Human Health - Respiratory Effects",
            Hrsp,
            "kg PM2.5 eq",
            "kt PM2.5 eq",
            1e-6,
            "Health",
            "#ec4899",
        ),
        spec("Acidification Potential", Acid, "kg SO2 eq", "kt SO2 eq", 1e-6, "Environmental", "#f59e0b"),
    ]
}

/// Display info for the synthetic dollar-flow entry
pub struct DollarFlowInfo;

impl DollarFlowInfo {
    pub const NAME: &'static str = "Dollar Flows";
    pub const CODE: &'static str = "USD";
    pub const UNIT: &'static str = "USD";
    pub const UNIT_DISPLAY: &'static str = "Billion USD";
    pub const GROUP: &'static str = "Economic";
    pub const COLOR: &'static str = "#2563eb";
}

/// Immutable run configuration
#[derive(Debug, Clone)]
pub struct FlowConfig {
    pub indicators: Vec<IndicatorSpec>,
    /// Absolute dollar-flow edge threshold, billion $
    pub dollar_threshold: f64,
    /// Cap on factor-flow edges per indicator
    pub max_edges: usize,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            indicators: key_indicators(),
            dollar_threshold: DOLLAR_FLOW_THRESHOLD,
            max_edges: MAX_FLOW_EDGES,
        }
    }
}

impl FlowConfig {
    pub fn indicator(&self, code: IndicatorCode) -> Option<&IndicatorSpec> {
        self.indicators.iter().find(|spec| spec.code == code)
    }
}
