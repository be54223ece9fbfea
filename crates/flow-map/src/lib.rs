//! Flow Map Module
//!
//! Input-output accounting for the USEEIO flow visualization: inter-industry
//! dollar flows, embodied factor flows per indicator, and balanced
//! per-sector accounts. Pure computation over pre-loaded [`eio_core::IoTables`].

pub mod balance;
pub mod classifier;
pub mod document;
pub mod dollar_flows;
pub mod edges;
pub mod factor_flows;
pub mod indicator_rows;
pub mod sector_totals;

pub use balance::{verify_accounts, verify_document, DEFAULT_TOLERANCE};
pub use classifier::{classify_sector, naics_sector};
pub use document::{build_flow_document, FlowReport};
pub use dollar_flows::{calculate_dollar_flows, DollarFlows};
pub use factor_flows::{calculate_factor_flows, FactorFlows};
pub use indicator_rows::{resolve_indicators, IndicatorRows};
