use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// An industry sector as exported
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sector {
    pub id: usize,
    /// Commodity code with region suffix, e.g. "1111A0/US"
    pub code: String,
    pub name: String,
    /// Coarse sector label, e.g. "Manufacturing"
    pub sector: String,
    /// Total output, billion $
    pub output: f64,
    /// Direct factor footprint per indicator code
    pub factors: BTreeMap<String, f64>,
}

/// A directed flow between two sectors
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FlowEdge {
    pub from: usize,
    pub to: usize,
    pub value: f64,
}

/// Where an indicator's total multipliers came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiplierSource {
    /// Row found in N
    Total,
    /// Row missing from N; direct intensities stand in
    DirectFallback,
    /// Row missing from D; no flows computed
    Unavailable,
}

impl MultiplierSource {
    pub fn is_degraded(&self) -> bool {
        !matches!(self, Self::Total)
    }
}

/// One entry of `flow_types`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlowType {
    pub name: String,
    pub code: String,
    pub unit: String,
    pub group: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier_source: Option<MultiplierSource>,
    pub top_flows: Vec<FlowEdge>,
}

/// Dollar accounts for one sector, billion $
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DollarAccount {
    pub total_output: f64,
    pub intermediate_inputs: f64,
    pub intermediate_sales: f64,
    pub value_added: f64,
    pub final_demand: f64,
}

/// Factor accounts for one sector and indicator, in the indicator's display unit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FactorAccount {
    pub direct_factor: f64,
    pub embodied_in_inputs: f64,
    pub total_factor_output: f64,
    /// Total multiplier per billion $ of output
    pub total_multiplier: f64,
    pub factor_to_intermediates: f64,
    pub factor_to_final_demand: f64,
    pub total_factor_out: f64,
}

/// Per-sector accounts for one flow type, keyed by sector id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AccountTable {
    Dollars(BTreeMap<usize, DollarAccount>),
    Factor(BTreeMap<usize, FactorAccount>),
}

impl AccountTable {
    pub fn len(&self) -> usize {
        match self {
            Self::Dollars(accounts) => accounts.len(),
            Self::Factor(accounts) => accounts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_dollars(&self) -> Option<&BTreeMap<usize, DollarAccount>> {
        match self {
            Self::Dollars(accounts) => Some(accounts),
            Self::Factor(_) => None,
        }
    }

    pub fn as_factor(&self) -> Option<&BTreeMap<usize, FactorAccount>> {
        match self {
            Self::Factor(accounts) => Some(accounts),
            Self::Dollars(_) => None,
        }
    }
}

/// Display info for one indicator (or the synthetic USD entry)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndicatorMetadata {
    pub name: String,
    pub unit: String,
    pub unit_display: String,
    pub group: String,
    pub color: String,
}

/// The complete exported document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlowDocument {
    pub industries: Vec<Sector>,
    pub flow_types: BTreeMap<String, FlowType>,
    pub sector_accounts: BTreeMap<String, AccountTable>,
    pub indicator_metadata: BTreeMap<String, IndicatorMetadata>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456789, 3), 1.235);
        assert_eq!(round_to(-1.23456789, 4), -1.2346);
        assert_eq!(round_to(0.0000004, 6), 0.0);
        assert_eq!(round_to(2.5, 0), 3.0);
    }

    #[test]
    fn test_flow_type_omits_absent_fields() {
        let flow_type = FlowType {
            name: "Dollar Flows".to_string(),
            code: "USD".to_string(),
            unit: "Billion USD".to_string(),
            group: "Economic".to_string(),
            color: "#2563eb".to_string(),
            total: None,
            multiplier_source: None,
            top_flows: vec![FlowEdge { from: 0, to: 1, value: 40.0 }],
        };

        let json = serde_json::to_value(&flow_type).unwrap();
        assert!(json.get("total").is_none());
        assert!(json.get("multiplier_source").is_none());
        assert_eq!(json["top_flows"][0]["from"], 0);
        assert_eq!(json["top_flows"][0]["value"], 40.0);
    }

    #[test]
    fn test_multiplier_source_serializes_snake_case() {
        let json = serde_json::to_string(&MultiplierSource::DirectFallback).unwrap();
        assert_eq!(json, "\"direct_fallback\"");
        assert!(MultiplierSource::DirectFallback.is_degraded());
        assert!(!MultiplierSource::Total.is_degraded());
    }

    #[test]
    fn test_account_table_keys_are_sector_ids() {
        let mut accounts = BTreeMap::new();
        for id in [10usize, 2, 0] {
            accounts.insert(
                id,
                DollarAccount {
                    total_output: 1.0,
                    intermediate_inputs: 0.5,
                    intermediate_sales: 0.25,
                    value_added: 0.5,
                    final_demand: 0.75,
                },
            );
        }
        let table = AccountTable::Dollars(accounts);
        let json = serde_json::to_string(&table).unwrap();

        let first = json.find("\"0\"").unwrap();
        let second = json.find("\"2\"").unwrap();
        let third = json.find("\"10\"").unwrap();
        assert!(first < second && second < third);
        assert_eq!(table.len(), 3);
        assert!(table.as_factor().is_none());
    }
}
