//! Flow document assembly.
//!
//! Runs dollar flows, sector totals and every configured indicator over one
//! shared flow matrix and collects the results into a [`FlowDocument`].

use std::collections::BTreeMap;

use eio_core::{
    AccountTable, Diagnostic, DollarFlowInfo, FlowConfig, FlowDocument, FlowType,
    IndicatorMetadata, IoTables, round_to, DOLLARS_KEY,
};

use crate::dollar_flows::calculate_dollar_flows;
use crate::factor_flows::calculate_factor_flows;
use crate::indicator_rows::resolve_indicators;
use crate::sector_totals::build_sectors;

/// Document plus every non-fatal condition raised while building it
#[derive(Debug, Clone)]
pub struct FlowReport {
    pub document: FlowDocument,
    pub diagnostics: Vec<Diagnostic>,
}

/// Build the complete flow document. Deterministic for identical inputs.
pub fn build_flow_document(tables: &IoTables, config: &FlowConfig) -> FlowReport {
    let (indicators, diagnostics) = resolve_indicators(tables, config);
    let z = tables.dollar_flows();

    let industries = build_sectors(tables, &indicators);

    let mut flow_types = BTreeMap::new();
    let mut sector_accounts = BTreeMap::new();

    let dollars = calculate_dollar_flows(tables, &z, config.dollar_threshold);
    flow_types.insert(
        DOLLARS_KEY.to_string(),
        FlowType {
            name: DollarFlowInfo::NAME.to_string(),
            code: DollarFlowInfo::CODE.to_string(),
            unit: DollarFlowInfo::UNIT_DISPLAY.to_string(),
            group: DollarFlowInfo::GROUP.to_string(),
            color: DollarFlowInfo::COLOR.to_string(),
            total: None,
            multiplier_source: None,
            top_flows: dollars.edges,
        },
    );
    sector_accounts.insert(DOLLARS_KEY.to_string(), AccountTable::Dollars(dollars.accounts));

    for rows in &indicators {
        let spec = rows.spec;
        let code = spec.code.to_string();
        let flows = calculate_factor_flows(tables, &z, rows, config.max_edges);

        flow_types.insert(
            code.clone(),
            FlowType {
                name: spec.display_name.to_string(),
                code: code.clone(),
                unit: spec.unit_display.to_string(),
                group: spec.group.to_string(),
                color: spec.color.to_string(),
                total: Some(round_to(flows.total, 4)),
                multiplier_source: Some(flows.source),
                top_flows: flows.edges,
            },
        );
        sector_accounts.insert(code, AccountTable::Factor(flows.accounts));
    }

    FlowReport {
        document: FlowDocument {
            industries,
            flow_types,
            sector_accounts,
            indicator_metadata: indicator_metadata(config),
        },
        diagnostics,
    }
}

/// Display metadata for every configured indicator plus the USD entry
pub fn indicator_metadata(config: &FlowConfig) -> BTreeMap<String, IndicatorMetadata> {
    let mut metadata: BTreeMap<String, IndicatorMetadata> = config
        .indicators
        .iter()
        .map(|spec| {
            (
                spec.code.to_string(),
                IndicatorMetadata {
                    name: spec.display_name.to_string(),
                    unit: spec.unit.to_string(),
                    unit_display: spec.unit_display.to_string(),
                    group: spec.group.to_string(),
                    color: spec.color.to_string(),
                },
            )
        })
        .collect();

    metadata.insert(
        DollarFlowInfo::CODE.to_string(),
        IndicatorMetadata {
            name: DollarFlowInfo::NAME.to_string(),
            unit: DollarFlowInfo::UNIT.to_string(),
            unit_display: DollarFlowInfo::UNIT_DISPLAY.to_string(),
            group: DollarFlowInfo::GROUP.to_string(),
            color: DollarFlowInfo::COLOR.to_string(),
        },
    );
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_includes_usd() {
        let metadata = indicator_metadata(&FlowConfig::default());
        assert_eq!(metadata.len(), 13);

        let usd = &metadata["USD"];
        assert_eq!(usd.unit, "USD");
        assert_eq!(usd.unit_display, "Billion USD");

        let land = &metadata["LAND"];
        assert_eq!(land.name, "Land use");
        assert_eq!(land.unit, "m2*yr");
    }
}
