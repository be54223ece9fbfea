//! Factor Flow Calculations
//!
//! Embodied factor flows use the total multipliers N = D·L. For a sector t:
//!
//! - input side: direct use d_t·x_t plus embodied in inputs Σ_i N_i·z_it
//! - output side: N_t·(intermediate sales) plus N_t·(final demand)
//!
//! Both sides equal N_t·x_t.

use std::collections::BTreeMap;

use eio_core::{round_to, FactorAccount, FlowEdge, IoTables, MultiplierSource, BILLION};
use nalgebra::DMatrix;

use crate::edges::rank_edges;
use crate::indicator_rows::IndicatorRows;

/// Factor-flow edges, economy-wide direct total and per-sector accounts for one indicator
#[derive(Debug, Clone)]
pub struct FactorFlows {
    pub edges: Vec<FlowEdge>,
    /// Σ_t d_t·x_t·scale, unrounded
    pub total: f64,
    pub accounts: BTreeMap<usize, FactorAccount>,
    pub source: MultiplierSource,
}

impl FactorFlows {
    fn unavailable() -> Self {
        Self {
            edges: Vec::new(),
            total: 0.0,
            accounts: BTreeMap::new(),
            source: MultiplierSource::Unavailable,
        }
    }
}

/// Accounts for sector `t` from unrounded inputs
fn sector_account(
    t: usize,
    d: &[f64],
    n_total: &[f64],
    x: f64,
    z: &DMatrix<f64>,
    scale: f64,
) -> FactorAccount {
    let sectors = n_total.len();

    let direct_factor = d[t] * x * scale;
    let embodied_in_inputs: f64 = (0..sectors).map(|i| n_total[i] * z[(i, t)] * scale).sum();
    let total_factor_output = n_total[t] * x * scale;

    let intermediate_sales_dollars: f64 = (0..sectors).map(|j| z[(t, j)]).sum();
    let final_demand_dollars = x - intermediate_sales_dollars;

    let (factor_to_intermediates, factor_to_final_demand) = if final_demand_dollars >= 0.0 {
        (
            n_total[t] * intermediate_sales_dollars * scale,
            n_total[t] * final_demand_dollars * scale,
        )
    } else {
        // Net importer: everything produced is attributed to intermediates.
        (total_factor_output, 0.0)
    };
    let total_factor_out = factor_to_intermediates + factor_to_final_demand;

    FactorAccount {
        direct_factor: round_to(direct_factor, 6),
        embodied_in_inputs: round_to(embodied_in_inputs, 6),
        total_factor_output: round_to(total_factor_output, 6),
        total_multiplier: round_to(n_total[t] * scale * BILLION, 6),
        factor_to_intermediates: round_to(factor_to_intermediates, 6),
        factor_to_final_demand: round_to(factor_to_final_demand, 6),
        total_factor_out: round_to(total_factor_out, 6),
    }
}

/// Compute factor flows for one indicator from the raw flow matrix `z`.
///
/// Self-flows are excluded. The edge threshold is
/// `threshold_fraction` × the economy-wide direct total; survivors are
/// ranked and capped at `max_edges`.
pub fn calculate_factor_flows(
    tables: &IoTables,
    z: &DMatrix<f64>,
    rows: &IndicatorRows<'_>,
    max_edges: usize,
) -> FactorFlows {
    let spec = rows.spec;
    let (Some(d), Some(n_total)) = (rows.direct_intensities(tables), rows.total_multipliers(tables))
    else {
        return FactorFlows::unavailable();
    };
    let scale = spec.scale;
    let sectors = tables.sector_count();

    let accounts = (0..sectors)
        .map(|t| (t, sector_account(t, &d, &n_total, tables.x[t], z, scale)))
        .collect();

    let total: f64 = (0..sectors).map(|t| d[t] * tables.x[t] * scale).sum();
    let threshold = total * spec.threshold_fraction;

    let mut edges = Vec::new();
    for i in 0..sectors {
        for j in 0..sectors {
            if i == j {
                continue;
            }
            let value = n_total[i] * z[(i, j)] * scale;
            if value >= threshold {
                edges.push(FlowEdge {
                    from: i,
                    to: j,
                    value: round_to(value, 6),
                });
            }
        }
    }
    let edges = rank_edges(edges, Some(max_edges));

    tracing::info!(
        "{}: {} flows, total: {:.2} {}",
        spec.code,
        edges.len(),
        total,
        spec.unit_display
    );

    FactorFlows {
        edges,
        total,
        accounts,
        source: rows.multiplier_source(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use eio_core::{CommodityMeta, FlowConfig, IndicatorCode, IndicatorSpec};
    use nalgebra::DVector;

    fn ghg() -> IndicatorSpec {
        FlowConfig::default()
            .indicator(IndicatorCode::Ghg)
            .cloned()
            .unwrap()
    }

    /// Two sectors; sector 1 sells more to sector 0 than it produces.
    fn net_importer_tables() -> IoTables {
        let a = DMatrix::from_row_slice(2, 2, &[0.0, 0.0, 0.5, 0.0]);
        let x = DVector::from_vec(vec![1000.0, 100.0]);
        let d = DMatrix::from_row_slice(1, 2, &[1.0, 2.0]);
        let n = DMatrix::from_row_slice(1, 2, &[2.0, 2.0]);
        let commodities = (0..2)
            .map(|i| CommodityMeta {
                code: format!("{i}"),
                name: format!("S{i}"),
                category: None,
            })
            .collect();
        IoTables::new(
            a,
            d,
            n,
            x,
            vec!["Greenhouse Gases".to_string()],
            vec!["Greenhouse Gases".to_string()],
            commodities,
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn test_negative_final_demand_goes_to_intermediates() {
        let tables = net_importer_tables();
        let mut spec = ghg();
        spec.scale = 1.0;
        let rows = IndicatorRows {
            spec: &spec,
            direct: Some(0),
            total: Some(0),
        };

        let result = calculate_factor_flows(&tables, &tables.dollar_flows(), &rows, 5000);
        let importer = result.accounts[&1];

        // 500 of sales against 100 of output
        assert_eq!(importer.factor_to_final_demand, 0.0);
        assert_eq!(importer.factor_to_intermediates, importer.total_factor_output);
        assert_eq!(importer.total_factor_out, importer.total_factor_output);
        assert_relative_eq!(importer.total_factor_output, 200.0);
    }

    #[test]
    fn test_fallback_uses_direct_intensities() {
        let tables = net_importer_tables();
        let mut spec = ghg();
        spec.scale = 1.0;
        let rows = IndicatorRows {
            spec: &spec,
            direct: Some(0),
            total: None,
        };

        let result = calculate_factor_flows(&tables, &tables.dollar_flows(), &rows, 5000);
        assert_eq!(result.source, MultiplierSource::DirectFallback);

        // Embodied in sector 0's inputs: d_1 · z_10 = 2 · 500
        let buyer = result.accounts[&0];
        assert_relative_eq!(buyer.embodied_in_inputs, 1000.0);
        assert_relative_eq!(buyer.total_multiplier, 1.0 * BILLION);
    }

    #[test]
    fn test_missing_direct_row_yields_empty_flows() {
        let tables = net_importer_tables();
        let spec = ghg();
        let rows = IndicatorRows {
            spec: &spec,
            direct: None,
            total: Some(0),
        };

        let result = calculate_factor_flows(&tables, &tables.dollar_flows(), &rows, 5000);
        assert!(result.edges.is_empty());
        assert!(result.accounts.is_empty());
        assert_eq!(result.total, 0.0);
        assert_eq!(result.source, MultiplierSource::Unavailable);
    }

    #[test]
    fn test_threshold_is_fraction_of_direct_total() {
        let tables = net_importer_tables();
        let mut spec = ghg();
        spec.scale = 1.0;
        // direct total = 1000 + 200; only edge is N_1·z_10 = 1000
        spec.threshold_fraction = 0.8;
        let rows = IndicatorRows {
            spec: &spec,
            direct: Some(0),
            total: Some(0),
        };
        let z = tables.dollar_flows();

        let kept = calculate_factor_flows(&tables, &z, &rows, 5000);
        assert_relative_eq!(kept.total, 1200.0);
        assert_eq!(kept.edges.len(), 1);
        assert_eq!((kept.edges[0].from, kept.edges[0].to), (1, 0));

        spec.threshold_fraction = 0.9;
        let rows = IndicatorRows {
            spec: &spec,
            direct: Some(0),
            total: Some(0),
        };
        assert!(calculate_factor_flows(&tables, &z, &rows, 5000).edges.is_empty());
    }
}
