//! Dollar Flow Calculations
//!
//! Inter-industry purchases z_ij = A_ij * x_j in billion $, with the
//! per-sector accounting identity
//! intermediate inputs + value added = total output = intermediate sales + final demand.

use std::collections::BTreeMap;

use eio_core::{round_to, BILLION, DollarAccount, FlowEdge, IoTables};
use nalgebra::DMatrix;

use crate::edges::rank_edges;

/// Dollar-flow edges and accounts
#[derive(Debug, Clone)]
pub struct DollarFlows {
    pub edges: Vec<FlowEdge>,
    pub accounts: BTreeMap<usize, DollarAccount>,
}

/// Compute dollar flows from the raw flow matrix `z` (see [`IoTables::dollar_flows`]).
///
/// `threshold` is in billion $. Self-purchases are kept so the edge set
/// reconciles with the accounts.
pub fn calculate_dollar_flows(tables: &IoTables, z: &DMatrix<f64>, threshold: f64) -> DollarFlows {
    let flows = z / BILLION;
    let n = tables.sector_count();

    let accounts = (0..n)
        .map(|j| {
            let total_output = tables.x[j] / BILLION;
            let intermediate_inputs = flows.column(j).sum();
            let intermediate_sales = flows.row(j).sum();
            let value_added = total_output - intermediate_inputs;
            let final_demand = total_output - intermediate_sales;

            let account = DollarAccount {
                total_output: round_to(total_output, 4),
                intermediate_inputs: round_to(intermediate_inputs, 4),
                intermediate_sales: round_to(intermediate_sales, 4),
                value_added: round_to(value_added, 4),
                final_demand: round_to(final_demand, 4),
            };
            (j, account)
        })
        .collect();

    let mut edges = Vec::new();
    for i in 0..n {
        for j in 0..n {
            let value = flows[(i, j)];
            if value >= threshold {
                edges.push(FlowEdge {
                    from: i,
                    to: j,
                    value: round_to(value, 3),
                });
            }
        }
    }
    let edges = rank_edges(edges, None);

    tracing::info!("Dollar flows: {} (threshold: ${}B)", edges.len(), threshold);

    DollarFlows { edges, accounts }
}
