//! Balance verification over published accounts.
//!
//! Checks that every dollars account satisfies
//! inputs + value added = output = sales + final demand, and every factor
//! account satisfies direct + embodied = total = to intermediates + to final demand.
//! Violations are diagnostics, not errors.

use eio_core::{AccountTable, Diagnostic, FlowDocument};

/// Default relative tolerance
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

// Slack for comparing a sum of rounded values with a rounded value
fn rounding_slack(places: i32) -> f64 {
    2.0 * 10f64.powi(-places)
}

fn within(lhs: f64, rhs: f64, tolerance: f64, places: i32) -> bool {
    let allowed = tolerance * lhs.abs().max(rhs.abs()) + rounding_slack(places);
    (lhs - rhs).abs() <= allowed
}

/// Verify one account table, returning the largest residual per out-of-balance sector.
pub fn verify_accounts(indicator: &str, table: &AccountTable, tolerance: f64) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut flag = |sector: usize, residual: f64| {
        let diagnostic = Diagnostic::AccountImbalance {
            indicator: indicator.to_string(),
            sector,
            residual,
        };
        tracing::warn!("{}", diagnostic);
        diagnostics.push(diagnostic);
    };

    match table {
        AccountTable::Dollars(accounts) => {
            for (&sector, a) in accounts {
                let input_side = a.intermediate_inputs + a.value_added;
                let output_side = a.intermediate_sales + a.final_demand;
                if !within(input_side, a.total_output, tolerance, 4)
                    || !within(output_side, a.total_output, tolerance, 4)
                {
                    let residual = (input_side - a.total_output)
                        .abs()
                        .max((output_side - a.total_output).abs());
                    flag(sector, residual);
                }
            }
        }
        AccountTable::Factor(accounts) => {
            for (&sector, a) in accounts {
                let input_side = a.direct_factor + a.embodied_in_inputs;
                let output_side = a.factor_to_intermediates + a.factor_to_final_demand;
                if !within(input_side, a.total_factor_output, tolerance, 6)
                    || !within(output_side, a.total_factor_out, tolerance, 6)
                {
                    let residual = (input_side - a.total_factor_output)
                        .abs()
                        .max((output_side - a.total_factor_out).abs());
                    flag(sector, residual);
                }
            }
        }
    }

    diagnostics
}

/// Verify every account table in the document.
pub fn verify_document(document: &FlowDocument, tolerance: f64) -> Vec<Diagnostic> {
    document
        .sector_accounts
        .iter()
        .flat_map(|(indicator, table)| verify_accounts(indicator, table, tolerance))
        .collect()
}
