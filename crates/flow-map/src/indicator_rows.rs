//! Resolves configured indicators to fixed rows of D and N.
//!
//! Lookup by display name happens once per run; the accounting loops only
//! see row indices.

use eio_core::{Diagnostic, FlowConfig, IndicatorSpec, IoTables, MultiplierSource};

#[derive(Debug, Clone)]
pub struct IndicatorRows<'a> {
    pub spec: &'a IndicatorSpec,
    /// Row in D, if present
    pub direct: Option<usize>,
    /// Row in N, if present
    pub total: Option<usize>,
}

impl IndicatorRows<'_> {
    pub fn multiplier_source(&self) -> MultiplierSource {
        match (self.direct, self.total) {
            (None, _) => MultiplierSource::Unavailable,
            (Some(_), None) => MultiplierSource::DirectFallback,
            (Some(_), Some(_)) => MultiplierSource::Total,
        }
    }

    /// Direct intensities, one per sector
    pub fn direct_intensities(&self, tables: &IoTables) -> Option<Vec<f64>> {
        self.direct
            .map(|row| tables.d.row(row).iter().copied().collect())
    }

    /// Total multipliers, one per sector. Falls back to D when N has no row.
    pub fn total_multipliers(&self, tables: &IoTables) -> Option<Vec<f64>> {
        match self.total {
            Some(row) => Some(tables.n.row(row).iter().copied().collect()),
            None => self.direct_intensities(tables),
        }
    }
}

/// Resolve every configured indicator, logging and returning a diagnostic
/// for each missing row.
pub fn resolve_indicators<'a>(
    tables: &IoTables,
    config: &'a FlowConfig,
) -> (Vec<IndicatorRows<'a>>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();

    let rows = config
        .indicators
        .iter()
        .map(|spec| {
            let direct = tables.direct_row(spec.display_name);
            let total = tables.total_row(spec.display_name);

            if direct.is_none() {
                let diagnostic = Diagnostic::MissingIndicatorInDirectTable {
                    indicator: spec.display_name.to_string(),
                };
                tracing::warn!("{}", diagnostic);
                diagnostics.push(diagnostic);
            } else if total.is_none() {
                let diagnostic = Diagnostic::MissingIndicatorInMultiplierTable {
                    indicator: spec.display_name.to_string(),
                };
                tracing::warn!("{}", diagnostic);
                diagnostics.push(diagnostic);
            }

            IndicatorRows { spec, direct, total }
        })
        .collect();

    (rows, diagnostics)
}
