//! Sector records with their direct factor footprints.

use std::collections::BTreeMap;

use eio_core::{round_to, IoTables, Sector, BILLION};

use crate::classifier::{classify_sector, regional_code};
use crate::indicator_rows::IndicatorRows;

/// Build one [`Sector`] per commodity row. `factors` holds d·x·scale for
/// every indicator present in D.
pub fn build_sectors(tables: &IoTables, indicators: &[IndicatorRows<'_>]) -> Vec<Sector> {
    tables
        .commodities
        .iter()
        .enumerate()
        .map(|(id, meta)| {
            let output = tables.x[id];

            let factors: BTreeMap<String, f64> = indicators
                .iter()
                .filter_map(|rows| {
                    let row = rows.direct?;
                    let value = tables.d[(row, id)] * output * rows.spec.scale;
                    Some((rows.spec.code.to_string(), round_to(value, 6)))
                })
                .collect();

            Sector {
                id,
                code: regional_code(&meta.code),
                name: meta.name.clone(),
                sector: classify_sector(meta.category.as_deref(), &meta.code),
                output: output / BILLION,
                factors,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator_rows::resolve_indicators;
    use eio_core::{CommodityMeta, FlowConfig};
    use nalgebra::{DMatrix, DVector};

    #[test]
    fn test_sector_records() {
        let commodities = vec![
            CommodityMeta {
                code: "1111A0".to_string(),
                name: "Oilseed farming".to_string(),
                category: Some("111CA: Farms/Crops".to_string()),
            },
            CommodityMeta {
                code: "S00101/US".to_string(),
                name: "Federal electric utilities".to_string(),
                category: None,
            },
        ];
        let tables = IoTables::new(
            DMatrix::zeros(2, 2),
            DMatrix::from_row_slice(2, 2, &[2.0, 4.0, 0.5, 0.25]),
            DMatrix::zeros(0, 2),
            DVector::from_vec(vec![3.0 * BILLION, 1.5 * BILLION]),
            vec!["Greenhouse Gases".to_string(), "Jobs Supported".to_string()],
            vec![],
            commodities,
            vec![],
        )
        .unwrap();
        let config = FlowConfig::default();
        let (rows, _) = resolve_indicators(&tables, &config);

        let sectors = build_sectors(&tables, &rows);
        assert_eq!(sectors.len(), 2);

        let farm = &sectors[0];
        assert_eq!(farm.code, "1111A0/US");
        assert_eq!(farm.sector, "Farms");
        assert_eq!(farm.output, 3.0);
        // 2 kg/$ · 3e9 $ · 1e-9 = 6 Mt
        assert_eq!(farm.factors["GHG"], 6.0);
        // 0.5 jobs/$ · 3e9 $ · 1e-3 = 1.5e6 thousand jobs
        assert_eq!(farm.factors["JOBS"], 1.5e6);
        assert_eq!(farm.factors.len(), 2);

        let utility = &sectors[1];
        assert_eq!(utility.code, "S00101/US");
        assert_eq!(utility.sector, "Government");
        assert!(!utility.factors.contains_key("ENRG"));
    }
}
