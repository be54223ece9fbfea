use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use eio_core::{CommodityMeta, FlowError, FlowResult, IoTables};
use nalgebra::DVector;

use crate::sheet::{parse_labelled_matrix, parse_records, LabelledMatrix, Records};

/// Sheet names of the model tables
#[derive(Debug, Clone)]
pub struct SheetNames {
    pub technical_coefficients: String,
    pub direct_intensities: String,
    pub total_multipliers: String,
    pub total_output: String,
    pub indicators: String,
    pub commodities: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            technical_coefficients: "A".to_string(),
            direct_intensities: "D".to_string(),
            total_multipliers: "N".to_string(),
            total_output: "x".to_string(),
            indicators: "indicators".to_string(),
            commodities: "commodities_meta".to_string(),
        }
    }
}

/// Load a USEEIO workbook using the default sheet names.
pub fn load_workbook(path: &Path) -> FlowResult<IoTables> {
    load_workbook_with(path, &SheetNames::default())
}

pub fn load_workbook_with(path: &Path, names: &SheetNames) -> FlowResult<IoTables> {
    tracing::info!("Loading USEEIO data from {}", path.display());

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| FlowError::input_load(path.display().to_string(), e.to_string()))?;

    let mut sheet = |name: &str| -> FlowResult<Range<Data>> {
        workbook
            .worksheet_range(name)
            .map_err(|e| FlowError::input_load(format!("sheet '{name}'"), e.to_string()))
    };

    let a = parse_labelled_matrix(&names.technical_coefficients, &sheet(&names.technical_coefficients)?)?;
    let d = parse_labelled_matrix(&names.direct_intensities, &sheet(&names.direct_intensities)?)?;
    let n = parse_labelled_matrix(&names.total_multipliers, &sheet(&names.total_multipliers)?)?;
    let x = parse_labelled_matrix(&names.total_output, &sheet(&names.total_output)?)?;
    let indicators = parse_records(&names.indicators, &sheet(&names.indicators)?)?;
    let commodities = parse_records(&names.commodities, &sheet(&names.commodities)?)?;

    for (name, table) in [
        (&names.technical_coefficients, &a),
        (&names.direct_intensities, &d),
        (&names.total_multipliers, &n),
        (&names.total_output, &x),
    ] {
        tracing::debug!("sheet '{}': {}x{}", name, table.values.nrows(), table.values.ncols());
    }

    let tables = assemble(a, d, n, x, &indicators, &commodities, names)?;
    tracing::info!("Loaded {} sectors", tables.sector_count());
    Ok(tables)
}

fn assemble(
    a: LabelledMatrix,
    d: LabelledMatrix,
    n: LabelledMatrix,
    x: LabelledMatrix,
    indicators: &Records,
    commodities: &Records,
    names: &SheetNames,
) -> FlowResult<IoTables> {
    if x.row_labels != a.row_labels {
        tracing::warn!(
            "sheet '{}' row labels differ from sheet '{}'; matching by position",
            names.total_output,
            names.technical_coefficients
        );
    }

    let output = DVector::from_iterator(x.values.nrows(), x.values.column(0).iter().copied());
    let commodities = commodity_rows(&names.commodities, commodities)?;
    let indicator_names = indicator_names(indicators);

    IoTables::new(
        a.values,
        d.values,
        n.values,
        output,
        d.row_labels,
        n.row_labels,
        commodities,
        indicator_names,
    )
}

fn commodity_rows(sheet: &str, records: &Records) -> FlowResult<Vec<CommodityMeta>> {
    let required = |column: &str| {
        records.column(column).ok_or_else(|| {
            FlowError::input_load(format!("sheet '{sheet}'"), format!("missing column '{column}'"))
        })
    };
    let code_col = required("Code")?;
    let name_col = required("Name")?;
    let category_col = records.column("Category");

    records
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| -> FlowResult<CommodityMeta> {
            let code = row.get(code_col).cloned().flatten().ok_or_else(|| {
                FlowError::input_load(format!("sheet '{sheet}'"), format!("row {} has no Code", i + 2))
            })?;
            Ok(CommodityMeta {
                code,
                name: row.get(name_col).cloned().flatten().unwrap_or_default(),
                category: category_col.and_then(|c| row.get(c).cloned().flatten()),
            })
        })
        .collect()
}

fn indicator_names(records: &Records) -> Vec<String> {
    let column = records.column("Name").unwrap_or(0);
    records
        .rows
        .iter()
        .filter_map(|row| row.get(column).cloned().flatten())
        .collect()
}
