//! Typed input tables for one USEEIO model.

use nalgebra::{DMatrix, DVector};

use crate::error::{FlowError, FlowResult};

/// One row of the commodities metadata table
#[derive(Debug, Clone, PartialEq)]
pub struct CommodityMeta {
    /// NAICS-based commodity code, e.g. "1111A0" or "1111A0/US"
    pub code: String,
    pub name: String,
    /// Category path, e.g. "111CA: Farms/Crop production"
    pub category: Option<String>,
}

/// The matrices and metadata the accounting engine consumes.
///
/// Shapes are checked once in [`IoTables::new`]; after that every sector
/// index in `0..sector_count()` is valid for every table.
#[derive(Debug, Clone)]
pub struct IoTables {
    /// Technical coefficients, n×n
    pub a: DMatrix<f64>,
    /// Direct factor intensities, k×n
    pub d: DMatrix<f64>,
    /// Total multipliers, k'×n
    pub n: DMatrix<f64>,
    /// Total output, raw currency units
    pub x: DVector<f64>,
    /// Row labels of `d`
    pub direct_labels: Vec<String>,
    /// Row labels of `n`
    pub total_labels: Vec<String>,
    pub commodities: Vec<CommodityMeta>,
    /// Names listed in the indicators table
    pub indicator_names: Vec<String>,
}

impl IoTables {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        a: DMatrix<f64>,
        d: DMatrix<f64>,
        n: DMatrix<f64>,
        x: DVector<f64>,
        direct_labels: Vec<String>,
        total_labels: Vec<String>,
        commodities: Vec<CommodityMeta>,
        indicator_names: Vec<String>,
    ) -> FlowResult<Self> {
        let sectors = a.nrows();

        if a.ncols() != sectors {
            return Err(FlowError::Shape(format!(
                "A must be square, got {}x{}",
                a.nrows(),
                a.ncols()
            )));
        }
        if x.len() != sectors {
            return Err(FlowError::Shape(format!(
                "x has {} entries, A has {} sectors",
                x.len(),
                sectors
            )));
        }
        if d.ncols() != sectors {
            return Err(FlowError::Shape(format!(
                "D has {} columns, A has {} sectors",
                d.ncols(),
                sectors
            )));
        }
        if d.nrows() != direct_labels.len() {
            return Err(FlowError::Shape(format!(
                "D has {} rows but {} labels",
                d.nrows(),
                direct_labels.len()
            )));
        }
        if n.ncols() != sectors {
            return Err(FlowError::Shape(format!(
                "N has {} columns, A has {} sectors",
                n.ncols(),
                sectors
            )));
        }
        if n.nrows() != total_labels.len() {
            return Err(FlowError::Shape(format!(
                "N has {} rows but {} labels",
                n.nrows(),
                total_labels.len()
            )));
        }
        if commodities.len() != sectors {
            return Err(FlowError::Shape(format!(
                "commodities metadata has {} rows, A has {} sectors",
                commodities.len(),
                sectors
            )));
        }

        Ok(Self {
            a,
            d,
            n,
            x,
            direct_labels,
            total_labels,
            commodities,
            indicator_names,
        })
    }

    pub fn sector_count(&self) -> usize {
        self.a.nrows()
    }

    /// Row of `d` labelled `label`
    pub fn direct_row(&self, label: &str) -> Option<usize> {
        self.direct_labels.iter().position(|l| l == label)
    }

    /// Row of `n` labelled `label`
    pub fn total_row(&self, label: &str) -> Option<usize> {
        self.total_labels.iter().position(|l| l == label)
    }

    /// Inter-industry dollar flows Z[i,j] = A[i,j]·x[j], raw currency units.
    pub fn dollar_flows(&self) -> DMatrix<f64> {
        let mut z = self.a.clone();
        for (j, mut column) in z.column_iter_mut().enumerate() {
            column *= self.x[j];
        }
        z
    }
}
