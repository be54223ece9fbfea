//! USEEIO workbook loader
//!
//! Reads the model spreadsheet (xlsx, xls, xlsb or ods) into [`IoTables`].
//! Every failure here is fatal: a run never starts on a partially read model.

pub mod sheet;
pub mod workbook;

pub use eio_core::IoTables;
pub use workbook::{load_workbook, load_workbook_with, SheetNames};
