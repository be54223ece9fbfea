pub mod error;
pub mod indicators;
pub mod tables;
pub mod types;

pub use error::*;
pub use indicators::*;
pub use tables::*;
pub use types::*;
