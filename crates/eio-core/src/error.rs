use thiserror::Error;

/// Fatal failures. Any of these aborts the run before output is written.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Failed to load {source_name}: {message}")]
    InputLoad { source_name: String, message: String },

    #[error("Inconsistent table shape: {0}")]
    Shape(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FlowError {
    pub fn input_load(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InputLoad {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}

pub type FlowResult<T> = Result<T, FlowError>;

/// Non-fatal conditions raised while building the document.
///
/// These never stop the run. They are logged where they occur and handed
/// back to the caller alongside the document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Diagnostic {
    #[error("{indicator} not found in D matrix; indicator skipped")]
    MissingIndicatorInDirectTable { indicator: String },

    #[error("{indicator} not found in N matrix; using D as total multiplier")]
    MissingIndicatorInMultiplierTable { indicator: String },

    #[error("{indicator}: sector {sector} accounts out of balance by {residual:e}")]
    AccountImbalance {
        indicator: String,
        sector: usize,
        residual: f64,
    },
}
