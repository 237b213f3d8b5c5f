use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not open customer data file: {0}")]
    File(#[from] std::io::Error),
    #[error("could not read customer CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("required column '{0}' is missing")]
    MissingColumn(String),
    #[error("line {line}: column '{column}' has non-numeric value '{value}'")]
    InvalidNumber {
        line: u64,
        column: String,
        value: String,
    },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not write analysis export: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not serialize analysis export: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T, E = LoadError> = std::result::Result<T, E>;
