use thiserror;

/// The error produced when a range, a color label or a persisted project
/// document is not acceptable.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid line range [{lo}, {hi}]: lines are 1-indexed and lo <= hi")]
    InvalidRange { lo: u32, hi: u32 },
    #[error("unknown color {0:?}")]
    UnknownColor(String),
    #[error("stored ranges are not sorted, disjoint and non-adjacent")]
    NotCanonical,
    #[error("error parsing project file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("error accessing project file: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
