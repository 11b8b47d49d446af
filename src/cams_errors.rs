use camino::Utf8PathBuf;
use thiserror::Error;

use crate::stations::StationId;

#[derive(Error, Debug)]
pub enum CamsError {
    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("File {path} ends inside its {expected}-line header")]
    TruncatedHeader { path: Utf8PathBuf, expected: usize },

    #[error("Error during the station catalog parsing ({path}, line {line_number}): {line}")]
    CatalogParsing {
        path: Utf8PathBuf,
        line_number: usize,
        line: String,
    },

    #[error("Invalid numeric value for {field}: {token:?}")]
    InvalidNumericField { field: &'static str, token: String },

    #[error("Missing field {field} on line {line_number}: {line}")]
    MissingField {
        field: &'static str,
        line_number: usize,
        line: String,
    },

    #[error("Frame time goes backwards on line {line_number}: {line}")]
    NonMonotonicTime { line_number: usize, line: String },

    #[error("Invalid FF bin name: {0}")]
    InvalidBinName(String),

    #[error("Invalid calendar timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("No info for station {0} found in the camera sites catalog")]
    UnknownStation(StationId),

    #[error("Time offset for station {0} not found")]
    MissingTimeOffset(StationId),

    #[error("No such solver: {0}")]
    UnknownSolver(String),

    #[error("Invalid solver parameter: {0}")]
    InvalidSolverParameter(String),

    #[error("Trajectory solver failed: {0}")]
    SolverFailure(String),

    #[error("The solver has no modeled range for observation {0}")]
    MissingModelRange(usize),
}

impl PartialEq for CamsError {
    fn eq(&self, other: &Self) -> bool {
        use CamsError::*;
        match (self, other) {
            // I/O errors are not comparable: equal if same variant
            (IoError(_), IoError(_)) => true,

            (
                TruncatedHeader {
                    path: a,
                    expected: ea,
                },
                TruncatedHeader {
                    path: b,
                    expected: eb,
                },
            ) => a == b && ea == eb,
            (
                CatalogParsing {
                    path: pa,
                    line_number: na,
                    line: la,
                },
                CatalogParsing {
                    path: pb,
                    line_number: nb,
                    line: lb,
                },
            ) => pa == pb && na == nb && la == lb,
            (
                InvalidNumericField {
                    field: fa,
                    token: ta,
                },
                InvalidNumericField {
                    field: fb,
                    token: tb,
                },
            ) => fa == fb && ta == tb,
            (
                MissingField {
                    field: fa,
                    line_number: na,
                    ..
                },
                MissingField {
                    field: fb,
                    line_number: nb,
                    ..
                },
            ) => fa == fb && na == nb,
            (
                NonMonotonicTime {
                    line_number: na, ..
                },
                NonMonotonicTime {
                    line_number: nb, ..
                },
            ) => na == nb,
            (InvalidBinName(a), InvalidBinName(b)) => a == b,
            (InvalidTimestamp(a), InvalidTimestamp(b)) => a == b,
            (UnknownStation(a), UnknownStation(b)) => a == b,
            (MissingTimeOffset(a), MissingTimeOffset(b)) => a == b,
            (UnknownSolver(a), UnknownSolver(b)) => a == b,
            (InvalidSolverParameter(a), InvalidSolverParameter(b)) => a == b,
            (SolverFailure(a), SolverFailure(b)) => a == b,
            (MissingModelRange(a), MissingModelRange(b)) => a == b,

            _ => false,
        }
    }
}

/// Parse a numeric token, tagging the failure with the field it was read for.
pub(crate) fn parse_number<T: std::str::FromStr>(
    token: &str,
    field: &'static str,
) -> Result<T, CamsError> {
    token
        .trim()
        .parse::<T>()
        .map_err(|_| CamsError::InvalidNumericField {
            field,
            token: token.to_string(),
        })
}
