//! Single-line level codes for sharing layouts between players.
//!
//! A code is `quest:v1:<cell count>:<base64 payload>` where the payload is
//! the JSON serialization of the layout. The cell count is redundant with
//! the payload and serves as a cheap integrity check before parsing.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use gridquest_core::LevelLayout;
use thiserror::Error;

const CODE_DOMAIN: &str = "quest";
const CODE_VERSION: &str = "v1";
const FIELD_DELIMITER: char = ':';

/// Errors that can occur while decoding a level code.
#[derive(Debug, Error)]
pub(crate) enum LevelCodeError {
    /// The provided string was empty or contained only whitespace.
    #[error("level code was empty")]
    EmptyPayload,
    /// A structural segment was missing from the code.
    #[error("level code is missing the {0} segment")]
    MissingSegment(&'static str),
    /// The code used an unexpected domain prefix.
    #[error("level code prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The code used an unsupported version identifier.
    #[error("level code version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The cell count segment could not be parsed.
    #[error("could not parse cell count '{0}'")]
    InvalidCellCount(String),
    /// The cell count disagrees with the decoded payload.
    #[error("cell count {expected} does not match the payload ({actual})")]
    CellCountMismatch {
        /// Count announced by the code.
        expected: usize,
        /// Count found in the decoded layout.
        actual: usize,
    },
    /// The base64 payload could not be decoded.
    #[error("could not decode level payload: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
    /// The decoded payload could not be deserialised.
    #[error("could not parse level payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

/// Encodes the layout into a single-line string suitable for clipboard
/// transfer.
#[must_use]
pub(crate) fn encode(layout: &LevelLayout) -> String {
    let json = serde_json::to_vec(layout).expect("level layout serialization never fails");
    let payload = STANDARD_NO_PAD.encode(json);
    format!(
        "{CODE_DOMAIN}{FIELD_DELIMITER}{CODE_VERSION}{FIELD_DELIMITER}{}{FIELD_DELIMITER}{payload}",
        layout.cells.len()
    )
}

/// Decodes a layout from the provided level code.
pub(crate) fn decode(value: &str) -> Result<LevelLayout, LevelCodeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LevelCodeError::EmptyPayload);
    }

    let mut parts = trimmed.splitn(4, FIELD_DELIMITER);
    let domain = parts.next().ok_or(LevelCodeError::MissingSegment("prefix"))?;
    let version = parts
        .next()
        .ok_or(LevelCodeError::MissingSegment("version"))?;
    let cell_count = parts
        .next()
        .ok_or(LevelCodeError::MissingSegment("cell count"))?;
    let payload = parts
        .next()
        .ok_or(LevelCodeError::MissingSegment("payload"))?;

    if domain != CODE_DOMAIN {
        return Err(LevelCodeError::InvalidPrefix(domain.to_owned()));
    }
    if version != CODE_VERSION {
        return Err(LevelCodeError::UnsupportedVersion(version.to_owned()));
    }
    let expected: usize = cell_count
        .parse()
        .map_err(|_| LevelCodeError::InvalidCellCount(cell_count.to_owned()))?;

    let bytes = STANDARD_NO_PAD.decode(payload.as_bytes())?;
    let layout: LevelLayout = serde_json::from_slice(&bytes)?;

    if layout.cells.len() != expected {
        return Err(LevelCodeError::CellCountMismatch {
            expected,
            actual: layout.cells.len(),
        });
    }

    Ok(layout)
}
