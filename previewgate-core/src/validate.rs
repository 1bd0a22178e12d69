//! Request validation (§4.6) — pure checks run by the dispatcher before
//! any I/O. Area/page-range shape errors are `InvalidInput` (400);
//! identifier/enum rejections are `Unprocessable` (422), per §7.

use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

use crate::error::{messages, PipelineError};
use crate::model::{AreaSpec, PageRange};

static AREA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+x[0-9]+$").unwrap());

/// Parses a `WxH` string per §3's `AreaSpec` invariant.
pub fn parse_area(raw: &str) -> Result<AreaSpec, PipelineError> {
    if !AREA_RE.is_match(raw) {
        return Err(PipelineError::InvalidInput(
            messages::HEIGHT_OR_WIDTH_NOT_VALID.to_string(),
        ));
    }
    let (w, h) = raw
        .split_once('x')
        .expect("regex guarantees exactly one 'x'");
    let width: u32 = w
        .parse()
        .map_err(|_| PipelineError::InvalidInput(messages::HEIGHT_OR_WIDTH_NOT_VALID.to_string()))?;
    let height: u32 = h
        .parse()
        .map_err(|_| PipelineError::InvalidInput(messages::HEIGHT_OR_WIDTH_NOT_VALID.to_string()))?;
    Ok(AreaSpec { width, height })
}

/// Validates a page range per §3: `first >= 1` and either `last == 0` or
/// `first <= last`.
pub fn parse_page_range(first: u32, last: u32) -> Result<PageRange, PipelineError> {
    if first < 1 {
        return Err(PipelineError::InvalidInput(
            messages::NUMBER_OF_PAGES_NOT_VALID.to_string(),
        ));
    }
    if last != 0 && first > last {
        return Err(PipelineError::InvalidInput(
            messages::NUMBER_OF_PAGES_NOT_VALID.to_string(),
        ));
    }
    Ok(PageRange { first, last })
}

/// Parses any UUID variant, rejecting with `Unprocessable` (422) on
/// failure — distinct from the 400s raised by area/page-range parsing.
pub fn parse_uuid(raw: &str) -> Result<Uuid, PipelineError> {
    Uuid::parse_str(raw).map_err(|_| PipelineError::Unprocessable(messages::ID_NOT_VALID.to_string()))
}

/// Versions are non-negative integers; `u32` already enforces this at the
/// type level once parsed, so this only rejects unparseable input.
pub fn parse_version(raw: &str) -> Result<u32, PipelineError> {
    raw.parse()
        .map_err(|_| PipelineError::Unprocessable(messages::VERSION_NOT_VALID.to_string()))
}

/// Parses a closed-set enum value, mapping any failure to `Unprocessable`
/// (422) per §4.6.
pub fn parse_enum<T: std::str::FromStr<Err = String>>(raw: &str) -> Result<T, PipelineError> {
    raw.parse().map_err(PipelineError::Unprocessable)
}
