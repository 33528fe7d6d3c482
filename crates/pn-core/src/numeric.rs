use crate::{CoreError, CoreResult};

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> CoreResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> CoreResult<Real> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(CoreError::NotPositive { what, value: v })
    }
}

/// Percentage of `part` in `whole`, 0 when `whole` is zero.
pub fn percent_of(part: u32, whole: u32) -> Real {
    if whole == 0 {
        0.0
    } else {
        Real::from(part) / Real::from(whole) * 100.0
    }
}

/// Validate an operator-supplied record name.
///
/// Names are stored between `|` separators, one record per line, so neither
/// may appear inside them.
pub fn validate_name(name: &str) -> CoreResult<String> {
    let trimmed = name.trim();
    let reason = if trimmed.is_empty() {
        Some("name must not be empty")
    } else if trimmed.contains('|') {
        Some("name must not contain '|'")
    } else if trimmed.contains(['\n', '\r']) {
        Some("name must be a single line")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(CoreError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(trimmed.to_string()),
    }
}
