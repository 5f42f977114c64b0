//! Parsing of user-typed form fields.
//!
//! Weight accepts both `.` and `,` as the decimal separator (`"82,5"` and
//! `"82.5"` are the same load). Anything that does not parse to a finite
//! number is rejected.

/// Parse a weight field. Returns `None` for blank, malformed, or non-finite input.
#[must_use]
pub fn parse_weight(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse an optional reps field.
///
/// Blank text means "no reps recorded". Text that is not a positive integer
/// is treated the same way rather than rejecting the whole entry.
#[must_use]
pub fn parse_reps(text: &str) -> Option<u32> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<u32>().ok().filter(|reps| *reps > 0)
}

/// Whether a required text field carries content.
#[must_use]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
