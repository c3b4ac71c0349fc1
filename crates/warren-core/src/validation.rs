//! Pure input checks run before any mutation of the alias table.

use crate::error::ValidationError;
use crate::shortcode::ShortCode;
use std::borrow::Cow;
use tracing::debug;
use url::Url;

/// Expiry used when the caller leaves it empty.
pub const DEFAULT_EXPIRY_MINUTES: u32 = 30;

/// Exclusive upper bound on expiry: 365 days in minutes.
pub const MAX_EXPIRY_MINUTES: u32 = 365 * 24 * 60;

/// True iff `s` is an absolute http(s) URL with a non-empty host.
pub fn is_valid_url(s: &str) -> bool {
    match Url::parse(s) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

/// Prepends `https://` to inputs that do not parse as a URL on their own.
///
/// Inputs that already parse, or that still fail to parse with the prefix,
/// are returned unchanged; the latter are left for [`is_valid_url`] to reject.
pub fn normalize_url(s: &str) -> Cow<'_, str> {
    if Url::parse(s).is_ok() {
        return Cow::Borrowed(s);
    }

    let fixed = format!("https://{s}");
    if Url::parse(&fixed).is_ok() {
        debug!(url = %fixed, "normalized url by adding https://");
        Cow::Owned(fixed)
    } else {
        Cow::Borrowed(s)
    }
}

/// Empty or absent is valid (the default applies later); anything else must
/// be an integer in `(0, MAX_EXPIRY_MINUTES)`.
pub fn is_valid_expiry_minutes(value: Option<&str>) -> bool {
    parse_expiry_minutes(value).is_ok()
}

/// Parses raw expiry input into minutes, `None` meaning "use the default".
pub fn parse_expiry_minutes(value: Option<&str>) -> Result<Option<u32>, ValidationError> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    let minutes: i64 = raw.parse().map_err(|_| {
        ValidationError::InvalidExpiry(format!("expiry must be a whole number of minutes: '{raw}'"))
    })?;

    let minutes = u32::try_from(minutes)
        .map_err(|_| ValidationError::InvalidExpiry(format!("expiry out of range: {minutes}")))?;

    check_expiry_minutes(minutes).map(Some)
}

/// Bounds check for an already-typed expiry.
pub fn check_expiry_minutes(minutes: u32) -> Result<u32, ValidationError> {
    if minutes == 0 || minutes >= MAX_EXPIRY_MINUTES {
        return Err(ValidationError::InvalidExpiry(format!(
            "expiry must be between 1 and {} minutes, got {}",
            MAX_EXPIRY_MINUTES - 1,
            minutes
        )));
    }
    Ok(minutes)
}

/// Empty or absent is valid (auto-generation path); anything else must match
/// `^[A-Za-z0-9-]{3,32}$`.
pub fn is_valid_shortcode(code: Option<&str>) -> bool {
    match code {
        None | Some("") => true,
        Some(code) => ShortCode::validate(code).is_ok(),
    }
}
