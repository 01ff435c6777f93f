//! Field validation for bucket addresses.
//!
//! Validators are pure and return a [`ValidationResult`] rather than an
//! error, so form layers can render warnings next to a field while setters
//! only abort on [`ValidationResult::Error`].

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use url::Url;

pub const ENDPOINT_MALFORMED: &str = "The provided endpoint does not seem valid: malformed";
pub const ENDPOINT_WRONG_SYNTAX: &str = "The provided endpoint does not seem valid: wrong syntax";
pub const CONTAINER_EMPTY: &str = "The container name cannot be empty";
pub const CONTAINER_INVALID: &str = "The S3 Bucket name does not match S3 bucket rules";
pub const PREFIX_ROOT: &str = "Artifacts will be stored in the root folder of the S3 Bucket.";
pub const PREFIX_NO_SLASH: &str = "A prefix must end with a slash.";

/// Validated configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Endpoint,
    Container,
    Prefix,
    DeleteArtifacts,
    DeleteStashes,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Endpoint => "endpoint",
            Field::Container => "container",
            Field::Prefix => "prefix",
            Field::DeleteArtifacts => "delete_artifacts",
            Field::DeleteStashes => "delete_stashes",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of validating a single value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum ValidationResult {
    /// Valid, optionally with an informational message.
    Ok(Option<String>),
    /// Acceptable, but worth pointing out.
    Warning(String),
    /// Invalid; mutations carrying this value must be rejected.
    Error(String),
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self::Ok(None)
    }

    pub fn ok_with(message: impl Into<String>) -> Self {
        Self::Ok(Some(message.into()))
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::Warning(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Warning(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Ok(message) => message.as_deref(),
            Self::Warning(message) | Self::Error(message) => Some(message),
        }
    }

    /// Turn an `Error` into a [`ValidationError`] for `field`.
    pub fn into_result(self, field: Field) -> Result<(), ValidationError> {
        match self {
            Self::Error(message) => Err(ValidationError { field, message }),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok(None) => f.write_str("OK"),
            Self::Ok(Some(message)) => write!(f, "OK: {}", message),
            Self::Warning(message) => write!(f, "WARNING: {}", message),
            Self::Error(message) => write!(f, "ERROR: {}", message),
        }
    }
}

/// A value was rejected by its validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field}: {message}")]
pub struct ValidationError {
    /// Field that was rejected.
    pub field: Field,
    /// Validator message.
    pub message: String,
}

/// Check that `endpoint` is an absolute http(s) URL that is also a valid URI.
///
/// An unknown scheme is malformed. A known scheme followed by characters a
/// strict URI parser refuses is wrong syntax, even where `Url::parse` would
/// escape them or give up on the host.
pub fn validate_endpoint(endpoint: &str) -> ValidationResult {
    let has_web_scheme = endpoint.split_once(':').is_some_and(|(scheme, _)| {
        scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
    });
    if !has_web_scheme {
        return ValidationResult::error(ENDPOINT_MALFORMED);
    }

    if !is_uri_syntax(endpoint) {
        return ValidationResult::error(ENDPOINT_WRONG_SYNTAX);
    }

    match Url::parse(endpoint) {
        Ok(url) if url.host_str().is_some_and(|host| !host.is_empty()) => ValidationResult::ok(),
        _ => ValidationResult::error(ENDPOINT_MALFORMED),
    }
}

/// Check a bucket name against the S3 naming rules.
pub fn validate_container(container: &str) -> ValidationResult {
    if container.trim().is_empty() {
        ValidationResult::warning(CONTAINER_EMPTY)
    } else if !is_valid_bucket_name(container) {
        ValidationResult::error(CONTAINER_INVALID)
    } else {
        ValidationResult::ok()
    }
}

/// Check that a non-blank prefix ends with a slash.
pub fn validate_prefix(prefix: &str) -> ValidationResult {
    if prefix.trim().is_empty() {
        ValidationResult::warning(PREFIX_ROOT)
    } else if prefix.ends_with('/') {
        ValidationResult::ok()
    } else {
        ValidationResult::error(PREFIX_NO_SLASH)
    }
}

/// Bucket naming grammar.
///
/// Equivalent to
/// `^([a-z]|(\d(?!\d{0,2}\.\d{1,3}\.\d{1,3}\.\d{1,3})))([a-z\d]|(\.(?!(\.|-)))|(-(?!\.))){1,61}[a-z\d\.]$`.
pub fn is_valid_bucket_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    let len = bytes.len();
    if !(3..=63).contains(&len) {
        return false;
    }

    let first = bytes[0];
    if first.is_ascii_digit() {
        if starts_like_ipv4(bytes) {
            return false;
        }
    } else if !first.is_ascii_lowercase() {
        return false;
    }

    for i in 1..len - 1 {
        let next = bytes[i + 1];
        let allowed = match bytes[i] {
            b'a'..=b'z' | b'0'..=b'9' => true,
            b'.' => next != b'.' && next != b'-',
            b'-' => next != b'.',
            _ => false,
        };
        if !allowed {
            return false;
        }
    }

    matches!(bytes[len - 1], b'a'..=b'z' | b'0'..=b'9' | b'.')
}

/// `d{1,3}.d{1,3}.d{1,3}.d` at the start of `bytes`.
fn starts_like_ipv4(bytes: &[u8]) -> bool {
    let mut pos = 0;
    for _ in 0..3 {
        let digits = bytes[pos..].iter().take_while(|b| b.is_ascii_digit()).count();
        if !(1..=3).contains(&digits) || bytes.get(pos + digits) != Some(&b'.') {
            return false;
        }
        pos += digits + 1;
    }
    bytes.get(pos).is_some_and(u8::is_ascii_digit)
}

/// Every character is legal in an RFC 3986 URI reference and every `%`
/// starts a complete escape.
fn is_uri_syntax(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let escaped = bytes.get(i + 1..i + 3);
                if !escaped.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                    return false;
                }
                i += 3;
                continue;
            }
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => {}
            b'-' | b'.' | b'_' | b'~' => {}
            b':' | b'/' | b'?' | b'#' | b'[' | b']' | b'@' => {}
            b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'=' => {}
            _ => return false,
        }
        i += 1;
    }
    true
}

/// Shorten `message` to at most `max` characters, ending in `...` when cut.
pub fn abbreviate(message: &str, max: usize) -> String {
    if message.chars().count() <= max {
        return message.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = message.chars().take(keep).collect();
    out.push_str("...");
    out
}
