//! URL validation for submitted links
//!
//! A submitted URL must be absolute, carry one of the allowed schemes and
//! name a host. Script-like schemes are rejected outright.

use url::Url;

/// Longest URL accepted (matches the `original_url` column width)
pub const MAX_URL_LEN: usize = 2048;

#[derive(Debug, PartialEq, Eq)]
pub enum UrlValidationError {
    EmptyUrl,
    TooLong(usize),
    DangerousProtocol(String),
    InvalidProtocol(String),
    MissingHost,
    ControlCharacter,
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::TooLong(len) => write!(
                f,
                "URL is {} characters long, the limit is {}",
                len, MAX_URL_LEN
            ),
            Self::DangerousProtocol(proto) => write!(f, "Dangerous protocol blocked: {}", proto),
            Self::InvalidProtocol(proto) => write!(
                f,
                "Invalid protocol: {}. Allowed: http, https, ftp, ftps",
                proto
            ),
            Self::MissingHost => write!(f, "URL must include a host"),
            Self::ControlCharacter => write!(f, "URL must not contain control characters"),
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

const DANGEROUS_PROTOCOLS: &[&str] = &["javascript", "data", "file", "vbscript", "about", "blob"];

const ALLOWED_PROTOCOLS: &[&str] = &["http", "https", "ftp", "ftps"];

/// Validate a URL submitted for shortening
pub fn validate_url(url: &str) -> Result<(), UrlValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    let len = url.chars().count();
    if len > MAX_URL_LEN {
        return Err(UrlValidationError::TooLong(len));
    }

    // Url::parse drops tabs and newlines that the stored text would keep
    if url.chars().any(char::is_control) {
        return Err(UrlValidationError::ControlCharacter);
    }

    let parsed = Url::parse(url).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    // Url lowercases the scheme during parsing
    let scheme = parsed.scheme();
    if DANGEROUS_PROTOCOLS.contains(&scheme) {
        return Err(UrlValidationError::DangerousProtocol(format!("{}:", scheme)));
    }
    if !ALLOWED_PROTOCOLS.contains(&scheme) {
        return Err(UrlValidationError::InvalidProtocol(format!("{}:", scheme)));
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}
