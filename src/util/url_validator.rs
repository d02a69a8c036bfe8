use thiserror::Error;
use url::Url;

/// Errors that can occur while validating a launch destination.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL has no host component.
    #[error("URL has no host")]
    MissingHost,
    /// The raw string contained control characters.
    #[error("URL contains control characters")]
    ControlCharacters,
}

/// Validates a catalog destination before it is stored or handed to the OS.
///
/// The destination is passed to the platform opener (`xdg-open`, `open`,
/// `start`), so anything other than a plain http(s) URL is refused:
/// - Non-HTTP(S) schemes (`file://`, `javascript:`, custom handlers)
/// - URLs without a host
/// - Strings carrying control characters
///
/// # Examples
///
/// ```
/// use problembuddy::util::validate_destination;
///
/// let url = validate_destination("https://www.wikipedia.org").unwrap();
/// assert_eq!(url.host_str(), Some("www.wikipedia.org"));
///
/// assert!(validate_destination("file:///etc/passwd").is_err());
/// assert!(validate_destination("javascript:alert(1)").is_err());
/// ```
pub fn validate_destination(url_str: &str) -> Result<Url, UrlValidationError> {
    if url_str.chars().any(char::is_control) {
        return Err(UrlValidationError::ControlCharacters);
    }

    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        assert!(validate_destination("https://www.google.com").is_ok());
        assert!(validate_destination("http://intranet.example:8080/tools").is_ok());
    }

    #[test]
    fn test_invalid_schemes() {
        assert_eq!(
            validate_destination("ftp://example.com"),
            Err(UrlValidationError::UnsupportedScheme("ftp".to_string()))
        );
        assert!(validate_destination("file:///etc/passwd").is_err());
        assert!(validate_destination("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_control_characters_rejected() {
        assert_eq!(
            validate_destination("https://example.com/\n--flag"),
            Err(UrlValidationError::ControlCharacters)
        );
    }

    #[test]
    fn test_unparseable_rejected() {
        assert!(matches!(
            validate_destination("not a url"),
            Err(UrlValidationError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let url = validate_destination("  https://www.bing.com  ").unwrap();
        assert_eq!(url.host_str(), Some("www.bing.com"));
    }
}
