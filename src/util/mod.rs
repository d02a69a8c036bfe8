//! Utility functions for common operations.
//!
//! - **URL validation**: launch destinations must be plain http(s) URLs
//! - **Text processing**: Unicode-aware width, truncation and sanitising
//!
//! # Examples
//!
//! ```
//! use problembuddy::util::{display_width, truncate_to_width, validate_destination};
//!
//! let url = validate_destination("https://www.github.com").unwrap();
//! assert_eq!(url.scheme(), "https");
//!
//! assert_eq!(display_width("GitHub"), 6);
//! assert_eq!(truncate_to_width("Google Search", 7), "Google…");
//! ```

mod text;
mod url_validator;

pub use text::{display_width, strip_control_chars, truncate_to_width};
pub use url_validator::{validate_destination, UrlValidationError};

/// Maximum allowed search query length in characters
pub const MAX_SEARCH_QUERY_LENGTH: usize = 256;
