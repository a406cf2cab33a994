//! Structured output: JSON mode selection and reply validation/extraction.
//!
//! - [`JsonMode`]: the `response_format` requested from the backend
//! - [`ResponseValidator`]: parses a raw reply and checks required fields
//! - [`ExtractedRecord`]: the all-or-nothing result of a successful extraction
//!
//! # Examples
//!
//! ```
//! use session_scribe::catalog::CHARACTER_SCHEMA;
//! use session_scribe::structured::ResponseValidator;
//!
//! let raw = r#"{"character_name":"Bram","physical_description":"tall","personality":"dour","mood":"wet"}"#;
//! let record = ResponseValidator::new().extract(raw, &CHARACTER_SCHEMA).unwrap();
//!
//! assert_eq!(record.get("character_name"), Some("Bram"));
//! assert_eq!(record.get("mood"), None);
//! ```

pub mod json_mode;
pub mod record;
pub mod validator;

pub use json_mode::JsonMode;
pub use record::ExtractedRecord;
pub use validator::ResponseValidator;
