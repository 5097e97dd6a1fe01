//! ICU MessageFormat validation.
//!
//! Uploaded files are flat JSON objects mapping message keys to ICU messages.
//! Every message must parse before the file is accepted for translation.
//!
//! # Architecture
//!
//! - `parser`: syntax checker for a single ICU message, producing an AST
//! - `file`: fail-fast validation of a whole message file
//!
//! # Example
//!
//! ```rust
//! use icu_translate_bot::icu::{parse, validate_messages_file};
//!
//! assert!(parse("Hello {name}").is_ok());
//! assert!(parse("Hello {name").is_err());
//!
//! let count = validate_messages_file(r#"{"greeting": "Hello {name}"}"#).unwrap();
//! assert_eq!(count, 1);
//! ```

mod file;
mod parser;

pub use file::{validate_messages_file, validate_messages_file_with, MessageFileError};
pub use parser::{parse, Branch, Element, FormatKind, IcuError, IcuErrorKind, MAX_NESTING_DEPTH};
