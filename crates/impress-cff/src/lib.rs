//! Citation File Format (CITATION.cff) support
//!
//! Loading happens in two steps:
//! - [`parse`] turns YAML text into a generic [`ParsedTree`] ([`ParseError`]
//!   on malformed syntax)
//! - [`validate`] checks the tree and builds an immutable [`CitationRecord`]
//!   ([`ValidationError`] listing every offending field path)
//!
//! [`load`] and [`load_str`] run both. [`render`] formats a record as an APA
//! reference or a BibTeX entry.
//!
//! ```no_run
//! use impress_cff::{load, render, RenderFormat};
//!
//! let record = load("CITATION.cff")?;
//! println!("{}", render(&record, RenderFormat::Bibtex));
//! # Ok::<(), impress_cff::CffError>(())
//! ```

pub mod author;
pub mod bibtex;
pub mod config;
pub mod doi;
pub mod error;
pub mod loader;
pub mod record;
pub mod render;
pub mod tree;
pub mod validate;

pub use author::{Author, EntityAuthor, PersonAuthor};
pub use config::{CffConfig, ConfigError, LoaderConfig, RenderConfig};
pub use error::{CffError, ParseError, ValidationError, ValidationIssue, ValidationSeverity};
pub use loader::{load, load_str, Loader};
pub use record::{CitationRecord, CitationType, Identifier, IdentifierType, PreferredCitation};
pub use render::{render, render_with, RenderFormat, RenderOptions};
pub use tree::{parse, ParsedTree};
pub use validate::{validate, validate_with_warnings, Validated};
