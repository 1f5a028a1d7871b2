//! Build schema.org structured data and render it as HTML microdata or JSON-LD.
//!
//! A [`Schema`] is a typed node holding an ordered list of properties whose
//! values are scalars or nested schemas. Once a tree is built, an
//! [`Outputter`] turns it into one of the two wire formats.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`schema`] | The [`Schema`] node and its validated mutators |
//! | [`value`] | [`PropertyValue`], the closed set of property kinds |
//! | [`error`] | [`SchemaError`] and its [`ErrorKind`] taxonomy |
//! | [`outputter`] | The [`Outputter`] contract shared by every renderer |
//! | [`microdata`] | [`MicrodataOutputter`]: `itemscope`/`itemtype`/`itemprop` markup |
//! | [`jsonld`] | [`JsonLdOutputter`] and JSON-LD parsing back into a [`Schema`] |
//!
//! # Quick start
//!
//! ```rust
//! use schemabuilder::Schema;
//!
//! let mut person = Schema::new("Person")?;
//! person.add_property("name", "Ada Lovelace")?;
//!
//! assert_eq!(
//!     person.get_microdata("", "", &[]),
//!     r#"<div itemscope itemtype="http://schema.org/Person"><span itemprop="name">Ada Lovelace</span></div>"#
//! );
//! assert_eq!(person.get_json_ld(), r#"{"@type":"Person","name":"Ada Lovelace"}"#);
//! # Ok::<(), schemabuilder::SchemaError>(())
//! ```

pub mod error;
pub mod escape;
pub mod jsonld;
pub mod microdata;
pub mod outputter;
pub mod schema;
pub mod value;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{ErrorKind, SchemaError};
pub use jsonld::JsonLdOutputter;
pub use microdata::{MicrodataOutputter, WrapperAttribute};
pub use outputter::Outputter;
pub use schema::{Schema, SCHEMA_BASE_URL};
pub use value::PropertyValue;
