//! # Table Schema Core
//!
//! Schema model for the Table Schema casting engine.
//!
//! This crate provides the declarative side of casting: the ordered field
//! definitions of a table, the constraints each field declares, and the
//! type-specific options casters read. It contains no casting logic; see
//! `tableschema_cast` for that.
//!
//! ## Key Concepts
//!
//! - **Schema**: Ordered field definitions plus the raw values treated as missing
//! - **FieldDefinition**: One column's name, type, format, constraints and options
//! - **Constraints**: Declared rules (required, unique, pattern, enum, ranges, lengths)
//!
//! ## Example
//!
//! ```rust
//! use tableschema_core::{FieldBuilder, SchemaBuilder};
//!
//! let schema = SchemaBuilder::new()
//!     .field(FieldBuilder::new("id", "integer").required(true).build())
//!     .field(FieldBuilder::new("height", "number").minimum(0).build())
//!     .field(FieldBuilder::new("name", "string").build())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.required_headers(), vec!["id"]);
//! ```

pub mod builder;
pub mod error;
pub mod field;
pub mod schema;

pub use builder::*;
pub use error::*;
pub use field::*;
pub use schema::*;
