//! # Table Schema Cast
//!
//! Casting engine for Table Schema rows. This crate turns raw cells into
//! typed values and checks them against the constraints a schema declares:
//!
//! - Type casters for every Table Schema type, resolved through a registry
//! - Constraint validation (required, pattern, enum, ranges, lengths)
//! - Row conversion with fail-fast or collect-all error reporting
//! - Lazy conversion of many rows
//! - Cross-row uniqueness tracking
//!
//! ## Example
//!
//! ```rust
//! use tableschema_cast::{ConvertOptions, RowConverter, RowError, Value};
//! use tableschema_core::{FieldBuilder, SchemaBuilder};
//!
//! let schema = SchemaBuilder::new()
//!     .field(FieldBuilder::new("id", "integer").required(true).build())
//!     .field(FieldBuilder::new("height", "number").minimum(0).build())
//!     .build()
//!     .unwrap();
//!
//! let converter = RowConverter::new(&schema).unwrap();
//! let options = ConvertOptions::new();
//!
//! let row = converter.convert_row(["1", "-"], &options).unwrap();
//! assert_eq!(row, vec![Value::Integer(1), Value::Null]);
//!
//! match converter.convert_row(["", "-5"], &options) {
//!     Err(RowError::MultipleInvalid(errors)) => assert_eq!(errors.len(), 2),
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! ```

mod constraints;
mod error;
mod field;
mod options;
mod registry;
mod row;
pub mod types;
mod unique;
mod value;

pub use constraints::*;
pub use error::*;
pub use field::*;
pub use options::*;
pub use registry::*;
pub use row::*;
pub use types::{Cast, CastFailure, CastResult, TypeCaster};
pub use unique::*;
pub use value::*;
