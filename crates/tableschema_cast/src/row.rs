//! Row conversion.
//!
//! A `RowConverter` pairs raw cells with compiled fields by position. Field
//! errors are collected per field and only turned into a `RowError` here,
//! where `ConvertOptions::fail_fast` picks the shape: the first error alone,
//! or every error in field order.

use crate::{ConvertOptions, FieldConverter, FieldError, RowError, TypeRegistry, Value};
use serde_json::Value as JsonValue;
use std::iter::FusedIterator;
use tableschema_core::{Schema, SchemaError};
use tracing::debug;

/// A column a row converter can drive.
pub trait CastField {
    /// Field name, for diagnostics.
    fn name(&self) -> &str;

    /// Converts one raw value, collecting every field error.
    fn convert(&self, raw: &JsonValue) -> Result<Value, Vec<FieldError>>;
}

impl CastField for FieldConverter {
    fn name(&self) -> &str {
        FieldConverter::name(self)
    }

    fn convert(&self, raw: &JsonValue) -> Result<Value, Vec<FieldError>> {
        FieldConverter::convert(self, raw)
    }
}

/// Converts one row against an ordered list of fields.
///
/// The row width is checked before any field is touched. In fail-fast mode
/// no field after the first failing one is evaluated.
pub fn convert_row_with<F: CastField>(
    fields: &[F],
    row: &[JsonValue],
    options: &ConvertOptions,
) -> Result<Vec<Value>, RowError> {
    if row.len() != fields.len() {
        return Err(RowError::conversion(fields.len(), row.len()));
    }

    let mut values = Vec::with_capacity(fields.len());
    let mut errors = Vec::new();

    for (field, raw) in fields.iter().zip(row) {
        match field.convert(raw) {
            Ok(value) => values.push(value),
            Err(field_errors) => {
                if options.fail_fast {
                    if let Some(first) = field_errors.into_iter().next() {
                        debug!("Fail-fast: field '{}' rejected the row", field.name());
                        return Err(RowError::InvalidCast(first));
                    }
                } else {
                    errors.extend(field_errors);
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(RowError::MultipleInvalid(errors))
    }
}

/// Converts raw rows into typed rows for one schema.
///
/// # Example
///
/// ```rust
/// use tableschema_cast::{ConvertOptions, RowConverter, Value};
/// use tableschema_core::{FieldBuilder, SchemaBuilder};
///
/// let schema = SchemaBuilder::new()
///     .field(FieldBuilder::new("id", "integer").build())
///     .field(FieldBuilder::new("name", "string").build())
///     .build()
///     .unwrap();
///
/// let converter = RowConverter::new(&schema).unwrap();
/// let row = converter.convert_row(["1", "alice"], &ConvertOptions::new()).unwrap();
///
/// assert_eq!(row, vec![Value::Integer(1), Value::from("alice")]);
/// ```
#[derive(Debug, Clone)]
pub struct RowConverter {
    fields: Vec<FieldConverter>,
}

impl RowConverter {
    /// Compiles every field of the schema with the built-in types.
    pub fn new(schema: &Schema) -> Result<Self, SchemaError> {
        Self::with_registry(schema, &TypeRegistry::new())
    }

    /// Compiles every field of the schema, resolving types through `registry`.
    pub fn with_registry(schema: &Schema, registry: &TypeRegistry) -> Result<Self, SchemaError> {
        let fields = schema
            .fields()
            .iter()
            .map(|field| FieldConverter::with_registry(field, schema.missing_values(), registry))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Compiled schema with {} field(s)", fields.len());
        Ok(Self { fields })
    }

    /// Returns the compiled fields in column order.
    pub fn fields(&self) -> &[FieldConverter] {
        &self.fields
    }

    /// Converts a single row.
    pub fn convert_row<I>(&self, row: I, options: &ConvertOptions) -> Result<Vec<Value>, RowError>
    where
        I: IntoIterator,
        I::Item: Into<JsonValue>,
    {
        let row: Vec<JsonValue> = row.into_iter().map(Into::into).collect();
        convert_row_with(&self.fields, &row, options)
    }

    /// Converts rows lazily, one per call to `next`.
    ///
    /// In fail-fast mode the iterator ends after yielding the first failed
    /// row; otherwise every row is converted independently.
    pub fn convert<I>(&self, rows: I, options: &ConvertOptions) -> Rows<'_, I::IntoIter>
    where
        I: IntoIterator,
    {
        Rows {
            converter: self,
            rows: rows.into_iter(),
            options: *options,
            index: 0,
            halted: false,
        }
    }
}

/// Lazy iterator over converted rows. See [`RowConverter::convert`].
#[derive(Debug)]
pub struct Rows<'a, I> {
    converter: &'a RowConverter,
    rows: I,
    options: ConvertOptions,
    index: usize,
    halted: bool,
}

impl<I, R> Iterator for Rows<'_, I>
where
    I: Iterator<Item = R>,
    R: IntoIterator,
    R::Item: Into<JsonValue>,
{
    type Item = Result<Vec<Value>, RowError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }

        let Some(row) = self.rows.next() else {
            self.halted = true;
            return None;
        };

        let index = self.index;
        self.index += 1;

        let result = self.converter.convert_row(row, &self.options);
        if let Err(err) = &result {
            debug!("Row {} rejected with {} error(s)", index, err.errors().len());
            if self.options.fail_fast {
                debug!("Fail-fast: stopping after row {}", index);
                self.halted = true;
            }
        }

        Some(result)
    }
}

impl<I, R> FusedIterator for Rows<'_, I>
where
    I: Iterator<Item = R>,
    R: IntoIterator,
    R::Item: Into<JsonValue>,
{
}
