//! Cross-row uniqueness.
//!
//! `unique` is the one constraint a single value cannot check. The tracker
//! remembers the values seen so far for every field declaring it and flags
//! repeats as rows are fed in.

use crate::{FieldError, Value};
use std::collections::HashSet;
use tableschema_core::{ConstraintKind, Schema};
use tracing::debug;

#[derive(Debug, Clone)]
struct Tracked {
    index: usize,
    name: String,
    seen: HashSet<String>,
}

/// Accumulates values of `unique` fields across converted rows.
///
/// # Example
///
/// ```rust
/// use tableschema_cast::{UniqueTracker, Value};
/// use tableschema_core::{FieldBuilder, SchemaBuilder};
///
/// let schema = SchemaBuilder::new()
///     .field(FieldBuilder::new("id", "integer").unique(true).build())
///     .build()
///     .unwrap();
///
/// let mut tracker = UniqueTracker::new(&schema);
/// assert!(tracker.observe(&[Value::Integer(1)]).is_empty());
/// assert_eq!(tracker.observe(&[Value::Integer(1)]).len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct UniqueTracker {
    fields: Vec<Tracked>,
}

impl UniqueTracker {
    /// Creates a tracker for every field of `schema` declaring `unique: true`.
    pub fn new(schema: &Schema) -> Self {
        let fields = schema
            .fields()
            .iter()
            .enumerate()
            .filter(|(_, field)| field.is_unique())
            .map(|(index, field)| Tracked {
                index,
                name: field.name.clone(),
                seen: HashSet::new(),
            })
            .collect();

        Self { fields }
    }

    /// Returns true if any field is tracked.
    pub fn is_tracking(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Records a converted row and reports values already seen.
    ///
    /// Null values are never counted.
    pub fn observe(&mut self, row: &[Value]) -> Vec<FieldError> {
        let mut errors = Vec::new();

        for tracked in &mut self.fields {
            let Some(value) = row.get(tracked.index) else {
                continue;
            };
            if value.is_null() {
                continue;
            }

            if !tracked.seen.insert(value.unique_key()) {
                debug!("Duplicate value {} in field '{}'", value, tracked.name);
                errors.push(FieldError::violation(
                    &tracked.name,
                    ConstraintKind::Unique,
                    "a value not seen in earlier rows",
                    value.to_string(),
                ));
            }
        }

        errors
    }

    /// Forgets every value seen so far.
    pub fn reset(&mut self) {
        for tracked in &mut self.fields {
            tracked.seen.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use tableschema_core::{FieldBuilder, SchemaBuilder};

    fn schema() -> Schema {
        SchemaBuilder::new()
            .field(FieldBuilder::new("id", "number").unique(true).build())
            .field(FieldBuilder::new("name", "string").build())
            .build()
            .unwrap()
    }

    #[test]
    fn test_only_unique_fields_tracked() {
        let mut tracker = UniqueTracker::new(&schema());
        assert!(tracker.is_tracking());

        let row = vec![Value::Number(Decimal::ONE), Value::from("a")];
        assert!(tracker.observe(&row).is_empty());

        let row = vec![Value::Number(Decimal::TWO), Value::from("a")];
        assert!(tracker.observe(&row).is_empty());
    }

    #[test]
    fn test_duplicate_reported() {
        let mut tracker = UniqueTracker::new(&schema());

        tracker.observe(&[Value::Number(Decimal::new(10, 0)), Value::from("a")]);
        let errors = tracker.observe(&[Value::Number(Decimal::new(100, 1)), Value::from("b")]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field(), "id");
        assert_eq!(errors[0].constraint(), Some(ConstraintKind::Unique));
    }

    #[test]
    fn test_nulls_ignored() {
        let mut tracker = UniqueTracker::new(&schema());

        assert!(tracker.observe(&[Value::Null, Value::from("a")]).is_empty());
        assert!(tracker.observe(&[Value::Null, Value::from("b")]).is_empty());
    }

    #[test]
    fn test_reset() {
        let mut tracker = UniqueTracker::new(&schema());
        let row = vec![Value::Number(Decimal::ONE), Value::from("a")];

        tracker.observe(&row);
        tracker.reset();
        assert!(tracker.observe(&row).is_empty());
    }

    #[test]
    fn test_no_unique_fields() {
        let schema = SchemaBuilder::new()
            .field(FieldBuilder::new("name", "string").build())
            .build()
            .unwrap();

        assert!(!UniqueTracker::new(&schema).is_tracking());
    }
}
