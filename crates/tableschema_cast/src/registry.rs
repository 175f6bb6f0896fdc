//! Type registry.
//!
//! Maps the type names a schema may declare to caster constructors. The
//! built-in table covers every Table Schema type; `register` can add aliases
//! or override an entry before schemas are compiled.

use crate::types::{
    AnyType, ArrayType, BooleanType, DateTimeType, DateType, DurationType, GeoJsonType,
    GeoPointType, IntegerType, NumberType, ObjectType, StringType, TimeType, TypeCaster,
    YearMonthType, YearType,
};
use std::collections::BTreeMap;
use tableschema_core::{FieldDefinition, SchemaError};

/// Builds a caster for one field, checking its format and options.
pub type CasterConstructor = fn(&FieldDefinition) -> Result<TypeCaster, SchemaError>;

/// Lookup table from type name to caster constructor.
///
/// # Example
///
/// ```rust
/// use tableschema_cast::{Cast, TypeRegistry};
/// use tableschema_core::FieldBuilder;
///
/// let registry = TypeRegistry::new();
/// let field = FieldBuilder::new("born", "date").format("%d/%m/%Y").build();
///
/// let caster = registry.build(&field).unwrap();
/// assert_eq!(caster.name(), "date");
/// ```
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    constructors: BTreeMap<String, CasterConstructor>,
}

impl TypeRegistry {
    /// Creates a registry holding every built-in type.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("any", |f| AnyType::new(f).map(TypeCaster::Any));
        registry.register("array", |f| ArrayType::new(f).map(TypeCaster::Array));
        registry.register("boolean", |f| BooleanType::new(f).map(TypeCaster::Boolean));
        registry.register("date", |f| DateType::new(f).map(TypeCaster::Date));
        registry.register("datetime", |f| DateTimeType::new(f).map(TypeCaster::DateTime));
        registry.register("duration", |f| DurationType::new(f).map(TypeCaster::Duration));
        registry.register("geojson", |f| GeoJsonType::new(f).map(TypeCaster::GeoJson));
        registry.register("geopoint", |f| GeoPointType::new(f).map(TypeCaster::GeoPoint));
        registry.register("integer", |f| IntegerType::new(f).map(TypeCaster::Integer));
        registry.register("number", |f| NumberType::new(f).map(TypeCaster::Number));
        registry.register("object", |f| ObjectType::new(f).map(TypeCaster::Object));
        registry.register("string", |f| StringType::new(f).map(TypeCaster::String));
        registry.register("time", |f| TimeType::new(f).map(TypeCaster::Time));
        registry.register("year", |f| YearType::new(f).map(TypeCaster::Year));
        registry.register("yearmonth", |f| YearMonthType::new(f).map(TypeCaster::YearMonth));
        registry
    }

    /// Creates a registry with no types.
    pub fn empty() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// Registers (or replaces) the constructor for a type name.
    pub fn register(&mut self, type_name: impl Into<String>, constructor: CasterConstructor) {
        self.constructors.insert(type_name.into(), constructor);
    }

    /// Looks up the constructor for a type name.
    pub fn resolve(&self, type_name: &str) -> Option<CasterConstructor> {
        self.constructors.get(type_name).copied()
    }

    /// Builds the caster for a field from its declared type and format.
    ///
    /// Fails with `UnknownType` if the type is not registered and with
    /// `UnknownFormat` if the type does not recognize the field's format.
    pub fn build(&self, field: &FieldDefinition) -> Result<TypeCaster, SchemaError> {
        let constructor = self
            .resolve(&field.field_type)
            .ok_or_else(|| SchemaError::unknown_type(&field.name, &field.field_type))?;
        constructor(field)
    }

    /// Returns the registered type names in sorted order.
    pub fn type_names(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cast, Value};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tableschema_core::FieldBuilder;

    #[test]
    fn test_builtin_types() {
        let registry = TypeRegistry::new();

        assert_eq!(
            registry.type_names(),
            vec![
                "any", "array", "boolean", "date", "datetime", "duration", "geojson",
                "geopoint", "integer", "number", "object", "string", "time", "year",
                "yearmonth",
            ]
        );
    }

    #[test]
    fn test_every_builtin_builds_with_default_format() {
        let registry = TypeRegistry::new();

        for name in registry.type_names() {
            let field = FieldBuilder::new("f", name).build();
            let caster = registry.build(&field).unwrap();
            assert_eq!(caster.name(), name);
        }
    }

    #[test]
    fn test_unknown_type() {
        let registry = TypeRegistry::new();
        let field = FieldBuilder::new("f", "decimal128").build();

        assert!(matches!(
            registry.build(&field),
            Err(SchemaError::UnknownType { type_name, .. }) if type_name == "decimal128"
        ));
    }

    #[test]
    fn test_unknown_format() {
        let registry = TypeRegistry::new();
        let field = FieldBuilder::new("f", "string").format("ipv4").build();

        assert!(matches!(
            registry.build(&field),
            Err(SchemaError::UnknownFormat { .. })
        ));
    }

    #[test]
    fn test_register_alias() {
        let mut registry = TypeRegistry::new();
        registry.register("int", |f| IntegerType::new(f).map(TypeCaster::Integer));

        let field = FieldBuilder::new("f", "int").build();
        let caster = registry.build(&field).unwrap();

        assert_eq!(caster.name(), "integer");
        assert_eq!(caster.cast(&json!("12")), Ok(Value::Integer(12)));
    }

    #[test]
    fn test_empty_registry() {
        let registry = TypeRegistry::empty();
        assert!(registry.resolve("string").is_none());
    }
}
