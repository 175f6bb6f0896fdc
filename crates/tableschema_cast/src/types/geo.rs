//! Geographic casting.
//!
//! Geopoints come in three shapes selected by format: `"lon, lat"` text,
//! a `[lon, lat]` pair, or a `{"lon": .., "lat": ..}` mapping. GeoJSON is
//! checked structurally: a known `type` plus the member that type requires.

use super::{BASE_CONSTRAINTS, Cast, CastFailure, CastResult, not_a};
use crate::{GeoPoint, Value};
use serde_json::{Map, Value as JsonValue};
use tableschema_core::{ConstraintKind, FieldDefinition, SchemaError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GeoPointFormat {
    Default,
    Array,
    Object,
}

/// Casts longitude/latitude pairs.
#[derive(Debug, Clone)]
pub struct GeoPointType {
    format: GeoPointFormat,
}

impl GeoPointType {
    pub fn new(field: &FieldDefinition) -> Result<Self, SchemaError> {
        let format = match field.format.as_str() {
            "default" => GeoPointFormat::Default,
            "array" => GeoPointFormat::Array,
            "object" => GeoPointFormat::Object,
            other => return Err(SchemaError::unknown_format(&field.name, "geopoint", other)),
        };
        Ok(Self { format })
    }

    fn coordinates(&self, raw: &JsonValue) -> Option<(f64, f64)> {
        match (self.format, raw) {
            (GeoPointFormat::Default, JsonValue::String(text)) => {
                let (lon, lat) = text.split_once(',')?;
                Some((lon.trim().parse().ok()?, lat.trim().parse().ok()?))
            }
            (GeoPointFormat::Array, JsonValue::Array(pair)) if pair.len() == 2 => {
                Some((pair[0].as_f64()?, pair[1].as_f64()?))
            }
            (GeoPointFormat::Object, JsonValue::Object(map)) if map.len() == 2 => {
                Some((map.get("lon")?.as_f64()?, map.get("lat")?.as_f64()?))
            }
            _ => None,
        }
    }
}

impl Cast for GeoPointType {
    fn name(&self) -> &'static str {
        "geopoint"
    }

    fn supported_constraints(&self) -> &'static [ConstraintKind] {
        BASE_CONSTRAINTS
    }

    fn cast(&self, raw: &JsonValue) -> CastResult {
        let (lon, lat) = self
            .coordinates(raw)
            .ok_or_else(|| not_a(raw, self.name()))?;

        if !(-180.0..=180.0).contains(&lon) {
            return Err(CastFailure::new(format!("longitude {lon} is out of range")));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CastFailure::new(format!("latitude {lat} is out of range")));
        }

        Ok(Value::GeoPoint(GeoPoint { lon, lat }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GeoJsonFormat {
    Default,
    TopoJson,
}

/// Casts GeoJSON (or TopoJSON) objects.
#[derive(Debug, Clone)]
pub struct GeoJsonType {
    format: GeoJsonFormat,
}

impl GeoJsonType {
    pub fn new(field: &FieldDefinition) -> Result<Self, SchemaError> {
        let format = match field.format.as_str() {
            "default" => GeoJsonFormat::Default,
            "topojson" => GeoJsonFormat::TopoJson,
            other => return Err(SchemaError::unknown_format(&field.name, "geojson", other)),
        };
        Ok(Self { format })
    }

    fn check_geojson(map: &Map<String, JsonValue>) -> Result<(), String> {
        let kind = map
            .get("type")
            .and_then(JsonValue::as_str)
            .ok_or("missing 'type' member")?;

        let has_array = |member: &str| map.get(member).is_some_and(JsonValue::is_array);

        let (member, valid) = match kind {
            "Point" | "MultiPoint" | "LineString" | "MultiLineString" | "Polygon"
            | "MultiPolygon" => ("coordinates", has_array("coordinates")),
            "GeometryCollection" => ("geometries", has_array("geometries")),
            "Feature" => (
                "geometry",
                map.get("geometry")
                    .is_some_and(|g| g.is_object() || g.is_null()),
            ),
            "FeatureCollection" => ("features", has_array("features")),
            other => return Err(format!("unknown GeoJSON type '{other}'")),
        };

        if valid {
            Ok(())
        } else {
            Err(format!("{kind} requires a valid '{member}' member"))
        }
    }

    fn check_topojson(map: &Map<String, JsonValue>) -> Result<(), String> {
        if map.get("type").and_then(JsonValue::as_str) != Some("Topology") {
            return Err("TopoJSON type must be 'Topology'".to_string());
        }
        if !map.get("objects").is_some_and(JsonValue::is_object) {
            return Err("Topology requires an 'objects' member".to_string());
        }
        Ok(())
    }
}

impl Cast for GeoJsonType {
    fn name(&self) -> &'static str {
        "geojson"
    }

    fn supported_constraints(&self) -> &'static [ConstraintKind] {
        BASE_CONSTRAINTS
    }

    fn cast(&self, raw: &JsonValue) -> CastResult {
        let JsonValue::Object(map) = raw else {
            return Err(not_a(raw, self.name()));
        };

        let checked = match self.format {
            GeoJsonFormat::Default => Self::check_geojson(map),
            GeoJsonFormat::TopoJson => Self::check_topojson(map),
        };

        checked
            .map(|()| Value::GeoJson(raw.clone()))
            .map_err(CastFailure::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tableschema_core::FieldBuilder;

    fn geopoint(format: &str) -> GeoPointType {
        GeoPointType::new(&FieldBuilder::new("p", "geopoint").format(format).build()).unwrap()
    }

    fn geojson(format: &str) -> GeoJsonType {
        GeoJsonType::new(&FieldBuilder::new("g", "geojson").format(format).build()).unwrap()
    }

    #[test]
    fn test_geopoint_default() {
        let expected = Value::GeoPoint(GeoPoint { lon: 90.0, lat: 45.5 });

        assert_eq!(geopoint("default").cast(&json!("90, 45.5")), Ok(expected));
        assert!(geopoint("default").cast(&json!("90")).is_err());
        assert!(geopoint("default").cast(&json!([90, 45])).is_err());
    }

    #[test]
    fn test_geopoint_array() {
        let expected = Value::GeoPoint(GeoPoint { lon: 90.0, lat: 45.0 });

        assert_eq!(geopoint("array").cast(&json!([90, 45])), Ok(expected));
        assert!(geopoint("array").cast(&json!([90, 45, 1])).is_err());
        assert!(geopoint("array").cast(&json!(["90", "45"])).is_err());
    }

    #[test]
    fn test_geopoint_object() {
        let expected = Value::GeoPoint(GeoPoint { lon: -10.0, lat: 5.0 });

        assert_eq!(
            geopoint("object").cast(&json!({"lon": -10, "lat": 5})),
            Ok(expected)
        );
        assert!(geopoint("object").cast(&json!({"lon": -10})).is_err());
    }

    #[test]
    fn test_geopoint_out_of_range() {
        assert!(geopoint("default").cast(&json!("181, 0")).is_err());
        assert!(geopoint("default").cast(&json!("0, -91")).is_err());
    }

    #[test]
    fn test_geojson_geometries() {
        let caster = geojson("default");

        assert!(caster.cast(&json!({"type": "Point", "coordinates": [1, 2]})).is_ok());
        assert!(
            caster
                .cast(&json!({"type": "Feature", "geometry": null, "properties": {}}))
                .is_ok()
        );
        assert!(caster.cast(&json!({"type": "FeatureCollection", "features": []})).is_ok());
    }

    #[test]
    fn test_geojson_invalid() {
        let caster = geojson("default");

        assert!(caster.cast(&json!({"type": "Point"})).is_err());
        assert!(caster.cast(&json!({"type": "Circle", "coordinates": [1]})).is_err());
        assert!(caster.cast(&json!({"coordinates": [1, 2]})).is_err());
        assert!(caster.cast(&json!("Point")).is_err());
    }

    #[test]
    fn test_topojson() {
        let caster = geojson("topojson");

        assert!(caster.cast(&json!({"type": "Topology", "objects": {}})).is_ok());
        assert!(caster.cast(&json!({"type": "Point", "coordinates": [1, 2]})).is_err());
    }
}
