//! JSON-LD rendering and parsing of [`Schema`] trees.
//!
//! A node serialises as a JSON object whose first key is `@type`, followed by
//! `@id` when the node has an identifier, followed by its properties in
//! insertion order. Nested schemas become nested objects built by the same
//! rule.
//!
//! ```json
//! {"@type":"Person","name":"Ada","address":{"@type":"PostalAddress","addressLocality":"London"}}
//! ```
//!
//! The serde impls are written by hand so key order is carried through
//! `serde_json` without an order-preserving map type. Parsing goes back
//! through [`Schema::add_property`], so a document that breaks a schema
//! invariant is rejected rather than loaded.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Unexpected, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::SchemaError;
use crate::outputter::Outputter;
use crate::schema::{Schema, SCHEMA_BASE_URL};
use crate::value::PropertyValue;

/// Renders a [`Schema`] and its nested nodes as a JSON-LD document.
///
/// The default output is compact and has no `@context`. Both can be switched
/// on for the root object:
///
/// ```rust
/// use schemabuilder::{Outputter, Schema};
///
/// let mut org = Schema::new("Organization")?;
/// org.add_property("name", "NYPL")?;
///
/// assert_eq!(
///     org.json_ld_outputter().with_context(true).get(),
///     r#"{"@context":"http://schema.org","@type":"Organization","name":"NYPL"}"#
/// );
/// # Ok::<(), schemabuilder::SchemaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonLdOutputter<'a> {
    schema: &'a Schema,
    context: bool,
    pretty: bool,
}

impl<'a> JsonLdOutputter<'a> {
    /// Emit `"@context": "http://schema.org"` as the first key of the root.
    pub fn with_context(mut self, context: bool) -> Self {
        self.context = context;
        self
    }

    /// Indent the document instead of printing it on one line.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl<'a> Outputter<'a> for JsonLdOutputter<'a> {
    fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            context: false,
            pretty: false,
        }
    }

    fn schema(&self) -> &'a Schema {
        self.schema
    }

    fn get(&self) -> String {
        tracing::debug!(
            schema_type = %self.schema.schema_type(),
            properties = self.schema.len(),
            context = self.context,
            "rendering JSON-LD"
        );
        let node = JsonLdNode {
            schema: self.schema,
            context: self.context.then_some(SCHEMA_BASE_URL),
        };
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&node)
        } else {
            serde_json::to_string(&node)
        };
        // Keys are strings and numbers are finite, so serialisation cannot fail.
        rendered.expect("schema tree is always representable as JSON")
    }
}

/// Parses a JSON-LD document into a validated [`Schema`] tree.
impl FromStr for Schema {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

// --- serialisation -----------------------------------------------------------

struct JsonLdNode<'a> {
    schema: &'a Schema,
    context: Option<&'a str>,
}

impl Serialize for JsonLdNode<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(context) = self.context {
            map.serialize_entry("@context", context)?;
        }
        map.serialize_entry("@type", self.schema.schema_type())?;
        if !self.schema.schema_id().is_empty() {
            map.serialize_entry("@id", self.schema.schema_id())?;
        }
        for (name, value) in self.schema.properties() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        JsonLdNode {
            schema: self,
            context: None,
        }
        .serialize(serializer)
    }
}

impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropertyValue::Boolean(b) => serializer.serialize_bool(*b),
            PropertyValue::Integer(i) => serializer.serialize_i64(*i),
            PropertyValue::Float(f) => serializer.serialize_f64(*f),
            PropertyValue::String(s) => serializer.serialize_str(s),
            PropertyValue::Schema(nested) => nested.serialize(serializer),
        }
    }
}

// --- deserialisation ---------------------------------------------------------

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SchemaVisitor)
    }
}

struct SchemaVisitor;

impl<'de> Visitor<'de> for SchemaVisitor {
    type Value = Schema;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON-LD object with an @type")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Schema, A::Error> {
        let mut schema_type: Option<String> = None;
        let mut schema_id: Option<String> = None;
        let mut properties: Vec<(String, PropertyValue)> = Vec::new();

        // @type may come after the properties, so collect everything first.
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "@type" => {
                    if schema_type.is_some() {
                        return Err(de::Error::duplicate_field("@type"));
                    }
                    schema_type = Some(map.next_value()?);
                }
                "@id" => {
                    if schema_id.is_some() {
                        return Err(de::Error::duplicate_field("@id"));
                    }
                    schema_id = Some(map.next_value()?);
                }
                "@context" => {
                    map.next_value::<IgnoredAny>()?;
                }
                _ => {
                    let value: PropertyValue = map.next_value()?;
                    properties.push((key, value));
                }
            }
        }

        let schema_type = schema_type.ok_or_else(|| de::Error::missing_field("@type"))?;
        let mut schema = Schema::new(schema_type).map_err(de::Error::custom)?;
        if let Some(id) = schema_id {
            schema.set_schema_id(id);
        }
        for (name, value) in properties {
            schema.add_property(name, value).map_err(de::Error::custom)?;
        }
        Ok(schema)
    }
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PropertyValueVisitor)
    }
}

struct PropertyValueVisitor;

impl<'de> Visitor<'de> for PropertyValueVisitor {
    type Value = PropertyValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a boolean, number, string or JSON-LD object")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<PropertyValue, E> {
        Ok(PropertyValue::Boolean(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<PropertyValue, E> {
        Ok(PropertyValue::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<PropertyValue, E> {
        i64::try_from(v)
            .map(PropertyValue::Integer)
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &"an integer within i64 range"))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<PropertyValue, E> {
        Ok(PropertyValue::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<PropertyValue, E> {
        Ok(PropertyValue::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<PropertyValue, E> {
        Ok(PropertyValue::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<PropertyValue, E> {
        Err(E::custom(SchemaError::NullValue))
    }

    fn visit_none<E: de::Error>(self) -> Result<PropertyValue, E> {
        Err(E::custom(SchemaError::NullValue))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, _seq: A) -> Result<PropertyValue, A::Error> {
        Err(de::Error::custom(SchemaError::UnsupportedValue("array".into())))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<PropertyValue, A::Error> {
        SchemaVisitor.visit_map(map).map(PropertyValue::Schema)
    }
}

// --- tests -------------------------------------------------------------------


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::test_utils::schema_tree;
    use proptest::prelude::*;

    proptest! {
        /// JSON-LD output is always parseable JSON.
        #[test]
        fn json_ld_is_valid_json(schema in schema_tree(true)) {
            let json = schema.get_json_ld();
            let parsed: Result<serde_json::Value, _> = serde_json::from_str(&json);
            prop_assert!(parsed.is_ok(), "not valid JSON: {}", json);
        }

        /// `@type` is the first key of every object.
        #[test]
        fn type_key_leads_every_object(schema in schema_tree(true)) {
            let json = schema.get_json_ld();
            prop_assert!(json.starts_with("{\"@type\":"), "got {}", json);
            prop_assert_eq!(json.matches("{\"@type\":").count(), count_nodes(&schema));
        }

        /// Parsing the output rebuilds an equal tree.
        #[test]
        fn json_ld_round_trips(schema in schema_tree(false)) {
            let back: Schema = schema.get_json_ld().parse().unwrap();
            prop_assert_eq!(back, schema);
        }
    }

    fn count_nodes(schema: &Schema) -> usize {
        1 + schema
            .properties()
            .filter_map(|(_, v)| v.as_schema())
            .map(count_nodes)
            .sum::<usize>()
    }
}
