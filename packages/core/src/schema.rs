//! The [`Schema`] node: a typed, ordered property tree.

use std::io;

use crate::error::SchemaError;
use crate::jsonld::JsonLdOutputter;
use crate::microdata::{MicrodataOutputter, WrapperAttribute};
use crate::outputter::Outputter;
use crate::value::PropertyValue;

/// Base URL prepended to a type name to form its vocabulary IRI.
pub const SCHEMA_BASE_URL: &str = "http://schema.org";

/// A schema.org structured-data node.
///
/// A node has a capitalised type name (e.g. `"Person"`), an optional
/// identifier, and an ordered list of properties. Property values may be
/// nested [`Schema`]s, forming a tree. Properties are append-only: there is no
/// removal or replacement, and names are unique within a node.
///
/// Insertion order is preserved and drives the order of every rendering.
///
/// # Example
///
/// ```rust
/// use schemabuilder::Schema;
///
/// let mut address = Schema::new("PostalAddress")?;
/// address.add_property("addressLocality", "London")?;
///
/// let mut person = Schema::new("Person")?;
/// person.add_property("name", "Ada")?;
/// person.add_property("address", address)?;
///
/// assert_eq!(
///     person.get_json_ld(),
///     r#"{"@type":"Person","name":"Ada","address":{"@type":"PostalAddress","addressLocality":"London"}}"#
/// );
/// # Ok::<(), schemabuilder::SchemaError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    schema_type: String,
    schema_id: String,
    properties: Vec<(String, PropertyValue)>,
    parent_property_name: String,
}

impl Schema {
    /// Create an empty node of the given type.
    ///
    /// The type must be non-empty and must not start with a lower-case
    /// character. This is a shape check only; the name is not looked up in
    /// the schema.org vocabulary.
    pub fn new(schema_type: impl Into<String>) -> Result<Self, SchemaError> {
        let schema_type = schema_type.into();
        check_type(&schema_type)?;
        Ok(Self {
            schema_type,
            schema_id: String::new(),
            properties: Vec::new(),
            parent_property_name: String::new(),
        })
    }

    pub fn schema_type(&self) -> &str {
        &self.schema_type
    }

    /// Identifier rendered as `@id` / `itemid`. Empty when unset.
    pub fn schema_id(&self) -> &str {
        &self.schema_id
    }

    pub fn set_schema_id(&mut self, schema_id: impl Into<String>) {
        self.schema_id = schema_id.into();
    }

    pub fn with_schema_id(mut self, schema_id: impl Into<String>) -> Self {
        self.set_schema_id(schema_id);
        self
    }

    /// Name of the property this node was last attached under, or `""` for a
    /// node that has never been attached.
    pub fn parent_property_name(&self) -> &str {
        &self.parent_property_name
    }

    /// Attach a property.
    ///
    /// Checks run in order (name, value, uniqueness) and the first failure is
    /// returned without touching the node. A nested [`Schema`] value records
    /// `name` as its parent property name before it is stored.
    pub fn add_property(
        &mut self,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Result<(), SchemaError> {
        let name = name.into();
        let mut value = value.into();

        if name.is_empty() {
            return Err(SchemaError::PropertyNameRequired);
        }
        if name.starts_with('@') {
            return Err(SchemaError::ReservedPropertyName(name));
        }
        value.validate()?;
        if self.has_property(&name) {
            return Err(SchemaError::PropertyExists(name));
        }

        if let PropertyValue::Schema(nested) = &mut value {
            nested.parent_property_name = name.clone();
        }

        tracing::trace!(
            schema_type = %self.schema_type,
            property = %name,
            kind = value.kind_name(),
            "property added"
        );
        self.properties.push((name, value));
        Ok(())
    }

    /// Look up a property by name.
    ///
    /// The value is borrowed from the tree, so a nested schema returned here
    /// is the very node the parent renders.
    pub fn get_property(&self, name: &str) -> Result<&PropertyValue, SchemaError> {
        self.properties
            .iter()
            .find(|(n, _)| !name.is_empty() && n == name)
            .map(|(_, v)| v)
            .ok_or_else(|| SchemaError::PropertyNotFound(name.to_string()))
    }

    /// Write the text form of a property value to `out`.
    ///
    /// Scalars use their canonical [`Display`](std::fmt::Display) text and a
    /// nested schema writes its type name. A missing property surfaces as an
    /// [`io::ErrorKind::NotFound`] error wrapping [`SchemaError::PropertyNotFound`].
    pub fn output_property<W: io::Write>(&self, name: &str, out: &mut W) -> io::Result<()> {
        let value = self
            .get_property(name)
            .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;
        write!(out, "{}", value)
    }

    /// Mutable access to an attached nested schema.
    ///
    /// Lets a child keep growing after it was attached; the parent sees the
    /// change on its next render. Scalar properties cannot be reached this
    /// way, which keeps property values replace-free.
    pub fn get_nested_mut(&mut self, name: &str) -> Result<&mut Schema, SchemaError> {
        let (_, value) = self
            .properties
            .iter_mut()
            .find(|(n, _)| !name.is_empty() && n == name)
            .ok_or_else(|| SchemaError::PropertyNotFound(name.to_string()))?;
        match value {
            PropertyValue::Schema(nested) => Ok(nested),
            _ => Err(SchemaError::NotNested(name.to_string())),
        }
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|(n, _)| n == name)
    }

    /// Iterate over properties in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.properties.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of properties attached directly to this node.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Full vocabulary IRI of this node's type, e.g. `http://schema.org/Person`.
    pub fn type_url(&self) -> String {
        format!("{}/{}", SCHEMA_BASE_URL, self.schema_type)
    }

    // --- outputters ----------------------------------------------------------

    /// A microdata renderer bound to this node.
    ///
    /// A fresh outputter is built on every call. It borrows the schema, so the
    /// tree cannot change while the outputter is alive and a render always
    /// reflects the current properties.
    pub fn microdata_outputter(&self) -> MicrodataOutputter<'_> {
        MicrodataOutputter::new(self)
    }

    /// A JSON-LD renderer bound to this node. See [`Schema::microdata_outputter`].
    pub fn json_ld_outputter(&self) -> JsonLdOutputter<'_> {
        JsonLdOutputter::new(self)
    }

    /// Render this node as microdata markup.
    ///
    /// `property_name` overrides the `itemprop` of the outer wrapper (pass
    /// `""` to fall back to the parent property name), `wrapper` names the
    /// outer element (`""` means `div`).
    pub fn get_microdata(
        &self,
        property_name: &str,
        wrapper: &str,
        wrapper_attributes: &[WrapperAttribute],
    ) -> String {
        self.microdata_outputter()
            .property_name(property_name)
            .wrapper(wrapper)
            .attributes(wrapper_attributes.iter().cloned())
            .get()
    }

    /// Write the microdata rendering to `out`.
    pub fn output_microdata<W: io::Write>(
        &self,
        property_name: &str,
        wrapper: &str,
        wrapper_attributes: &[WrapperAttribute],
        out: &mut W,
    ) -> io::Result<()> {
        out.write_all(
            self.get_microdata(property_name, wrapper, wrapper_attributes)
                .as_bytes(),
        )
    }

    /// Render this node as a compact JSON-LD document.
    pub fn get_json_ld(&self) -> String {
        self.json_ld_outputter().get()
    }

    /// Write the JSON-LD rendering to `out`.
    pub fn output_json_ld<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        self.json_ld_outputter().output(out)
    }
}

// --- helpers -----------------------------------------------------------------

fn check_type(schema_type: &str) -> Result<(), SchemaError> {
    match schema_type.chars().next() {
        None => Err(SchemaError::TypeRequired),
        Some(c) if c.is_lowercase() => Err(SchemaError::InvalidType(schema_type.to_string())),
        Some(_) => Ok(()),
    }
}

// --- tests -------------------------------------------------------------------
