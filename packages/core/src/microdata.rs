//! HTML microdata rendering of a [`Schema`] tree.
//!
//! Output is a single line of markup with no whitespace between elements:
//!
//! ```text
//! <div itemscope itemtype="http://schema.org/Person"><span itemprop="name">Ada</span><div itemscope itemtype="http://schema.org/PostalAddress" itemprop="address"><span itemprop="addressLocality">London</span></div></div>
//! ```
//!
//! Each node becomes a wrapper element carrying `itemscope` and `itemtype`,
//! plus `itemprop` when it sits under a property and `itemid` when it has an
//! identifier. Scalar properties become `<span itemprop="...">` children.

use crate::escape::{escape_html, is_valid_name};
use crate::outputter::Outputter;
use crate::schema::Schema;
use crate::value::PropertyValue;

/// Element used for wrappers when no tag is given.
pub const DEFAULT_WRAPPER: &str = "div";

/// Element used for scalar property values.
pub const SCALAR_ELEMENT: &str = "span";

/// Attributes the outputter writes itself; caller-supplied copies are dropped.
const RESERVED_ATTRIBUTES: [&str; 4] = ["itemscope", "itemtype", "itemprop", "itemid"];

/// An extra attribute placed on the outer wrapper element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperAttribute {
    pub name: String,
    pub value: String,
}

impl WrapperAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for WrapperAttribute {
    fn from((name, value): (N, V)) -> Self {
        Self::new(name, value)
    }
}

/// Renders a [`Schema`] and its nested nodes as microdata markup.
///
/// Configure the outer wrapper with the builder methods, then call
/// [`Outputter::get`]:
///
/// ```rust
/// use schemabuilder::{MicrodataOutputter, Outputter, Schema};
///
/// let mut person = Schema::new("Person")?;
/// person.add_property("name", "Ada")?;
///
/// let html = MicrodataOutputter::new(&person)
///     .wrapper("article")
///     .attribute("class", "card")
///     .get();
/// assert_eq!(
///     html,
///     r#"<article itemscope itemtype="http://schema.org/Person" class="card"><span itemprop="name">Ada</span></article>"#
/// );
/// # Ok::<(), schemabuilder::SchemaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MicrodataOutputter<'a> {
    schema: &'a Schema,
    property_name: String,
    wrapper: String,
    attributes: Vec<WrapperAttribute>,
}

impl<'a> MicrodataOutputter<'a> {
    /// `itemprop` for the outer wrapper. Empty falls back to the schema's
    /// parent property name.
    pub fn property_name(mut self, name: impl Into<String>) -> Self {
        self.property_name = name.into();
        self
    }

    /// Tag name of the outer wrapper. Empty means [`DEFAULT_WRAPPER`].
    pub fn wrapper(mut self, tag: impl Into<String>) -> Self {
        self.wrapper = tag.into();
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(WrapperAttribute::new(name, value));
        self
    }

    pub fn attributes(mut self, attributes: impl IntoIterator<Item = WrapperAttribute>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    fn tag(&self) -> &str {
        if self.wrapper.is_empty() {
            return DEFAULT_WRAPPER;
        }
        if !is_valid_name(&self.wrapper) {
            tracing::warn!(wrapper = %self.wrapper, "invalid wrapper tag, using {}", DEFAULT_WRAPPER);
            return DEFAULT_WRAPPER;
        }
        &self.wrapper
    }

    fn itemprop(&self) -> &str {
        if self.property_name.is_empty() {
            self.schema.parent_property_name()
        } else {
            &self.property_name
        }
    }

    fn render_into(&self, out: &mut String) {
        let tag = self.tag();

        out.push_str(&format!(
            "<{} itemscope itemtype=\"{}\"",
            tag,
            escape_html(&self.schema.type_url())
        ));

        let itemprop = self.itemprop();
        if !itemprop.is_empty() {
            out.push_str(&format!(" itemprop=\"{}\"", escape_html(itemprop)));
        }

        if !self.schema.schema_id().is_empty() {
            out.push_str(&format!(" itemid=\"{}\"", escape_html(self.schema.schema_id())));
        }

        for attr in &self.attributes {
            if RESERVED_ATTRIBUTES.contains(&attr.name.to_ascii_lowercase().as_str()) {
                tracing::warn!(attribute = %attr.name, "reserved wrapper attribute skipped");
                continue;
            }
            if !is_valid_name(&attr.name) {
                tracing::warn!(attribute = %attr.name, "invalid wrapper attribute name skipped");
                continue;
            }
            out.push_str(&format!(" {}=\"{}\"", attr.name, escape_html(&attr.value)));
        }
        out.push('>');

        for (name, value) in self.schema.properties() {
            match value {
                PropertyValue::Schema(nested) => {
                    MicrodataOutputter::new(nested)
                        .property_name(name)
                        .render_into(out);
                }
                PropertyValue::Boolean(_)
                | PropertyValue::Integer(_)
                | PropertyValue::Float(_)
                | PropertyValue::String(_) => {
                    out.push_str(&format!(
                        "<{SCALAR_ELEMENT} itemprop=\"{}\">{}</{SCALAR_ELEMENT}>",
                        escape_html(name),
                        escape_html(&value.to_string())
                    ));
                }
            }
        }

        out.push_str(&format!("</{}>", tag));
    }
}

impl<'a> Outputter<'a> for MicrodataOutputter<'a> {
    fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            property_name: String::new(),
            wrapper: String::new(),
            attributes: Vec::new(),
        }
    }

    fn schema(&self) -> &'a Schema {
        self.schema
    }

    fn get(&self) -> String {
        tracing::debug!(
            schema_type = %self.schema.schema_type(),
            properties = self.schema.len(),
            "rendering microdata"
        );
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }
}

// --- tests -------------------------------------------------------------------
