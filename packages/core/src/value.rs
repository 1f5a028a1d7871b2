//! The value domain of a schema property.
//!
//! A property holds exactly one of a boolean, an integer, a float, a string,
//! or a nested [`Schema`]. Both outputters match on [`PropertyValue`]
//! exhaustively, so adding a variant is a compile error until every renderer
//! handles it.
//!
//! `bool`, `f32`, `f64`, strings, [`Schema`] and integers up to 32 bits
//! (plus `i64`) convert with `From`. `isize`, `usize`, `u64` and the 128-bit
//! types convert with `TryFrom` and fail with
//! [`SchemaError::UnsupportedValue`] outside `i64` range.

use crate::error::SchemaError;
use crate::schema::Schema;

/// A single property value attached to a [`Schema`].
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Boolean(bool),
    Integer(i64),
    /// Must be finite; NaN and infinities are rejected on attachment.
    Float(f64),
    String(String),
    /// A nested node. Owned by the property edge that holds it.
    Schema(Schema),
}

impl PropertyValue {
    /// Check that the value can be represented in every output format.
    pub fn validate(&self) -> Result<(), SchemaError> {
        match self {
            PropertyValue::Float(f) if !f.is_finite() => Err(SchemaError::UnsupportedValue(
                format!("non-finite float {f}"),
            )),
            _ => Ok(()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to `f64`; other kinds return `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            PropertyValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_schema(&self) -> Option<&Schema> {
        match self {
            PropertyValue::Schema(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, PropertyValue::Schema(_))
    }

    /// Short human-readable name of the variant, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            PropertyValue::Boolean(_) => "boolean",
            PropertyValue::Integer(_) => "integer",
            PropertyValue::Float(_) => "float",
            PropertyValue::String(_) => "string",
            PropertyValue::Schema(_) => "schema",
        }
    }
}

/// Formats the value as the text content used in microdata.
///
/// Booleans print as `true`/`false`, numbers in their shortest decimal form,
/// strings verbatim. A nested schema prints its type name.
impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::Boolean(b) => write!(f, "{b}"),
            PropertyValue::Integer(i) => write!(f, "{i}"),
            PropertyValue::Float(x) => write!(f, "{x}"),
            PropertyValue::String(s) => f.write_str(s),
            PropertyValue::Schema(s) => f.write_str(s.schema_type()),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for PropertyValue {
                fn from(i: $t) -> Self {
                    PropertyValue::Integer(i64::from(i))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

// Wider integers only fit when in `i64` range, so pass them through
// `PropertyValue::try_from(..)?` before attaching.
macro_rules! impl_try_from_integer {
    ($($t:ty),*) => {
        $(
            impl TryFrom<$t> for PropertyValue {
                type Error = SchemaError;

                fn try_from(i: $t) -> Result<Self, SchemaError> {
                    i64::try_from(i).map(PropertyValue::Integer).map_err(|_| {
                        SchemaError::UnsupportedValue(format!("integer {} out of i64 range", i))
                    })
                }
            }
        )*
    };
}

impl_try_from_integer!(isize, u64, usize, i128, u128);

impl From<f32> for PropertyValue {
    fn from(f: f32) -> Self {
        PropertyValue::Float(f64::from(f))
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<Schema> for PropertyValue {
    fn from(s: Schema) -> Self {
        PropertyValue::Schema(s)
    }
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_canonical_forms() {
        assert_eq!(PropertyValue::from(true).to_string(), "true");
        assert_eq!(PropertyValue::from(false).to_string(), "false");
        assert_eq!(PropertyValue::from(-42).to_string(), "-42");
        assert_eq!(PropertyValue::from(4.5).to_string(), "4.5");
        assert_eq!(PropertyValue::from("Ada").to_string(), "Ada");
    }

    #[test]
    fn nested_schema_displays_its_type() {
        let nested = Schema::new("PostalAddress").unwrap();
        assert_eq!(PropertyValue::from(nested).to_string(), "PostalAddress");
    }

    #[test]
    fn conversions_pick_the_right_variant() {
        assert_eq!(PropertyValue::from(7u8), PropertyValue::Integer(7));
        assert_eq!(PropertyValue::from(7u32), PropertyValue::Integer(7));
        assert_eq!(PropertyValue::from(String::from("x")), PropertyValue::String("x".into()));
        assert!(matches!(PropertyValue::from(0.25f32), PropertyValue::Float(_)));
    }

    #[test]
    fn wide_integers_convert_when_in_range() {
        let names = vec!["a", "b", "c"];
        assert_eq!(PropertyValue::try_from(names.len()), Ok(PropertyValue::Integer(3)));
        assert_eq!(PropertyValue::try_from(-5isize), Ok(PropertyValue::Integer(-5)));
        assert_eq!(
            PropertyValue::try_from(i64::MAX as u64),
            Ok(PropertyValue::Integer(i64::MAX))
        );

        let mut s = Schema::new("ItemList").unwrap();
        s.add_property("numberOfItems", PropertyValue::try_from(names.len()).unwrap())
            .unwrap();
        assert_eq!(s.get_property("numberOfItems").unwrap().as_i64(), Some(3));
    }

    #[test]
    fn wide_integers_out_of_range_rejected() {
        let err = PropertyValue::try_from(u64::MAX).unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedValue(_)));
        assert!(err.to_string().contains("18446744073709551615"));
        assert!(PropertyValue::try_from(i128::MIN).is_err());
    }

    #[test]
    fn accessors() {
        let v = PropertyValue::from(3);
        assert_eq!(v.as_i64(), Some(3));
        assert_eq!(v.as_f64(), Some(3.0));
        assert_eq!(v.as_str(), None);
        assert_eq!(PropertyValue::from("a").as_str(), Some("a"));
        assert_eq!(PropertyValue::from(true).as_bool(), Some(true));
        assert!(PropertyValue::from(Schema::new("Thing").unwrap()).is_schema());
    }

    #[test]
    fn non_finite_floats_rejected() {
        for f in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                PropertyValue::from(f).validate(),
                Err(SchemaError::UnsupportedValue(_))
            ));
        }
        assert_eq!(PropertyValue::from(1.0).validate(), Ok(()));
    }
}
