//! Shared strategies and checks for property tests.

use proptest::prelude::*;

use crate::schema::Schema;
use crate::value::PropertyValue;

fn type_name() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z]{0,12}"
}

fn property_name() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z]{0,10}"
}

fn scalar_value(floats: bool) -> BoxedStrategy<PropertyValue> {
    let base = prop_oneof![
        any::<bool>().prop_map(PropertyValue::Boolean),
        any::<i64>().prop_map(PropertyValue::Integer),
        "[ -~]{0,20}".prop_map(PropertyValue::String),
    ];
    if floats {
        prop_oneof![base, (-1.0e9f64..1.0e9).prop_map(PropertyValue::Float)].boxed()
    } else {
        base.boxed()
    }
}

fn build(schema_type: String, properties: Vec<(String, PropertyValue)>) -> Schema {
    let mut schema = Schema::new(schema_type).unwrap();
    for (name, value) in properties {
        // Generated names may repeat; the first one wins.
        if !schema.has_property(&name) {
            schema.add_property(name, value).unwrap();
        }
    }
    schema
}

/// Acyclic schema trees of bounded depth and width. `floats` controls whether
/// float scalars are generated (they do not survive a text round trip
/// bit-for-bit).
pub(crate) fn schema_tree(floats: bool) -> impl Strategy<Value = Schema> {
    let value = scalar_value(floats).prop_recursive(3, 32, 5, |inner| {
        (type_name(), prop::collection::vec((property_name(), inner), 0..5))
            .prop_map(|(t, props)| PropertyValue::Schema(build(t, props)))
    });
    (type_name(), prop::collection::vec((property_name(), value), 0..6))
        .prop_map(|(t, props)| build(t, props))
}

/// Check that every element opened in `html` is closed in the right order.
pub(crate) fn assert_balanced_markup(html: &str) -> Result<(), String> {
    let mut stack: Vec<&str> = Vec::new();
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        let end = rest[start..]
            .find('>')
            .map(|i| start + i)
            .ok_or_else(|| format!("unterminated tag at {:?}", &rest[start..]))?;
        let tag = &rest[start + 1..end];

        if let Some(name) = tag.strip_prefix('/') {
            match stack.pop() {
                Some(open) if open == name => {}
                Some(open) => return Err(format!("</{name}> closes <{open}>")),
                None => return Err(format!("</{name}> with nothing open")),
            }
        } else {
            let name = tag.split(' ').next().unwrap_or(tag);
            stack.push(name);
        }
        rest = &rest[end + 1..];
    }

    if stack.is_empty() {
        Ok(())
    } else {
        Err(format!("unclosed elements: {stack:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_checker_accepts_nested_markup() {
        assert!(assert_balanced_markup("<div a=\"1\"><span>x</span></div>").is_ok());
    }

    #[test]
    fn balanced_checker_rejects_mismatches() {
        assert!(assert_balanced_markup("<div><span></div></span>").is_err());
        assert!(assert_balanced_markup("<div>").is_err());
        assert!(assert_balanced_markup("</div>").is_err());
    }
}
