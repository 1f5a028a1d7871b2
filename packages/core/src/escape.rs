//! HTML escaping for microdata output.

/// Escape a string for use as HTML text content or a double-quoted attribute
/// value.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            c => result.push(c),
        }
    }
    result
}

/// Whether `name` can be emitted as an HTML tag or attribute name as-is.
///
/// Accepts ASCII alphanumerics plus `-`, `_`, `:` and `.`, starting with a
/// letter.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_untouched() {
        assert_eq!(escape_html("Ada Lovelace"), "Ada Lovelace");
    }

    #[test]
    fn markup_characters_escaped() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn names() {
        assert!(is_valid_name("div"));
        assert!(is_valid_name("data-id"));
        assert!(is_valid_name("xml:lang"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("1div"));
        assert!(!is_valid_name("on click"));
        assert!(!is_valid_name("a\"b"));
    }
}
