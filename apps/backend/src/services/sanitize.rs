//! HTML escaping for untrusted free text.
//!
//! Escaped output never contains `<`, `>`, `"` or `'`, and every `&` starts an
//! entity, so stored values are inert when rendered into HTML.

/// Escape `&`, `<`, `>`, `"` and `'` as HTML entities.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn script_tags_are_neutralized() {
        assert_eq!(
            escape_html("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
    }

    #[test]
    fn attribute_breakouts_are_neutralized() {
        assert_eq!(
            escape_html(r#"" onmouseover='x'"#),
            "&quot; onmouseover=&#39;x&#39;"
        );
    }

    #[test]
    fn plain_and_unicode_text_is_untouched() {
        assert_eq!(escape_html("护士态度很好 nurse was kind"), "护士态度很好 nurse was kind");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn ampersands_are_escaped_once() {
        assert_eq!(escape_html("a & b &amp; c"), "a &amp; b &amp;amp; c");
    }

    proptest! {
        #[test]
        fn output_has_no_active_markup(input in ".*") {
            let escaped = escape_html(&input);
            prop_assert!(!escaped.contains('<'));
            prop_assert!(!escaped.contains('>'));
            prop_assert!(!escaped.contains('"'));
            prop_assert!(!escaped.contains('\''));
        }

        #[test]
        fn output_never_shrinks(input in ".*") {
            prop_assert!(escape_html(&input).len() >= input.len());
        }
    }
}
