//! HTML escaping.

/// Escape text for safe inclusion in HTML element content and
/// double-quoted attribute values.
///
/// # Examples
///
/// ```
/// use docnav_nav::escape_html;
///
/// assert_eq!(
///     escape_html(r#"<a href="x">Tom & Jerry</a>"#),
///     "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&lt;/a&gt;"
/// );
/// ```
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
