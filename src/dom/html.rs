//! HTML-serialized markup → well-formed XML.
//!
//! Only the two HTML-isms that `innerHTML` serialization puts into SVG are
//! handled: void elements written without a closing slash, and named
//! character references XML does not predefine.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref RE_VOID_OPEN: Regex = Regex::new(
        r"(?i)<(area|base|br|col|embed|hr|img|input|link|meta|param|source|track|wbr)(\s[^<>]*?)?\s*/?>"
    )
    .unwrap();
    static ref RE_VOID_CLOSE: Regex = Regex::new(
        r"(?i)</(?:area|base|br|col|embed|hr|img|input|link|meta|param|source|track|wbr)\s*>"
    )
    .unwrap();
    static ref RE_AMPERSAND: Regex =
        Regex::new(r"&(#[0-9]+;|#[xX][0-9a-fA-F]+;|[A-Za-z][A-Za-z0-9]*;)?").unwrap();
}

/// Named references beyond the five XML predefines, as code points.
const HTML_ENTITIES: &[(&str, u32)] = &[
    ("nbsp", 160),
    ("iexcl", 161),
    ("cent", 162),
    ("pound", 163),
    ("yen", 165),
    ("sect", 167),
    ("copy", 169),
    ("laquo", 171),
    ("shy", 173),
    ("reg", 174),
    ("deg", 176),
    ("plusmn", 177),
    ("para", 182),
    ("middot", 183),
    ("raquo", 187),
    ("iquest", 191),
    ("times", 215),
    ("divide", 247),
    ("ensp", 8194),
    ("emsp", 8195),
    ("thinsp", 8201),
    ("zwnj", 8204),
    ("zwj", 8205),
    ("ndash", 8211),
    ("mdash", 8212),
    ("lsquo", 8216),
    ("rsquo", 8217),
    ("ldquo", 8220),
    ("rdquo", 8221),
    ("bull", 8226),
    ("hellip", 8230),
    ("euro", 8364),
    ("trade", 8482),
    ("larr", 8592),
    ("uarr", 8593),
    ("rarr", 8594),
    ("darr", 8595),
    ("harr", 8596),
    ("lArr", 8656),
    ("rArr", 8658),
    ("hArr", 8660),
    ("infin", 8734),
    ("ne", 8800),
    ("le", 8804),
    ("ge", 8805),
];

const XML_ENTITIES: [&str; 5] = ["amp", "lt", "gt", "quot", "apos"];

/// Rewrite HTML-serialized markup so an XML parser accepts it.
pub(crate) fn to_xml(text: &str) -> String {
    let text = RE_VOID_CLOSE.replace_all(text, "");
    let text = RE_VOID_OPEN
        .replace_all(&text, |caps: &Captures| {
            format!("<{}{}/>", &caps[1], caps.get(2).map_or("", |m| m.as_str()))
        })
        .into_owned();
    RE_AMPERSAND
        .replace_all(&text, |caps: &Captures| match caps.get(1) {
            None => "&amp;".to_string(),
            Some(reference) => named_reference(reference.as_str()),
        })
        .into_owned()
}

/// `reference` is the part after `&`, including the trailing `;`.
fn named_reference(reference: &str) -> String {
    let name = reference.trim_end_matches(';');
    if name.starts_with('#') || XML_ENTITIES.contains(&name) {
        return format!("&{}", reference);
    }
    match HTML_ENTITIES.iter().find(|(n, _)| *n == name) {
        Some((_, code)) => format!("&#{};", code),
        // The HTML parser keeps unknown references as literal text
        None => format!("&amp;{}", reference),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_elements_are_closed() {
        assert_eq!(to_xml("A<br>B"), "A<br/>B");
        assert_eq!(to_xml("A<BR >B"), "A<BR />B");
        assert_eq!(to_xml("A<br/>B<br />"), "A<br/>B<br />");
        assert_eq!(
            to_xml(r#"<img src="a.png" alt="x">"#),
            r#"<img src="a.png" alt="x"/>"#
        );
        assert_eq!(to_xml("<br></br>"), "<br/>");
        // Names that only start like a void element are untouched
        assert_eq!(to_xml("<brand>x</brand>"), "<brand>x</brand>");
    }

    #[test]
    fn test_entities() {
        assert_eq!(to_xml("A&nbsp;B"), "A&#160;B");
        assert_eq!(to_xml("&amp;&lt;&#39;&#x27;"), "&amp;&lt;&#39;&#x27;");
        assert_eq!(to_xml("a & b"), "a &amp; b");
        assert_eq!(to_xml("&bogus;"), "&amp;bogus;");
        assert_eq!(to_xml("&rarr;&hellip;"), "&#8594;&#8230;");
    }

    #[test]
    fn test_well_formed_input_is_unchanged() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><text>A &amp; B</text><path d="M0 0"/></svg>"#;
        assert_eq!(to_xml(svg), svg);
    }
}
