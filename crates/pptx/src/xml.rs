//! Small XML helpers shared by the parser and the writer.

use deck_core::{Error, Result};
use quick_xml::events::BytesStart;
use std::borrow::Cow;

/// Extract the local name from a potentially namespaced XML element name.
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Namespace prefix of a qualified name, including the colon (`"a:"`).
pub(crate) fn prefix_of(qualified: &str) -> &str {
    match qualified.find(':') {
        Some(pos) => &qualified[..=pos],
        None => "",
    }
}

/// Unescaped value of the attribute whose local name is `key`.
pub(crate) fn attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| local_name(a.key.as_ref()) == key)
        .and_then(|a| a.unescape_value().ok().map(Cow::into_owned))
}

/// Attribute parsed as a number.
pub(crate) fn attr_num<T: std::str::FromStr>(e: &BytesStart, key: &[u8]) -> Option<T> {
    attr(e, key).and_then(|v| v.trim().parse().ok())
}

/// Every attribute as raw (still escaped) `(key, value)` text, in order.
pub(crate) fn raw_attrs(e: &BytesStart) -> Vec<(String, String)> {
    e.attributes()
        .flatten()
        .map(|a| {
            (
                String::from_utf8_lossy(a.key.as_ref()).into_owned(),
                String::from_utf8_lossy(&a.value).into_owned(),
            )
        })
        .collect()
}

/// Escape text for element content or attribute values.
pub(crate) fn escape(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// Extract the number at the end of a string like "rId2" or "slide3.xml".
pub(crate) fn trailing_number(s: &str) -> Option<usize> {
    // Remove common extensions first
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");
    let s = match s.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphabetic()) => {
            stem
        }
        _ => s,
    };

    // Try to find digits at the end
    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}

/// Decode an archive part as UTF-8.
pub(crate) fn part_to_string(name: &str, data: &[u8]) -> Result<String> {
    String::from_utf8(data.to_vec())
        .map_err(|e| Error::XmlError(format!("'{}' is not valid UTF-8: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_number() {
        assert_eq!(trailing_number("rId1"), Some(1));
        assert_eq!(trailing_number("rId12"), Some(12));
        assert_eq!(trailing_number("slide1.xml"), Some(1));
        assert_eq!(trailing_number("slide123.xml"), Some(123));
        assert_eq!(trailing_number("ppt/media/image7.png"), Some(7));
        assert_eq!(trailing_number("nodigits"), None);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn test_prefix_of() {
        assert_eq!(prefix_of("a:p"), "a:");
        assert_eq!(prefix_of("p"), "");
    }

    #[test]
    fn test_attributes() {
        let e = BytesStart::from_content(r#"a:off x="10" y="-5" name="A &amp; B""#, 5);
        assert_eq!(attr_num::<i64>(&e, b"x"), Some(10));
        assert_eq!(attr_num::<i64>(&e, b"y"), Some(-5));
        assert_eq!(attr(&e, b"name").as_deref(), Some("A & B"));
        assert_eq!(
            raw_attrs(&e),
            vec![
                ("x".to_string(), "10".to_string()),
                ("y".to_string(), "-5".to_string()),
                ("name".to_string(), "A &amp; B".to_string()),
            ]
        );
    }
}
