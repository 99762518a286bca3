//! IRCv3 message tag parsing.

use std::collections::BTreeMap;

/// Unescape a tag value from wire format.
///
/// `\:` `\s` `\\` `\r` `\n` map to `;` space `\` CR LF. Any other escaped
/// character stands for itself and a trailing lone backslash is dropped.
pub fn unescape_tag_value(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut iter = value.chars();
    while let Some(c) = iter.next() {
        let r = if c == '\\' {
            match iter.next() {
                Some(':') => ';',
                Some('s') => ' ',
                Some('\\') => '\\',
                Some('r') => '\r',
                Some('n') => '\n',
                Some(c) => c,
                None => break,
            }
        } else {
            c
        };
        unescaped.push(r);
    }
    unescaped
}

/// Parse the tag section of a line (without the leading `@`).
///
/// Keys without a value map to an empty string. Empty entries such as the
/// one produced by a trailing `;` are skipped; later duplicates win.
pub fn parse_tags(section: &str) -> BTreeMap<String, String> {
    section
        .split(';')
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let (key, value) = match entry.split_once('=') {
                Some((key, value)) => (key, unescape_tag_value(value)),
                None => (entry, String::new()),
            };
            (!key.is_empty()).then(|| (key.to_owned(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_combined() {
        let input = "a\\:b\\sc\\\\d\\re\\nf";
        assert_eq!(unescape_tag_value(input), "a;b c\\d\re\nf");
    }

    #[test]
    fn test_unescape_trailing_backslash() {
        assert_eq!(unescape_tag_value("test\\"), "test");
    }

    #[test]
    fn test_unescape_unknown_escape() {
        assert_eq!(unescape_tag_value("a\\xb"), "axb");
    }

    #[test]
    fn test_parse_tags_values_and_flags() {
        let tags = parse_tags("time=2023-01-01T00:00:00.000Z;msgid=abc;+draft/typing");
        assert_eq!(tags.get("time").map(String::as_str), Some("2023-01-01T00:00:00.000Z"));
        assert_eq!(tags.get("msgid").map(String::as_str), Some("abc"));
        assert_eq!(tags.get("+draft/typing").map(String::as_str), Some(""));
    }

    #[test]
    fn test_parse_tags_skips_empty_entries() {
        let tags = parse_tags(";a=1;;=orphan;");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags["a"], "1");
    }

    #[test]
    fn test_parse_tags_unescapes_values() {
        let tags = parse_tags("note=hello\\sworld");
        assert_eq!(tags["note"], "hello world");
    }
}
