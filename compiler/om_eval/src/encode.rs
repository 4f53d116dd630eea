//! Escaping of evaluated text for embedding in XML output.

/// Escapes the characters XML reserves in character data.
///
/// Substitution is a single left-to-right pass, so an entity inserted for
/// one character is never escaped again: `&` always becomes `&amp;`
/// exactly once.
#[derive(Clone, Copy, Debug, Default)]
pub struct XmlEncoder;

impl XmlEncoder {
    pub fn new() -> Self {
        XmlEncoder
    }

    /// Escape `text`.
    pub fn encode(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        self.encode_into(text, &mut out);
        out
    }

    /// Escape `text`, appending to `out`.
    pub fn encode_into(&self, text: &str, out: &mut String) {
        for c in text.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                _ => out.push(c),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_ampersand_and_less_than() {
        assert_eq!(XmlEncoder.encode("a & b < c"), "a &amp; b &lt; c");
    }

    #[test]
    fn test_ampersand_escaped_once() {
        assert_eq!(XmlEncoder.encode("<<&>>"), "&lt;&lt;&amp;&gt;&gt;");
        assert_eq!(XmlEncoder.encode("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(XmlEncoder.encode("x + 1 = 3"), "x + 1 = 3");
        assert_eq!(XmlEncoder.encode(""), "");
    }

    #[test]
    fn test_encode_into_appends() {
        let mut out = String::from("<OMSTR>");
        XmlEncoder::new().encode_into("1 < 2", &mut out);
        out.push_str("</OMSTR>");
        assert_eq!(out, "<OMSTR>1 &lt; 2</OMSTR>");
    }

    #[test]
    fn test_no_raw_markup_survives() {
        let encoded = XmlEncoder.encode("<a href=\"x&y\">&&<</a>");
        assert!(!encoded.contains('<'));
        assert!(!encoded.contains('>'));
        // every remaining ampersand starts an entity
        for (i, _) in encoded.match_indices('&') {
            let rest = &encoded[i..];
            assert!(rest.starts_with("&amp;") || rest.starts_with("&lt;") || rest.starts_with("&gt;"));
        }
    }
}
