//! # Text Processing Module
//!
//! ## Purpose
//! Text extraction and normalization for the site search index: flattening
//! whitespace, reducing fetched markup to plain text, pulling out declared
//! page titles, and escaping values for safe display in rendered results.
//!
//! ## Input/Output Specification
//! - **Input**: Raw page text, fetched HTML markup
//! - **Output**: Whitespace-collapsed plain text, extracted titles, escaped
//!   display strings
//!
//! ## Key Features
//! - Unicode NFC normalization and whitespace collapsing
//! - Script/style-aware tag stripping with basic entity decoding
//! - `<title>` extraction with flattening
//! - HTML escaping for rendered output

use crate::errors::{Result, SearchError};
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Text processing pipeline with pre-compiled patterns
pub struct TextProcessor {
    whitespace: Regex,
    embedded_blocks: Regex,
    comments: Regex,
    tags: Regex,
    title: Regex,
}

impl TextProcessor {
    /// Create new text processor
    pub fn new() -> Result<Self> {
        Ok(Self {
            whitespace: compile(r"\s+")?,
            embedded_blocks: compile(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>")?,
            comments: compile(r"(?s)<!--.*?-->")?,
            tags: compile(r"<[^>]+>")?,
            title: compile(r"(?is)<title[^>]*>(.*?)</title\s*>")?,
        })
    }

    /// Collapse every whitespace run to a single space and trim.
    /// Input is NFC-normalized so visually identical text indexes identically.
    pub fn flatten(&self, text: &str) -> String {
        let normalized = text.nfc().collect::<String>();
        self.whitespace
            .replace_all(&normalized, " ")
            .trim()
            .to_string()
    }

    /// Reduce fetched markup to flattened plain text
    pub fn html_to_text(&self, html: &str) -> String {
        let stripped = self.embedded_blocks.replace_all(html, " ");
        let stripped = self.comments.replace_all(&stripped, " ");
        let stripped = self.tags.replace_all(&stripped, " ");
        self.flatten(&decode_entities(&stripped))
    }

    /// Extract the declared `<title>` of a page, flattened.
    /// Returns `None` when the element is absent or empty.
    pub fn extract_title(&self, html: &str) -> Option<String> {
        let captures = self.title.captures(html)?;
        let title = self.flatten(&decode_entities(&captures[1]));
        if title.is_empty() {
            None
        } else {
            Some(title)
        }
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| SearchError::Internal {
        message: format!("Invalid text processing regex: {}", e),
    })
}

/// Decode the handful of entities that matter for indexed body text
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Escape text for safe interpolation into rendered result markup
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processor() -> TextProcessor {
        TextProcessor::new().expect("patterns compile")
    }

    #[test]
    fn test_flatten_collapses_whitespace() {
        let p = processor();
        assert_eq!(p.flatten("  a\t\tb\n\n c  "), "a b c");
        assert_eq!(p.flatten(""), "");
    }

    #[test]
    fn test_html_to_text_strips_markup() {
        let p = processor();
        let html = "<html><head><style>.x { color: red; }</style></head>\
                    <body><h1>Campus   News</h1><script>var x = 1;</script>\
                    <p>Term starts &amp; ends</p><!-- note --></body></html>";
        assert_eq!(p.html_to_text(html), "Campus News Term starts & ends");
    }

    #[test]
    fn test_extract_title() {
        let p = processor();
        let html = "<head><title>  About \n Us </title></head>";
        assert_eq!(p.extract_title(html), Some("About Us".to_string()));
        assert_eq!(p.extract_title("<head></head>"), None);
        assert_eq!(p.extract_title("<title></title>"), None);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Fees & 'aid'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Fees &amp; &#039;aid&#039;&lt;/a&gt;"
        );
    }
}
