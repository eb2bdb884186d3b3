// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Minimal indenting XML writer.

/// Output options for [`XmlWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterOptions {
    /// Spaces per nesting level; 0 writes everything on one line.
    pub indent: usize,
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>` first.
    pub declaration: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            declaration: false,
        }
    }
}

impl WriterOptions {
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }
}

/// Streaming writer producing a `String`.
///
/// Start tags are closed lazily so childless elements come out as `<tag/>`.
pub struct XmlWriter {
    out: String,
    options: WriterOptions,
    open: Vec<String>,
    start_pending: bool,
}

impl XmlWriter {
    #[must_use]
    pub fn new(options: WriterOptions) -> Self {
        let mut out = String::new();
        if options.declaration {
            out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
        }
        Self {
            out,
            options,
            open: Vec::new(),
            start_pending: false,
        }
    }

    /// Open `tag`; children follow until the matching [`end`](Self::end).
    pub fn start(&mut self, tag: &str, attributes: &[(&str, &str)]) {
        self.close_pending();
        self.newline();
        self.write_start(tag, attributes);
        self.open.push(tag.to_string());
        self.start_pending = true;
    }

    /// Close the innermost open element.
    pub fn end(&mut self) {
        let Some(tag) = self.open.pop() else {
            return;
        };
        if self.start_pending {
            self.out.push_str("/>");
            self.start_pending = false;
            return;
        }
        self.newline();
        self.out.push_str("</");
        self.out.push_str(&tag);
        self.out.push('>');
    }

    /// Element holding only `text`; empty text writes `<tag/>`.
    pub fn text_element(&mut self, tag: &str, attributes: &[(&str, &str)], text: &str) {
        self.close_pending();
        self.newline();
        self.write_start(tag, attributes);
        if text.is_empty() {
            self.out.push_str("/>");
            return;
        }
        self.out.push('>');
        escape_into(&mut self.out, text, false);
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
    }

    /// Childless element.
    pub fn empty_element(&mut self, tag: &str) {
        self.text_element(tag, &[], "");
    }

    /// Close everything still open and return the document.
    pub fn finish(mut self) -> String {
        while !self.open.is_empty() {
            self.end();
        }
        if self.options.indent > 0 {
            self.out.push('\n');
        }
        self.out
    }

    fn write_start(&mut self, tag: &str, attributes: &[(&str, &str)]) {
        self.out.push('<');
        self.out.push_str(tag);
        for (name, value) in attributes {
            self.out.push(' ');
            self.out.push_str(name);
            self.out.push_str("=\"");
            escape_into(&mut self.out, value, true);
            self.out.push('"');
        }
    }

    fn close_pending(&mut self) {
        if self.start_pending {
            self.out.push('>');
            self.start_pending = false;
        }
    }

    fn newline(&mut self) {
        if self.options.indent == 0 || self.out.is_empty() {
            return;
        }
        self.out.push('\n');
        for _ in 0..self.open.len() * self.options.indent {
            self.out.push(' ');
        }
    }
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' if attribute => out.push_str("&quot;"),
            '\r' => out.push_str("&#13;"),
            '\n' if attribute => out.push_str("&#10;"),
            '\t' if attribute => out.push_str("&#9;"),
            c => out.push(c),
        }
    }
}

/// Characters XML 1.0 allows in text content.
pub fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
        || matches!(c, '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}')
        || c >= '\u{10000}'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_output() {
        let mut w = XmlWriter::new(WriterOptions::default());
        w.start("order", &[]);
        w.text_element("label", &[], "a < b & c");
        w.start("lines", &[("class", "list")]);
        w.empty_element("null");
        w.end();
        w.start("empty", &[]);
        w.end();
        w.end();
        let expected = "<order>\n  <label>a &lt; b &amp; c</label>\n  <lines class=\"list\">\n    <null/>\n  </lines>\n  <empty/>\n</order>\n";
        assert_eq!(w.finish(), expected);
    }

    #[test]
    fn test_compact_with_declaration() {
        let options = WriterOptions::default().with_indent(0).with_declaration(true);
        let mut w = XmlWriter::new(options);
        w.start("a", &[("q", "\"x\"")]);
        w.text_element("b", &[], "1");
        let out = w.finish();
        assert_eq!(
            out,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><a q=\"&quot;x&quot;\"><b>1</b></a>"
        );
    }

    #[test]
    fn test_xml_chars() {
        assert!(is_xml_char('a'));
        assert!(is_xml_char('\n'));
        assert!(!is_xml_char('\0'));
        assert!(!is_xml_char('\u{1}'));
        assert!(!is_xml_char('\u{FFFE}'));
    }
}
