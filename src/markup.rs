//! HTML fragment builder on top of quick-xml.
//!
//! Every view is composed from small functions that each write one
//! fragment into a shared [`Markup`] buffer. Nesting is expressed with
//! closures, so the open/close tags of an element always pair up and
//! text content is escaped at the single point where it enters the
//! document.
//!
//! # Example
//!
//! ```ignore
//! let mut m = Markup::new();
//! m.elem("div", &[("class", "paper-title")], |m| {
//!     m.text_elem("a", &[("href", url)], title)
//! })?;
//! let html = m.into_string()?;
//! ```

use anyhow::Result;
use quick_xml::{
    Writer,
    events::{BytesEnd, BytesStart, BytesText, Event},
};
use std::io::Cursor;

/// Buffered HTML writer used by all page composers.
pub struct Markup {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl Markup {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(Cursor::new(Vec::new())),
        }
    }

    /// Consume the builder and return the written fragment.
    pub fn into_string(self) -> Result<String> {
        let bytes = self.writer.into_inner().into_inner();
        Ok(String::from_utf8(bytes)?)
    }

    /// Write `<tag attrs...>`, run `body`, then write `</tag>`.
    ///
    /// An empty body still produces an explicit close tag, which HTML
    /// requires for non-void elements like `iframe` and `div`.
    pub fn elem<F>(&mut self, tag: &str, attrs: &[(&str, &str)], body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.writer.write_event(Event::Start(start_tag(tag, attrs)))?;
        body(self)?;
        self.writer.write_event(Event::End(BytesEnd::new(tag)))?;
        Ok(())
    }

    /// Write a void element: `<tag attrs.../>`.
    pub fn leaf(&mut self, tag: &str, attrs: &[(&str, &str)]) -> Result<()> {
        self.writer.write_event(Event::Empty(start_tag(tag, attrs)))?;
        Ok(())
    }

    /// Write escaped text content.
    pub fn text(&mut self, text: &str) -> Result<()> {
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    /// Write `<tag attrs...>text</tag>` with escaped text.
    pub fn text_elem(&mut self, tag: &str, attrs: &[(&str, &str)], text: &str) -> Result<()> {
        self.elem(tag, attrs, |m| m.text(text))
    }

    /// Write pre-formed markup verbatim (trusted input).
    ///
    /// Used for authored rich-text fields like bio paragraphs and the
    /// teaching intro, which may carry inline tags of their own.
    pub fn raw(&mut self, html: &str) -> Result<()> {
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(html)))?;
        Ok(())
    }

    /// Write `<!DOCTYPE ...>`.
    pub fn doctype(&mut self, content: &str) -> Result<()> {
        self.writer
            .write_event(Event::DocType(BytesText::from_escaped(content)))?;
        Ok(())
    }
}

fn start_tag<'a>(tag: &'a str, attrs: &[(&str, &str)]) -> BytesStart<'a> {
    let mut elem = BytesStart::new(tag);
    for (k, v) in attrs {
        elem.push_attribute((*k, *v));
    }
    elem
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F>(body: F) -> String
    where
        F: FnOnce(&mut Markup) -> Result<()>,
    {
        let mut m = Markup::new();
        body(&mut m).unwrap();
        m.into_string().unwrap()
    }

    #[test]
    fn test_elem_nests() {
        let html = render(|m| {
            m.elem("div", &[("class", "outer")], |m| {
                m.text_elem("p", &[], "hi")
            })
        });
        assert_eq!(html, r#"<div class="outer"><p>hi</p></div>"#);
    }

    #[test]
    fn test_empty_elem_keeps_close_tag() {
        let html = render(|m| m.elem("iframe", &[("src", "/cv.pdf")], |_| Ok(())));
        assert_eq!(html, r#"<iframe src="/cv.pdf"></iframe>"#);
    }

    #[test]
    fn test_leaf_self_closes() {
        let html = render(|m| m.leaf("img", &[("src", "/a.png"), ("alt", "logo")]));
        assert_eq!(html, r#"<img src="/a.png" alt="logo"/>"#);
    }

    #[test]
    fn test_text_is_escaped() {
        let html = render(|m| m.text_elem("p", &[], "a < b & c"));
        assert_eq!(html, "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_attribute_is_escaped() {
        let html = render(|m| m.leaf("img", &[("alt", r#"say "hi""#)]));
        assert_eq!(html, r#"<img alt="say &quot;hi&quot;"/>"#);
    }

    #[test]
    fn test_raw_passes_through() {
        let html = render(|m| {
            m.elem("div", &[], |m| m.raw("<strong>bold</strong>"))
        });
        assert_eq!(html, "<div><strong>bold</strong></div>");
    }

    #[test]
    fn test_doctype() {
        let html = render(|m| {
            m.doctype("html")?;
            m.elem("html", &[], |_| Ok(()))
        });
        assert_eq!(html, "<!DOCTYPE html><html></html>");
    }
}
