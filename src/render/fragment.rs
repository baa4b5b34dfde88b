//! Platform-neutral DOM fragments
//!
//! A [`Fragment`] is a small element tree with attributes and text. Hosts
//! either serialize it with [`Fragment::to_html`] or walk it to build real DOM
//! nodes. Text and attribute values are escaped on serialization, so API data
//! can be passed straight through.

use std::fmt::Write;

/// A child of a fragment element
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Fragment),
    Text(String),
}

/// An element with attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    tag: &'static str,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

/// Elements serialized without a closing tag
const VOID_TAGS: [&str; 4] = ["img", "br", "hr", "input"];

impl Fragment {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder method: set the `class` attribute
    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    /// Builder method: set an attribute, replacing an existing value
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder method: append a text node
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Builder method: append a child element
    pub fn child(mut self, child: Fragment) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Builder method: append several child elements
    pub fn children(mut self, children: impl IntoIterator<Item = Fragment>) -> Self {
        self.children.extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(key, _)| key != name);
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.children
    }

    /// Whether the element carries the given class
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Show or hide the element the way the price filter does (`display: none`)
    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.remove_attr("style");
        } else {
            self.set_attr("style", "display: none");
        }
    }

    pub fn is_visible(&self) -> bool {
        self.get_attr("style") != Some("display: none")
    }

    /// Concatenated text of this element and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) => el.collect_text(out),
            }
        }
    }

    /// Depth-first search for the first descendant (or self) with a class
    pub fn find_by_class(&self, class: &str) -> Option<&Fragment> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|node| match node {
            Node::Element(el) => el.find_by_class(class),
            Node::Text(_) => None,
        })
    }

    /// Serialize to HTML with escaped text and attribute values
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag) {
            return;
        }

        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(&escape(text)),
                Node::Element(el) => el.write_html(out),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Serialize a list of fragments back to back
pub fn to_html(fragments: &[Fragment]) -> String {
    fragments.iter().map(Fragment::to_html).collect()
}

/// Escape text for use in HTML content and double-quoted attributes
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization() {
        let fragment = Fragment::new("div")
            .class("card")
            .attr("data-price", "10")
            .child(Fragment::new("h2").text("Title"))
            .child(Fragment::new("img").attr("src", "a.jpg"));

        assert_eq!(
            fragment.to_html(),
            r#"<div class="card" data-price="10"><h2>Title</h2><img src="a.jpg"></div>"#
        );
    }

    #[test]
    fn test_escaping() {
        let fragment = Fragment::new("p")
            .attr("title", r#"say "hi""#)
            .text("<script>alert('x')</script> & more");

        assert_eq!(
            fragment.to_html(),
            "<p title=\"say &quot;hi&quot;\">&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; more</p>"
        );
    }

    #[test]
    fn test_attr_replacement_and_visibility() {
        let mut fragment = Fragment::new("div").attr("data-price", "1").attr("data-price", "2");
        assert_eq!(fragment.get_attr("data-price"), Some("2"));
        assert_eq!(fragment.attrs().count(), 1);

        assert!(fragment.is_visible());
        fragment.set_visible(false);
        assert!(!fragment.is_visible());
        assert_eq!(fragment.get_attr("style"), Some("display: none"));
        fragment.set_visible(true);
        assert!(fragment.is_visible());
    }

    #[test]
    fn test_find_and_text_content() {
        let fragment = Fragment::new("div")
            .child(Fragment::new("p").class("a b").text("one "))
            .text("two");

        assert_eq!(fragment.text_content(), "one two");
        assert_eq!(fragment.find_by_class("b").map(|f| f.tag()), Some("p"));
        assert!(fragment.find_by_class("c").is_none());
    }
}
