//! Retained scene graph: the element tree a mounted map leaves behind.

use std::fmt::Write;

/// A child of an element
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// One element with ordered attributes, inline styles and classes
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub tag: String,
    attrs: Vec<(String, String)>,
    styles: Vec<(String, String)>,
    classes: Vec<String>,
    children: Vec<Node>,
}

/// Elements serialized without children as `<tag/>`
const VOID_TAGS: [&str; 2] = ["br", "meta"];

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            styles: Vec::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing an earlier value
    pub fn attr(mut self, name: &str, value: impl ToString) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn set_attr(&mut self, name: &str, value: impl ToString) {
        let value = value.to_string();
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn style(mut self, name: &str, value: impl ToString) -> Self {
        let value = value.to_string();
        match self.styles.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.styles.push((name.to_string(), value)),
        }
        self
    }

    /// Add a class token; empty tokens are ignored
    pub fn class(mut self, token: &str) -> Self {
        for t in token.split_whitespace() {
            if !self.classes.iter().any(|c| c == t) {
                self.classes.push(t.to_string());
            }
        }
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    pub fn get_style(&self, name: &str) -> Option<&str> {
        self.styles.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, token: &str) -> bool {
        self.classes.iter().any(|c| c == token)
    }

    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of this element and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => out.push_str(&e.text_content()),
            }
        }
        out
    }

    /// Depth-first search, this element included
    pub fn find(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        self.elements().find_map(|e| e.find(pred))
    }

    pub fn find_mut(&mut self, pred: &dyn Fn(&Element) -> bool) -> Option<&mut Element> {
        if pred(self) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|n| match n {
            Node::Element(e) => e.find_mut(pred),
            Node::Text(_) => None,
        })
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.find(&|e| e.id() == Some(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.find_mut(&|e| e.id() == Some(id))
    }

    /// Every descendant (and self) with the given tag, in document order
    pub fn find_all<'a>(&'a self, tag: &str) -> Vec<&'a Element> {
        let mut out = Vec::new();
        self.collect(tag, &mut out);
        out
    }

    fn collect<'a>(&'a self, tag: &str, out: &mut Vec<&'a Element>) {
        if self.tag == tag {
            out.push(self);
        }
        for e in self.elements() {
            e.collect(tag, out);
        }
    }

    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, r#" class="{}""#, escape(&self.classes.join(" ")));
        }
        for (name, value) in &self.attrs {
            let _ = write!(out, r#" {name}="{}""#, escape(value));
        }
        if !self.styles.is_empty() {
            let css: Vec<String> = self.styles.iter().map(|(n, v)| format!("{n}: {v};")).collect();
            let _ = write!(out, r#" style="{}""#, escape(&css.join(" ")));
        }

        if self.children.is_empty() && VOID_TAGS.contains(&self.tag.as_str()) {
            out.push_str("/>");
            return;
        }

        out.push('>');
        for node in &self.children {
            match node {
                Node::Element(e) => e.write_markup(out),
                Node::Text(t) => out.push_str(&escape(t)),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Escape text for use in markup content and attribute values
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Development-only stand-in for a map that failed to mount
pub fn error_box(class: &str, message: &str) -> Element {
    Element::new("pre")
        .class(class)
        .attr("role", "alert")
        .style("color", "white")
        .style("background", "#d32f2f")
        .style("padding", "1em")
        .style("white-space", "pre-wrap")
        .text(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_order_and_escaping() {
        let el = Element::new("text")
            .class("labels")
            .attr("x", 10)
            .style("fill", "red")
            .text("Fish & <Chips>");
        assert_eq!(
            el.to_markup(),
            r#"<text class="labels" x="10" style="fill: red;">Fish &amp; &lt;Chips&gt;</text>"#
        );
    }

    #[test]
    fn test_attr_replaces_previous_value() {
        let el = Element::new("path").attr("d", "M0,0").attr("d", "M1,1");
        assert_eq!(el.get_attr("d"), Some("M1,1"));
        assert_eq!(el.to_markup(), r#"<path d="M1,1"></path>"#);
    }

    #[test]
    fn test_find_by_id_mut_appends() {
        let mut root = Element::new("div").child(Element::new("div").attr("id", "map"));
        root.find_by_id_mut("map").unwrap().append(Element::new("svg"));
        assert_eq!(root.find_by_id("map").unwrap().find_all("svg").len(), 1);
        assert!(root.find_by_id("missing").is_none());
    }

    #[test]
    fn test_void_tags() {
        let el = Element::new("div").text("a").child(Element::new("br")).text("b");
        assert_eq!(el.to_markup(), "<div>a<br/>b</div>");
        assert_eq!(el.text_content(), "ab");
    }

    #[test]
    fn test_error_box_carries_message() {
        let el = error_box("err", "overlay x: expected at least 3 features, found 2");
        assert!(el.has_class("err"));
        assert!(el.to_markup().contains("found 2"));
    }
}
