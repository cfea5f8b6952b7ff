//! Renderable node tree.
//!
//! Views build a [`Node`] tree which is serialized to HTML with
//! [`Node::to_html`]. Text and attribute values are escaped on output; only
//! [`Node::Trusted`] (highlighter output) and [`Node::Static`] (compile-time
//! markup constants) are written verbatim.

use nr_highlight::TrustedHtml;

/// A node in the render tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// HTML element.
    Element(Element),
    /// Text, escaped on output.
    Text(String),
    /// Markup produced by the highlighter, inserted as is.
    Trusted(TrustedHtml),
    /// Markup known at compile time (icons), inserted as is.
    Static(&'static str),
    /// Sequence of sibling nodes without a wrapper element.
    Fragment(Vec<Node>),
}

/// An HTML element with attributes and children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Set the `class` attribute.
    #[must_use]
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Append a child node.
    #[must_use]
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append a text child.
    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Value of attribute `name`, if set.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether the `class` attribute contains `class` as a token.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// First descendant (or self) carrying `class`, depth-first.
    #[must_use]
    pub fn find_class(&self, class: &str) -> Option<&Element> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_class(class))
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<TrustedHtml> for Node {
    fn from(html: TrustedHtml) -> Self {
        Self::Trusted(html)
    }
}

impl Node {
    /// First element in this subtree carrying `class`.
    #[must_use]
    pub fn find_class(&self, class: &str) -> Option<&Element> {
        match self {
            Self::Element(element) => element.find_class(class),
            Self::Fragment(nodes) => nodes.iter().find_map(|node| node.find_class(class)),
            Self::Text(_) | Self::Trusted(_) | Self::Static(_) => None,
        }
    }

    /// Concatenated text of all [`Node::Text`] descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
            Self::Fragment(nodes) => {
                for node in nodes {
                    node.collect_text(out);
                }
            }
            Self::Trusted(_) | Self::Static(_) => {}
        }
    }

    /// Serialize to an HTML string.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// Append HTML for this node to `out`.
    pub fn write_html(&self, out: &mut String) {
        match self {
            Self::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&html_escape::encode_double_quoted_attribute(value));
                    out.push('"');
                }
                out.push('>');
                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(element.tag);
                out.push('>');
            }
            Self::Text(text) => out.push_str(&html_escape::encode_text(text)),
            Self::Trusted(html) => out.push_str(html.as_str()),
            Self::Static(html) => out.push_str(html),
            Self::Fragment(nodes) => {
                for node in nodes {
                    node.write_html(out);
                }
            }
        }
    }
}
