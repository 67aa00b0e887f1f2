//! Building of single XML elements.

use std::fmt::Display;

use linked_hash_map::LinkedHashMap;

use crate::escape;

/// Attributes of a [`Tag`], serialized in their insertion order.
pub type Attributes = LinkedHashMap<&'static str, String>;

/// Builder of a single XML element rendered into a [`String`].
#[derive(Clone, Debug)]
pub struct Tag<'n> {
    name: &'n str,
    attributes: Attributes,
    content: Option<String>,
    raw: bool,
    self_contained: bool,
}

impl<'n> Tag<'n> {
    /// Starts a new self-contained [`Tag`] with the given `name`.
    #[must_use]
    pub fn new(name: &'n str) -> Self {
        Self {
            name,
            attributes: Attributes::new(),
            content: None,
            raw: false,
            self_contained: true,
        }
    }

    /// Adds an attribute to this [`Tag`].
    ///
    /// Setting an already present `key` replaces its value, but keeps its
    /// position.
    #[must_use]
    pub fn attr(mut self, key: &'static str, value: impl Display) -> Self {
        let value = value.to_string();
        // `LinkedHashMap::insert()` moves an existing key to the back.
        if let Some(existing) = self.attributes.get_mut(key) {
            *existing = value;
        } else {
            _ = self.attributes.insert(key, value);
        }
        self
    }

    /// Replaces all attributes of this [`Tag`].
    #[must_use]
    pub fn attrs(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Sets text content of this [`Tag`], escaped on rendering.
    #[must_use]
    pub fn content(mut self, text: impl Into<String>) -> Self {
        self.content = Some(text.into());
        self.raw = false;
        self
    }

    /// Sets content of this [`Tag`] inserted verbatim, like a CDATA section
    /// or already rendered nested [`Tag`]s.
    #[must_use]
    pub fn raw_content(mut self, markup: impl Into<String>) -> Self {
        self.content = Some(markup.into());
        self.raw = true;
        self
    }

    /// Makes this [`Tag`] render only its opening part, leaving the element
    /// to be closed separately once its children have been written.
    #[must_use]
    pub fn opening(mut self) -> Self {
        self.self_contained = false;
        self
    }

    /// Attributes of this [`Tag`].
    #[must_use]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Renders this [`Tag`].
    ///
    /// A self-contained [`Tag`] ends with its closing tag and a newline.
    #[must_use]
    pub fn build(&self) -> String {
        let mut out = self.open_tag(">");
        if let Some(content) = &self.content {
            if self.raw {
                out.push_str(content);
            } else {
                out.push_str(&escape::attribute(content));
            }
        }
        if self.self_contained {
            out.push_str(&closing(self.name));
        }
        out
    }

    /// Renders this [`Tag`] as an empty element (`<name/>`) followed by a
    /// newline, ignoring any content.
    #[must_use]
    pub fn build_empty(&self) -> String {
        let mut out = self.open_tag("/>");
        out.push('\n');
        out
    }

    fn open_tag(&self, end: &str) -> String {
        let mut out = format!("<{}", self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape::attribute(value));
            out.push('"');
        }
        out.push_str(end);
        out
    }
}

/// Renders a closing tag of the element with the given `name`, followed by a
/// newline.
#[must_use]
pub fn closing(name: &str) -> String {
    format!("</{name}>\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omits_space_without_attributes() {
        assert_eq!(Tag::new("testsuites").opening().build(), "<testsuites>");
        assert_eq!(Tag::new("skipped").build(), "<skipped></skipped>\n");
    }

    #[test]
    fn keeps_attribute_order() {
        let tag = Tag::new("testcase")
            .attr("name", "adds")
            .attr("classname", "Math")
            .attr("time", 0.25);

        assert_eq!(
            tag.build(),
            "<testcase name=\"adds\" classname=\"Math\" time=\"0.25\">\
             </testcase>\n",
        );
    }

    #[test]
    fn replaced_attribute_keeps_position() {
        let tag = Tag::new("a").attr("x", 1).attr("y", 2).attr("x", 3);

        assert_eq!(tag.opening().build(), "<a x=\"3\" y=\"2\">");
    }

    #[test]
    fn escapes_attribute_values() {
        let tag = Tag::new("testsuites").attr("name", "a \"quoted\" <name>");

        assert_eq!(
            tag.opening().build(),
            "<testsuites name=\"a \\x22quoted\\x22 \\x3Cname\\x3E\">",
        );
    }

    #[test]
    fn escapes_content_unless_raw() {
        assert_eq!(
            Tag::new("system-out").content("a < b").build(),
            "<system-out>a \\x3C b</system-out>\n",
        );
        assert_eq!(
            Tag::new("failure").raw_content("<![CDATA[a < b]]>").build(),
            "<failure><![CDATA[a < b]]></failure>\n",
        );
    }

    #[test]
    fn nests_raw_tags() {
        let inner = Tag::new("skipped").build_empty();
        let outer = Tag::new("testcase").attr("name", "x").raw_content(inner);

        assert_eq!(
            outer.build(),
            "<testcase name=\"x\"><skipped/>\n</testcase>\n",
        );
    }

    #[test]
    fn builds_empty_element() {
        assert_eq!(Tag::new("skipped").build_empty(), "<skipped/>\n");
        assert_eq!(
            Tag::new("property").attr("name", "n").build_empty(),
            "<property name=\"n\"/>\n",
        );
    }

    #[test]
    fn accepts_prepared_attributes() {
        let mut attrs = Attributes::new();
        _ = attrs.insert("b", "2".into());
        _ = attrs.insert("a", "1".into());

        assert_eq!(
            Tag::new("x").attrs(attrs).opening().build(),
            "<x b=\"2\" a=\"1\">",
        );
    }
}
