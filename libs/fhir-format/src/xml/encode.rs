//! Model to XML.

use super::{FHIR_NS, XML_DECLARATION};
use crate::error::Result;
use crate::options::XmlIndent;
use fhirwire_models::{Companion, Complex, FieldInfo, FieldKind, ItemRef, Resource, Scalar};
use quick_xml::escape::escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Streams one resource document.
///
/// Indentation is written by hand so that raw narrative markup and
/// self-closing elements come out exactly as intended.
pub(crate) struct XmlEncoder<'i> {
    writer: Writer<Vec<u8>>,
    indent: Option<&'i XmlIndent>,
    depth: usize,
}

impl<'i> XmlEncoder<'i> {
    pub fn new(indent: Option<&'i XmlIndent>) -> Self {
        Self {
            writer: Writer::new(Vec::new()),
            indent,
            depth: 0,
        }
    }

    pub fn write_document(mut self, resource: &Resource) -> Result<Vec<u8>> {
        self.raw(XML_DECLARATION)?;
        self.raw("\n")?;
        if let Some(indent) = self.indent {
            self.raw(&indent.prefix)?;
        }

        let name = resource.resource_type();
        let mut root = BytesStart::new(name);
        root.push_attribute(("xmlns", FHIR_NS));
        self.element(root, name, resource.as_complex(), true)?;
        Ok(self.writer.into_inner())
    }

    fn element(
        &mut self,
        mut start: BytesStart<'_>,
        name: &str,
        value: &dyn Complex,
        root: bool,
    ) -> Result<()> {
        let info = value.type_info();
        let mut has_children = false;
        for field in info.fields {
            let Some(slot) = value.field(field.name) else {
                continue;
            };
            let items = slot.items();
            if field.kind == FieldKind::Attribute {
                for item in items {
                    if let ItemRef::Attribute(text) = item {
                        push_attribute(&mut start, field.name, text);
                    }
                }
            } else if !items.is_empty() {
                has_children = true;
            }
        }

        if !has_children {
            return self.write(Event::Empty(start), !root);
        }

        self.write(Event::Start(start), !root)?;
        self.depth += 1;
        for field in info.fields {
            if field.kind == FieldKind::Attribute {
                continue;
            }
            let Some(slot) = value.field(field.name) else {
                continue;
            };
            let wire = field.wire_name(slot.variant());
            for item in slot.items() {
                self.item(&wire, field, item)?;
            }
        }
        self.depth -= 1;
        self.write(Event::End(BytesEnd::new(name)), true)
    }

    fn item(&mut self, name: &str, field: &FieldInfo, item: ItemRef<'_>) -> Result<()> {
        match item {
            ItemRef::Primitive { value, companion } => self.primitive(name, value, companion),
            ItemRef::Complex(complex) => self.element(BytesStart::new(name), name, complex, false),
            ItemRef::Resource(resource) if field.kind == FieldKind::InlineResource => {
                self.resource(resource)
            }
            ItemRef::Resource(resource) => {
                self.write(Event::Start(BytesStart::new(name)), true)?;
                self.depth += 1;
                self.resource(resource)?;
                self.depth -= 1;
                self.write(Event::End(BytesEnd::new(name)), true)
            }
            ItemRef::Xhtml(markup) => {
                self.line_break()?;
                self.raw(markup)
            }
            // written on the parent's start tag
            ItemRef::Attribute(_) => Ok(()),
        }
    }

    fn resource(&mut self, resource: &Resource) -> Result<()> {
        let name = resource.resource_type();
        self.element(BytesStart::new(name), name, resource.as_complex(), false)
    }

    fn primitive(
        &mut self,
        name: &str,
        value: Option<Scalar<'_>>,
        companion: Option<&Companion>,
    ) -> Result<()> {
        let mut start = BytesStart::new(name);
        let id = companion.and_then(|c| c.id.as_deref());
        if let Some(id) = id {
            push_attribute(&mut start, "id", id);
        }
        if let Some(value) = value {
            push_attribute(&mut start, "value", &value.to_text());
        }

        // Only a bare value self-closes; an id or extensions force an end tag.
        let extensions = companion.map(|c| c.extension.as_slice()).unwrap_or_default();
        if extensions.is_empty() && id.is_none() {
            return self.write(Event::Empty(start), true);
        }

        self.write(Event::Start(start), true)?;
        self.depth += 1;
        for extension in extensions {
            self.element(BytesStart::new("extension"), "extension", extension, false)?;
        }
        self.depth -= 1;
        self.write(Event::End(BytesEnd::new(name)), !extensions.is_empty())
    }

    fn write(&mut self, event: Event<'_>, break_line: bool) -> Result<()> {
        if break_line {
            self.line_break()?;
        }
        self.writer.write_event(event)?;
        Ok(())
    }

    fn line_break(&mut self) -> Result<()> {
        let Some(indent) = self.indent else {
            return Ok(());
        };
        let mut whitespace = String::with_capacity(1 + indent.prefix.len() + indent.indent.len() * self.depth);
        whitespace.push('\n');
        whitespace.push_str(&indent.prefix);
        for _ in 0..self.depth {
            whitespace.push_str(&indent.indent);
        }
        self.raw(&whitespace)
    }

    /// Writes text that is already valid markup.
    fn raw(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(text)))?;
        Ok(())
    }
}

/// Adds an attribute, escaping markup characters and line breaks.
fn push_attribute(start: &mut BytesStart<'_>, key: &str, value: &str) {
    let escaped = escape(value)
        .replace('\n', "&#xA;")
        .replace('\r', "&#xD;")
        .replace('\t', "&#x9;");
    start.push_attribute((key.as_bytes(), escaped.as_bytes()));
}
