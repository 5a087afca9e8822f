//! XML to model.

use super::FHIR_NS;
use crate::error::Result;
use crate::options::{DecodeOptions, UnknownFields};
use crate::path::ElementPath;
use fhirwire_models::{
    Companion, Complex, Decimal, Error, Extension, FieldKind, ItemDecoder, PrimitiveType, Registry,
    Resource, ScalarValue, WireName,
};
use roxmltree::{Document, Node};
use std::collections::HashMap;

/// Decodes FHIR XML against a registry.
#[derive(Debug, Clone)]
pub struct XmlDecoder<'r> {
    registry: &'r Registry,
    options: DecodeOptions,
}

impl<'r> XmlDecoder<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            options: DecodeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn decode_slice(&self, bytes: &[u8]) -> Result<Resource> {
        let text = std::str::from_utf8(bytes)?;
        self.decode_str(text)
    }

    pub fn decode_str(&self, text: &str) -> Result<Resource> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let document = Document::parse(text)?;
        let root = document.root_element();

        let mut walker = Walker {
            registry: self.registry,
            options: &self.options,
            source: text,
            path: ElementPath::default(),
            depth: 0,
        };
        match root.tag_name().namespace() {
            None | Some(FHIR_NS) => {}
            Some(other) => {
                return Err(Error::malformed(format!("unexpected root namespace {other}"))
                    .at(root.tag_name().name())
                    .into())
            }
        }

        let resource = walker.resource(root)?;
        tracing::debug!(
            resource_type = resource.resource_type(),
            format = "xml",
            "decoded resource"
        );
        Ok(resource)
    }
}

/// Decoding state for one document.
struct Walker<'a, 'input> {
    registry: &'a Registry,
    options: &'a DecodeOptions,
    source: &'input str,
    path: ElementPath,
    depth: usize,
}

impl<'input> Walker<'_, 'input> {
    fn malformed(&self, message: impl Into<String>) -> Error {
        Error::malformed(message).at(&self.path.to_string())
    }

    fn resource(&mut self, node: Node<'_, 'input>) -> std::result::Result<Resource, Error> {
        let name = node.tag_name().name();
        let mut resource = self.registry.construct(name)?;
        self.path.push_field(name);
        self.element(node, resource.as_complex_mut())?;
        self.path.pop();
        Ok(resource)
    }

    fn element(
        &mut self,
        node: Node<'_, 'input>,
        target: &mut dyn Complex,
    ) -> std::result::Result<(), Error> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(self.malformed(format!(
                "nesting deeper than {} levels",
                self.options.max_depth
            )));
        }
        let info = target.type_info();

        for attribute in node.attributes() {
            if attribute.namespace().is_some() {
                continue;
            }
            let name = attribute.name();
            let field = match info.field(name) {
                Some(field) if field.kind == FieldKind::Attribute => field,
                _ => {
                    self.unknown(&format!("@{name}"))?;
                    continue;
                }
            };
            let slot = target
                .field_mut(field.name)
                .ok_or_else(|| self.malformed("field missing from model"))?;
            let mut item = XmlItem {
                walker: self,
                source: Source::Attribute(attribute.value()),
                inline: false,
            };
            let result = slot.decode_item(None, &mut item);
            result.map_err(|err| err.at(&self.path.to_string()))?;
        }

        let mut seen: HashMap<&'static str, usize> = HashMap::new();
        for child in node.children() {
            if child.is_text() {
                if child.text().is_some_and(|t| !t.trim().is_empty()) {
                    return Err(self.malformed("unexpected text content"));
                }
                continue;
            }
            if !child.is_element() {
                continue;
            }

            let name = child.tag_name().name();
            let (field, variant) = match info.resolve(name) {
                WireName::Field(field) if field.kind != FieldKind::Attribute => (field, None),
                WireName::Choice(field, variant) => (field, Some(variant.suffix)),
                WireName::UnknownVariant(_) => {
                    return Err(Error::UnknownChoiceVariant {
                        path: self.path.to_string(),
                        name: name.to_string(),
                    })
                }
                _ => match info.inline_resource_field() {
                    Some(field) if self.registry.contains(name) => (field, None),
                    // Element names are lowerCamel; an UpperCamel child in an
                    // inline slot can only be a resource.
                    Some(_) if name.starts_with(|c: char| c.is_ascii_uppercase()) => {
                        return Err(Error::UnknownType(name.to_string()));
                    }
                    _ => {
                        self.unknown(name)?;
                        continue;
                    }
                },
            };

            let index = seen.entry(field.name).or_default();
            self.path.push_field(field.name);
            if field.repeated {
                self.path.push_index(*index);
            }
            *index += 1;

            let slot = target
                .field_mut(field.name)
                .ok_or_else(|| self.malformed("field missing from model"))?;
            let mut item = XmlItem {
                walker: self,
                source: Source::Element(child),
                inline: field.kind == FieldKind::InlineResource,
            };
            let result = slot.decode_item(variant, &mut item);
            result.map_err(|err| err.at(&self.path.to_string()))?;

            if field.repeated {
                self.path.pop();
            }
            self.path.pop();
        }

        self.depth -= 1;
        Ok(())
    }

    /// `value`/`id` attributes and `<extension>` children of a primitive element.
    fn primitive(
        &mut self,
        node: Node<'_, 'input>,
        ty: PrimitiveType,
    ) -> std::result::Result<(Option<ScalarValue>, Option<Companion>), Error> {
        let mut value = None;
        let mut companion = Companion::default();

        for attribute in node.attributes() {
            if attribute.namespace().is_some() {
                continue;
            }
            match attribute.name() {
                "value" => value = Some(scalar(ty, attribute.value())?),
                "id" => companion.id = Some(attribute.value().to_string()),
                other => self.unknown(&format!("@{other}"))?,
            }
        }

        for child in node.children() {
            if child.is_text() {
                if child.text().is_some_and(|t| !t.trim().is_empty()) {
                    return Err(self.malformed("unexpected text content in a primitive"));
                }
                continue;
            }
            if !child.is_element() {
                continue;
            }
            match child.tag_name().name() {
                "extension" => {
                    self.path.push_field("extension");
                    self.path.push_index(companion.extension.len());
                    let mut extension = Extension::default();
                    self.element(child, &mut extension)?;
                    companion.extension.push(extension);
                    self.path.pop();
                    self.path.pop();
                }
                other => self.unknown(other)?,
            }
        }

        let companion = (!companion.is_empty()).then_some(companion);
        Ok((value, companion))
    }

    fn unknown(&self, name: &str) -> std::result::Result<(), Error> {
        match self.options.unknown_fields {
            UnknownFields::Reject => Err(Error::UnknownField {
                path: self.path.to_string(),
                name: name.to_string(),
            }),
            UnknownFields::Ignore => {
                tracing::trace!(field = name, path = %self.path, "ignoring unknown XML content");
                Ok(())
            }
        }
    }
}

enum Source<'a, 'input> {
    Element(Node<'a, 'input>),
    Attribute(&'a str),
}

/// One XML element or attribute offered to the model.
struct XmlItem<'w, 'r, 'a, 'input> {
    walker: &'w mut Walker<'r, 'input>,
    source: Source<'a, 'input>,
    /// The element may be the resource itself rather than a wrapper.
    inline: bool,
}

impl<'a, 'input> XmlItem<'_, '_, 'a, 'input> {
    fn node(&self) -> std::result::Result<Node<'a, 'input>, Error> {
        match self.source {
            Source::Element(node) => Ok(node),
            Source::Attribute(_) => Err(Error::malformed("expected an element, found an attribute")),
        }
    }
}

impl ItemDecoder for XmlItem<'_, '_, '_, '_> {
    fn primitive(
        &mut self,
        ty: PrimitiveType,
    ) -> std::result::Result<(Option<ScalarValue>, Option<Companion>), Error> {
        let node = self.node()?;
        self.walker.primitive(node, ty)
    }

    fn complex(&mut self, target: &mut dyn Complex) -> std::result::Result<(), Error> {
        let node = self.node()?;
        self.walker.element(node, target)
    }

    fn resource(&mut self) -> std::result::Result<Resource, Error> {
        let node = self.node()?;
        if self.inline && self.walker.registry.contains(node.tag_name().name()) {
            return self.walker.resource(node);
        }

        let mut children = node.children().filter(Node::is_element);
        match (children.next(), children.next()) {
            (Some(child), None) => self.walker.resource(child),
            (None, _) => Err(Error::malformed("expected a resource element")),
            (Some(_), Some(_)) => Err(Error::malformed("expected exactly one resource element")),
        }
    }

    fn text(&mut self) -> std::result::Result<String, Error> {
        match self.source {
            Source::Attribute(value) => Ok(value.to_string()),
            Source::Element(node) => Ok(self.walker.source[node.range()].to_string()),
        }
    }
}

fn scalar(ty: PrimitiveType, text: &str) -> std::result::Result<ScalarValue, Error> {
    match ty {
        PrimitiveType::Boolean => match text {
            "true" => Ok(ScalarValue::Boolean(true)),
            "false" => Ok(ScalarValue::Boolean(false)),
            _ => Err(Error::malformed(format!("invalid boolean {text:?}"))),
        },
        PrimitiveType::Integer => text
            .parse()
            .map(ScalarValue::Integer)
            .map_err(|_| Error::malformed(format!("invalid integer {text:?}"))),
        PrimitiveType::Decimal => Decimal::parse(text).map(ScalarValue::Decimal),
        PrimitiveType::String => Ok(ScalarValue::String(text.to_string())),
    }
}
