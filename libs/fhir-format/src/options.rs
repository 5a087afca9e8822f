//! Encoding and decoding options.

/// What to do with JSON properties, XML elements and attributes that the
/// catalog does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownFields {
    /// Skip them (logged at trace level).
    #[default]
    Ignore,
    /// Fail with an unknown-field error.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    pub unknown_fields: UnknownFields,
    /// Maximum nesting of complex values and resources.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            unknown_fields: UnknownFields::Ignore,
            max_depth: 128,
        }
    }
}

impl DecodeOptions {
    /// Options that reject unknown fields.
    pub fn strict() -> Self {
        Self {
            unknown_fields: UnknownFields::Reject,
            ..Self::default()
        }
    }
}

/// Indentation for pretty-printed XML.
///
/// Each element starts on its own line with `prefix` followed by `indent`
/// repeated once per nesting level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlIndent {
    pub prefix: String,
    pub indent: String,
}

impl XmlIndent {
    pub fn new(prefix: impl Into<String>, indent: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            indent: indent.into(),
        }
    }
}

impl Default for XmlIndent {
    fn default() -> Self {
        Self::new("", "  ")
    }
}

/// Indentation for pretty-printed JSON.
///
/// Same layout rules as [`XmlIndent`]: `prefix` starts every line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonIndent {
    pub prefix: String,
    pub indent: String,
}

impl JsonIndent {
    pub fn new(prefix: impl Into<String>, indent: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            indent: indent.into(),
        }
    }
}

impl Default for JsonIndent {
    fn default() -> Self {
        Self::new("", "  ")
    }
}
