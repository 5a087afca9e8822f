//! Errors produced by the wire codecs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error(transparent)]
    Model(#[from] fhirwire_models::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("XML write error: {0}")]
    XmlWrite(#[from] quick_xml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl FormatError {
    /// Input that is not well-formed JSON/XML or does not fit the model.
    pub fn is_malformed(&self) -> bool {
        match self {
            FormatError::Json(_) | FormatError::Xml(_) | FormatError::Utf8(_) => true,
            FormatError::Model(err) => matches!(
                err,
                fhirwire_models::Error::MalformedWireInput { .. }
                    | fhirwire_models::Error::InvalidDecimal(_)
            ),
            FormatError::XmlWrite(_) | FormatError::Io(_) => false,
        }
    }

    /// The unrecognized resource type name, for unknown-type failures.
    pub fn unknown_type(&self) -> Option<&str> {
        match self {
            FormatError::Model(fhirwire_models::Error::UnknownType(name)) => Some(name),
            _ => None,
        }
    }

    /// Element path attached to a decoding failure.
    pub fn path(&self) -> Option<&str> {
        match self {
            FormatError::Model(err) => err.path(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FormatError>;
