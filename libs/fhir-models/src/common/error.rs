//! Error types for FHIR models

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid decimal literal: {0:?}")]
    InvalidDecimal(String),

    #[error("Unknown resource type: {0}")]
    UnknownType(String),

    #[error("Unknown choice variant '{name}' at {path}")]
    UnknownChoiceVariant { path: String, name: String },

    #[error("Unknown field '{name}' at {path}")]
    UnknownField { path: String, name: String },

    #[error("Malformed wire input at {path}: {message}")]
    MalformedWireInput { path: String, message: String },
}

impl Error {
    /// Malformed input whose location is filled in later by [`Error::at`].
    pub fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedWireInput {
            path: String::new(),
            message: message.into(),
        }
    }

    /// Attaches an element path to errors that do not carry one yet.
    pub fn at(self, location: &str) -> Self {
        match self {
            Error::UnknownChoiceVariant { path, name } if path.is_empty() => {
                Error::UnknownChoiceVariant {
                    path: location.to_string(),
                    name,
                }
            }
            Error::UnknownField { path, name } if path.is_empty() => Error::UnknownField {
                path: location.to_string(),
                name,
            },
            Error::MalformedWireInput { path, message } if path.is_empty() => {
                Error::MalformedWireInput {
                    path: location.to_string(),
                    message,
                }
            }
            other => other,
        }
    }

    /// Element path the error refers to, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::UnknownChoiceVariant { path, .. }
            | Error::UnknownField { path, .. }
            | Error::MalformedWireInput { path, .. } => Some(path),
            Error::InvalidDecimal(_) | Error::UnknownType(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_fills_only_missing_paths() {
        let err = Error::malformed("expected a string").at("Patient.gender");
        assert_eq!(err.path(), Some("Patient.gender"));

        let err = err.at("Patient");
        assert_eq!(err.path(), Some("Patient.gender"));
    }

    #[test]
    fn unknown_type_carries_name() {
        let err = Error::UnknownType("UnknownResource".into());
        assert!(err.to_string().contains("UnknownResource"));
        assert_eq!(err.path(), None);
    }
}
