use std::fmt;

use thiserror::Error;

/// Errors raised while turning a specification into Dart source.
///
/// Every variant aborts the whole compilation; nothing is emitted for a
/// specification that fails to compile.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("invalid JSON: {0}")]
    Json(String),

    #[error("{path}: {kind}")]
    Validation { path: String, kind: ValidationKind },

    #[error("{path}: unknown {table} value \"{value}\"")]
    UnknownEnumValue {
        path: String,
        table: &'static str,
        value: String,
    },

    #[error("{path}: route \"{route}\" is not declared in routes")]
    RouteNotFound { path: String, route: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationKind {
    MissingField(String),
    InvalidType { field: String, expected: &'static str },
    InvalidColor(String),
    InvalidSize(String),
    Structure(String),
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationKind::MissingField(field) => write!(f, "missing required field \"{}\"", field),
            ValidationKind::InvalidType { field, expected } => {
                write!(f, "field \"{}\" must be {}", field, expected)
            }
            ValidationKind::InvalidColor(value) => {
                write!(f, "invalid color \"{}\" (expected 6 hex digits)", value)
            }
            ValidationKind::InvalidSize(value) => write!(f, "invalid size \"{}\"", value),
            ValidationKind::Structure(message) => f.write_str(message),
        }
    }
}

/// Failure of a single value conversion, before it is tied to a JSON path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error("invalid color \"{0}\"")]
    InvalidColor(String),

    #[error("invalid size \"{0}\"")]
    InvalidSize(String),

    #[error("unknown {table} value \"{value}\"")]
    UnknownEnumValue { table: &'static str, value: String },
}

impl CompileError {
    pub fn validation(path: impl Into<String>, kind: ValidationKind) -> Self {
        CompileError::Validation {
            path: path.into(),
            kind,
        }
    }

    pub fn structure(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::validation(path, ValidationKind::Structure(message.into()))
    }

    /// Attach the JSON path of the offending value to a conversion failure.
    pub fn at(path: impl Into<String>, err: ConvertError) -> Self {
        let path = path.into();
        match err {
            ConvertError::InvalidColor(value) => {
                Self::validation(path, ValidationKind::InvalidColor(value))
            }
            ConvertError::InvalidSize(value) => {
                Self::validation(path, ValidationKind::InvalidSize(value))
            }
            ConvertError::UnknownEnumValue { table, value } => {
                CompileError::UnknownEnumValue { path, table, value }
            }
        }
    }

    /// JSON path of the offending value, if the error has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            CompileError::Json(_) => None,
            CompileError::Validation { path, .. }
            | CompileError::UnknownEnumValue { path, .. }
            | CompileError::RouteNotFound { path, .. } => Some(path),
        }
    }
}

/// Non-fatal findings reported alongside a successful compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub path: String,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// A widget type outside the closed set; emitted as an empty placeholder.
    UnsupportedWidgetType(String),
    /// An appBar or bottomNavigationBar that did not land in its Scaffold slot.
    IgnoredSlot(String),
    /// Two interactive widgets derived the same state variable name.
    StateCollision(String),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::UnsupportedWidgetType(ty) => write!(
                f,
                "{}: unsupported widget type \"{}\", emitted an empty placeholder",
                self.path, ty
            ),
            WarningKind::IgnoredSlot(ty) => write!(
                f,
                "{}: only the first top-level {} of a page is used, emitted an empty placeholder",
                self.path, ty
            ),
            WarningKind::StateCollision(name) => write!(
                f,
                "{}: state variable `{}` is already declared on this page, the last initializer wins",
                self.path, name
            ),
        }
    }
}
