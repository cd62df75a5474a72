//! Error types for request compilation and endpoint configuration.

use serde::Serialize;
use std::path::PathBuf;

/// Error returned when a client request cannot be compiled.
///
/// Every variant is a client error: the request is rejected as a whole and no
/// partial query is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CompileError {
    /// The endpoint declares no fields, or the selection is empty after merging required fields.
    #[error("no fields selected")]
    NoFieldsSelected,
    /// A filter token does not match `field<op>value`.
    #[error("the filter `{token}` does not match the allowed structure")]
    FilterStructureInvalid {
        /// The offending token.
        token: String,
    },
    /// A well-formed filter references a field the endpoint does not declare.
    #[error("the filter `{field}` is not allowed")]
    FilterFieldNotAllowed {
        /// The undeclared field.
        field: String,
    },
    /// A sort token does not match `[+|-]field`.
    #[error("the order `{token}` does not match the allowed structure")]
    OrderStructureInvalid {
        /// The offending token.
        token: String,
    },
    /// A well-formed sort token references a field the endpoint does not declare.
    #[error("the order `{field}` is not allowed")]
    OrderFieldNotAllowed {
        /// The undeclared field.
        field: String,
    },
}

impl CompileError {
    /// Stable, machine-readable name of the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NoFieldsSelected => "no_fields_selected",
            Self::FilterStructureInvalid { .. } => "filter_structure_invalid",
            Self::FilterFieldNotAllowed { .. } => "filter_field_not_allowed",
            Self::OrderStructureInvalid { .. } => "order_structure_invalid",
            Self::OrderFieldNotAllowed { .. } => "order_field_not_allowed",
        }
    }

    /// The token or field that caused the rejection, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::NoFieldsSelected => None,
            Self::FilterStructureInvalid { token } | Self::OrderStructureInvalid { token } => {
                Some(token)
            },
            Self::FilterFieldNotAllowed { field } | Self::OrderFieldNotAllowed { field } => {
                Some(field)
            },
        }
    }

    /// HTTP status a request layer should answer with. Always `400`.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        400
    }

    /// Response body for a request layer.
    ///
    /// `verbose` adds the debug rendering of the error under `dev_info`; pass the
    /// service's development flag here and keep it off in production.
    ///
    /// ```
    /// use rest_query::CompileError;
    ///
    /// let err = CompileError::FilterFieldNotAllowed { field: "ghost".into() };
    /// let body = err.to_body(false);
    /// assert_eq!(body.code, 400);
    /// assert_eq!(body.reason.as_deref(), Some("ghost"));
    /// assert!(body.dev_info.is_none());
    /// ```
    pub fn to_body(&self, verbose: bool) -> ErrorBody {
        ErrorBody {
            code: self.status_code(),
            kind: self.kind(),
            message: self.to_string(),
            reason: self.reason().map(str::to_string),
            dev_info: verbose.then(|| format!("{self:?}")),
        }
    }
}

/// Serializable client-facing rendering of a [`CompileError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct ErrorBody {
    /// HTTP status code.
    #[serde(skip)]
    pub code: u16,
    /// Machine-readable kind, see [`CompileError::kind`].
    pub kind: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Offending field or token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Debug details, only present in verbose mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_info: Option<String>,
}

/// Error raised while declaring or loading an endpoint configuration.
///
/// These are startup errors: a process should refuse to serve an endpoint whose
/// declaration fails to validate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Two fields share the same name.
    #[error("field `{name}` is declared more than once")]
    DuplicateField {
        /// The repeated name.
        name: String,
    },
    /// A field name is not a plain identifier.
    #[error(
        "invalid field name `{name}`: must start with letter/underscore, \
         contain only ASCII alphanumeric/underscore, and be 1-63 chars"
    )]
    InvalidFieldName {
        /// The rejected name.
        name: String,
    },
    /// The table expression is empty.
    #[error("table must not be empty")]
    EmptyTable,
    /// `limit_max` is zero.
    #[error("limit_max must be greater than zero")]
    InvalidLimitMax,
    /// The TOML document could not be parsed.
    #[error("invalid endpoint configuration: {0}")]
    Toml(#[from] toml::de::Error),
    /// The configuration file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_display() {
        let err = CompileError::FilterFieldNotAllowed {
            field: "ghost".into(),
        };
        assert_eq!(err.to_string(), "the filter `ghost` is not allowed");

        let err = CompileError::OrderStructureInvalid {
            token: "-na me".into(),
        };
        assert!(err.to_string().contains("-na me"));

        assert_eq!(CompileError::NoFieldsSelected.to_string(), "no fields selected");
    }

    #[test]
    fn test_compile_error_reason_and_kind() {
        let err = CompileError::FilterStructureInvalid {
            token: "name~=\" AND 1;".into(),
        };
        assert_eq!(err.reason(), Some("name~=\" AND 1;"));
        assert_eq!(err.kind(), "filter_structure_invalid");
        assert_eq!(err.status_code(), 400);

        assert_eq!(CompileError::NoFieldsSelected.reason(), None);
        assert_eq!(
            CompileError::OrderFieldNotAllowed {
                field: "secret".into()
            }
            .reason(),
            Some("secret")
        );
    }

    #[test]
    fn test_error_body_verbosity() {
        let err = CompileError::OrderStructureInvalid { token: "-a b".into() };

        let quiet = serde_json::to_value(err.to_body(false)).unwrap();
        assert_eq!(
            quiet,
            serde_json::json!({
                "kind": "order_structure_invalid",
                "message": "the order `-a b` does not match the allowed structure",
                "reason": "-a b",
            })
        );

        let verbose = err.to_body(true);
        assert!(verbose.dev_info.unwrap().contains("OrderStructureInvalid"));

        let body = serde_json::to_value(CompileError::NoFieldsSelected.to_body(false)).unwrap();
        assert!(body.get("reason").is_none());
        assert!(body.get("dev_info").is_none());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::DuplicateField {
            name: "name".into(),
        };
        assert_eq!(err.to_string(), "field `name` is declared more than once");

        let err = ConfigError::InvalidFieldName {
            name: "user name".into(),
        };
        assert!(err.to_string().contains("user name"));
    }
}
