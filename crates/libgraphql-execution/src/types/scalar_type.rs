use crate::ast;
use crate::loc;
use crate::types::DirectiveAnnotation;
use crate::value;
use crate::value::JsonMap;
use crate::value::JsonValue;
use std::sync::Arc;
use thiserror::Error;

/// Failure produced by a [ScalarImplementation].
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ScalarCoercionError {
    /// The value is not valid for the scalar, with no further explanation.
    #[error("invalid value")]
    Invalid,

    #[error("{0}")]
    Message(String),
}
impl ScalarCoercionError {
    pub(crate) fn sub_message(&self) -> Option<&str> {
        match self {
            Self::Invalid => None,
            Self::Message(msg) => Some(msg.as_str()),
        }
    }
}

/// The runtime behavior of a scalar type.
///
/// `coerce_input` turns a raw input value (e.g. a variable value) into the
/// scalar's internal value, `coerce_literal` does the same for a literal
/// written in a document, and `serialize` turns a resolved value into the
/// value placed in the response.
pub trait ScalarImplementation: std::fmt::Debug + Send + Sync {
    fn coerce_input(&self, value: &JsonValue) -> Result<JsonValue, ScalarCoercionError>;

    /// Enum literals are rejected; any other literal is converted to JSON
    /// (substituting nested `variables`) and handed to `coerce_input`.
    fn coerce_literal(
        &self,
        value: &ast::query::Value,
        variables: Option<&JsonMap>,
    ) -> Result<JsonValue, ScalarCoercionError> {
        if let ast::query::Value::Enum(_) = value {
            return Err(ScalarCoercionError::Invalid);
        }
        self.coerce_input(&value::value_from_ast(value, variables).unwrap_or(JsonValue::Null))
    }

    fn serialize(&self, value: &JsonValue) -> Result<JsonValue, ScalarCoercionError>;
}

/// Represents a
/// [scalar type](https://spec.graphql.org/October2021/#sec-Scalars) defined
/// in the schema.
#[derive(Clone, Debug)]
pub struct ScalarType {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) description: Option<String>,
    pub(crate) directives: Vec<DirectiveAnnotation>,
    pub(crate) implementation: Option<Arc<dyn ScalarImplementation>>,
    pub(crate) name: String,
}
impl ScalarType {
    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn directives(&self) -> &[DirectiveAnnotation] {
        self.directives.as_slice()
    }

    pub fn implementation(&self) -> Option<&Arc<dyn ScalarImplementation>> {
        self.implementation.as_ref()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
