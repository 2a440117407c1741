use crate::coercion::Path;
use crate::error::GraphQLError;
use crate::loc::SourceLocation;
use crate::value::JsonValue;

/// Outcome of coercing one input value: either a coerced value or the errors
/// that prevented it, never both.
#[derive(Clone, Debug, PartialEq)]
pub struct CoercionResult {
    errors: Vec<GraphQLError>,
    value: Option<JsonValue>,
}
impl CoercionResult {
    pub fn errors(&self) -> &[GraphQLError] {
        self.errors.as_slice()
    }

    pub fn failed(errors: Vec<GraphQLError>) -> Self {
        Self {
            errors,
            value: None,
        }
    }

    pub fn into_result(self) -> Result<JsonValue, Vec<GraphQLError>> {
        match self.value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(self.errors),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Builds a result, discarding `value` when any error was produced.
    pub fn new(value: JsonValue, errors: Vec<GraphQLError>) -> Self {
        if errors.is_empty() {
            Self::ok(value)
        } else {
            Self::failed(errors)
        }
    }

    pub fn ok(value: JsonValue) -> Self {
        Self {
            errors: vec![],
            value: Some(value),
        }
    }

    pub fn value(&self) -> Option<&JsonValue> {
        self.value.as_ref()
    }
}

/// Builds a coercion error message of the form
/// `{message}[ at {path}]{; sub_message | .}`.
pub(crate) fn coercion_error(
    message: impl std::fmt::Display,
    location: Option<SourceLocation>,
    path: Option<&Path>,
    sub_message: Option<&str>,
) -> GraphQLError {
    let mut full_message = message.to_string();
    if let Some(path) = path {
        full_message.push_str(format!(" at {path}").as_str());
    }
    match sub_message {
        Some(sub_message) => {
            full_message.push_str("; ");
            full_message.push_str(sub_message);
        },
        None => full_message.push('.'),
    }
    GraphQLError::new(full_message).with_locations(location)
}
