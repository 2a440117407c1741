use crate::error::ErrorCoercer;
use crate::error::GraphQLError;
use crate::value::JsonMap;
use crate::value::JsonValue;

/// The result of executing a request: `{"data": ..., "errors": [...]}`.
///
/// `data` is always present (`null` when `None`); `errors` is omitted when
/// empty. Each error has already been passed through the engine's
/// [ErrorCoercer].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Response {
    pub data: Option<JsonMap>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonValue>,
}
impl Response {
    pub(crate) fn build(
        error_coercer: &ErrorCoercer,
        data: Option<JsonMap>,
        errors: Vec<GraphQLError>,
    ) -> Self {
        Self {
            data,
            errors: errors.iter().map(|err| error_coercer(err)).collect(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The response as a JSON object, in the exact shape sent to clients.
    pub fn to_json(&self) -> JsonValue {
        let mut response = JsonMap::new();
        response.insert(
            "data".to_string(),
            self.data.clone().map(JsonValue::Object).unwrap_or(JsonValue::Null),
        );
        if !self.errors.is_empty() {
            response.insert("errors".to_string(), JsonValue::Array(self.errors.clone()));
        }
        JsonValue::Object(response)
    }
}
