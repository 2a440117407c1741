use crate::ast;

/// Runtime representation of every input, resolved and response value.
pub type JsonValue = serde_json::Value;

/// Ordered string-keyed JSON object (insertion order is preserved).
pub type JsonMap = serde_json::Map<String, JsonValue>;

/// Converts an AST literal into its raw, untyped JSON form, substituting
/// variable references from `variables`.
///
/// Returns `None` when the literal is (or is entirely made of) a reference
/// to a variable that has no runtime value. Nested references to missing
/// variables are dropped from objects and become `null` inside lists. Enum
/// literals become strings.
///
/// Literals written against a known input type go through
/// [InputCoercer::coerce_literal](crate::coercion::InputCoercer::coerce_literal)
/// instead; this conversion backs SDL directive arguments and scalar
/// literals.
pub fn value_from_ast(
    value: &ast::query::Value,
    variables: Option<&JsonMap>,
) -> Option<JsonValue> {
    use ast::query::Value;
    Some(match value {
        Value::Variable(var_name) =>
            return variables.and_then(|vars| vars.get(var_name)).cloned(),

        Value::Boolean(b) => JsonValue::Bool(*b),

        Value::Enum(name) => JsonValue::String(name.to_string()),

        Value::Float(f) =>
            serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),

        Value::Int(num) => match num.as_i64() {
            Some(i) => JsonValue::from(i),
            None => JsonValue::Null,
        },

        Value::List(items) => JsonValue::Array(
            items.iter()
                .map(|item| value_from_ast(item, variables).unwrap_or(JsonValue::Null))
                .collect(),
        ),

        Value::Null => JsonValue::Null,

        Value::Object(fields) => JsonValue::Object(
            fields.iter()
                .filter_map(|(name, field_value)| {
                    value_from_ast(field_value, variables)
                        .map(|v| (name.to_string(), v))
                })
                .collect(),
        ),

        Value::String(s) => JsonValue::String(s.to_string()),
    })
}

/// Indicates whether a JSON value is an integral number (e.g. `3` or
/// `3.0`).
pub(crate) fn as_integral_f64(value: &JsonValue) -> Option<f64> {
    let f = value.as_f64()?;
    (f.is_finite() && f.fract() == 0.0).then_some(f)
}
