//! Implementations of the scalars every schema provides:
//! https://spec.graphql.org/October2021/#sec-Scalars.Built-in-Scalars

use crate::types::ScalarCoercionError;
use crate::types::ScalarImplementation;
use crate::value;
use crate::value::JsonValue;
use std::sync::Arc;

type Result<T> = std::result::Result<T, ScalarCoercionError>;

pub(crate) fn builtin_scalars() -> Vec<(&'static str, Arc<dyn ScalarImplementation>)> {
    let boolean: Arc<dyn ScalarImplementation> = Arc::new(BooleanScalar);
    let float: Arc<dyn ScalarImplementation> = Arc::new(FloatScalar);
    let id: Arc<dyn ScalarImplementation> = Arc::new(IdScalar);
    let int: Arc<dyn ScalarImplementation> = Arc::new(IntScalar);
    let string: Arc<dyn ScalarImplementation> = Arc::new(StringScalar);
    vec![
        ("Boolean", boolean),
        ("Float", float),
        ("ID", id),
        ("Int", int),
        ("String", string),
    ]
}

fn int_from_f64(f: f64) -> Result<JsonValue> {
    if f < i32::MIN as f64 || f > i32::MAX as f64 {
        return Err(ScalarCoercionError::Message(format!(
            "Int cannot represent non 32-bit signed integer value: {f}",
        )));
    }
    Ok(JsonValue::from(f as i32))
}

#[derive(Debug)]
pub struct BooleanScalar;
impl ScalarImplementation for BooleanScalar {
    fn coerce_input(&self, value: &JsonValue) -> Result<JsonValue> {
        match value {
            JsonValue::Bool(_) => Ok(value.clone()),
            other => Err(ScalarCoercionError::Message(format!(
                "Boolean cannot represent a non boolean value: {other}",
            ))),
        }
    }

    fn serialize(&self, value: &JsonValue) -> Result<JsonValue> {
        match value {
            JsonValue::Bool(_) => Ok(value.clone()),
            JsonValue::Number(num) if num.as_f64().is_some_and(f64::is_finite) =>
                Ok(JsonValue::Bool(num.as_f64() != Some(0.0))),
            other => Err(ScalarCoercionError::Message(format!(
                "Boolean cannot represent a non boolean value: {other}",
            ))),
        }
    }
}

#[derive(Debug)]
pub struct FloatScalar;
impl ScalarImplementation for FloatScalar {
    fn coerce_input(&self, value: &JsonValue) -> Result<JsonValue> {
        match value {
            JsonValue::Number(_) => Ok(value.clone()),
            other => Err(ScalarCoercionError::Message(format!(
                "Float cannot represent non numeric value: {other}",
            ))),
        }
    }

    fn serialize(&self, value: &JsonValue) -> Result<JsonValue> {
        match value {
            JsonValue::Number(_) => Ok(value.clone()),
            JsonValue::Bool(b) => Ok(JsonValue::from(if *b { 1.0 } else { 0.0 })),
            JsonValue::String(s) => s.trim().parse::<f64>().ok()
                .and_then(serde_json::Number::from_f64)
                .map(JsonValue::Number)
                .ok_or_else(|| ScalarCoercionError::Message(format!(
                    "Float cannot represent non numeric value: {value}",
                ))),
            other => Err(ScalarCoercionError::Message(format!(
                "Float cannot represent non numeric value: {other}",
            ))),
        }
    }
}

#[derive(Debug)]
pub struct IdScalar;
impl ScalarImplementation for IdScalar {
    fn coerce_input(&self, value: &JsonValue) -> Result<JsonValue> {
        match value {
            JsonValue::String(_) => Ok(value.clone()),
            JsonValue::Number(num) if num.is_i64() || num.is_u64() =>
                Ok(JsonValue::String(num.to_string())),
            other => Err(ScalarCoercionError::Message(format!(
                "ID cannot represent value: {other}",
            ))),
        }
    }

    fn serialize(&self, value: &JsonValue) -> Result<JsonValue> {
        self.coerce_input(value)
    }
}

#[derive(Debug)]
pub struct IntScalar;
impl ScalarImplementation for IntScalar {
    fn coerce_input(&self, value: &JsonValue) -> Result<JsonValue> {
        match value {
            JsonValue::Number(num) => match num.as_i64() {
                Some(i) => int_from_f64(i as f64),
                None => Err(ScalarCoercionError::Message(format!(
                    "Int cannot represent non-integer value: {num}",
                ))),
            },
            other => Err(ScalarCoercionError::Message(format!(
                "Int cannot represent non-integer value: {other}",
            ))),
        }
    }

    fn serialize(&self, value: &JsonValue) -> Result<JsonValue> {
        match value {
            JsonValue::Bool(b) => Ok(JsonValue::from(i32::from(*b))),
            JsonValue::String(s) => match s.trim().parse::<f64>() {
                Ok(f) if f.fract() == 0.0 => int_from_f64(f),
                _ => Err(ScalarCoercionError::Message(format!(
                    "Int cannot represent non-integer value: {value}",
                ))),
            },
            other => match value::as_integral_f64(other) {
                Some(f) => int_from_f64(f),
                None => Err(ScalarCoercionError::Message(format!(
                    "Int cannot represent non-integer value: {other}",
                ))),
            },
        }
    }
}

#[derive(Debug)]
pub struct StringScalar;
impl ScalarImplementation for StringScalar {
    fn coerce_input(&self, value: &JsonValue) -> Result<JsonValue> {
        match value {
            JsonValue::String(_) => Ok(value.clone()),
            other => Err(ScalarCoercionError::Message(format!(
                "String cannot represent a non string value: {other}",
            ))),
        }
    }

    fn serialize(&self, value: &JsonValue) -> Result<JsonValue> {
        match value {
            JsonValue::String(_) => Ok(value.clone()),
            JsonValue::Bool(_) | JsonValue::Number(_) =>
                Ok(JsonValue::String(value.to_string())),
            other => Err(ScalarCoercionError::Message(format!(
                "String cannot represent value: {other}",
            ))),
        }
    }
}
