mod coercion_result;
mod input_coercer;
mod path;

pub(crate) use coercion_result::coercion_error;
pub use coercion_result::CoercionResult;
pub use input_coercer::InputCoercer;
pub use path::Path;
pub use path::PathKey;

#[cfg(test)]
mod tests;
