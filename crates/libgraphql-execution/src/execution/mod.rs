//! The execution pipeline: operation selection and variable coercion
//! ([ExecutionContext]), selection collection, field resolution and value
//! completion.

mod collect;
mod complete;
mod executable_field;
mod execute;
mod execution_context;
mod operation;
mod subscribe;
mod values;

pub use executable_field::ExecutableField;
pub use execution_context::ExecutionContext;
pub use operation::ExecutableOperation;
pub use operation::OperationKind;
pub(crate) use execute::execute_operation;
pub(crate) use subscribe::create_source_event_stream;

#[cfg(test)]
mod tests;
