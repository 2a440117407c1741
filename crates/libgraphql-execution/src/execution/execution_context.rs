use crate::ast;
use crate::error::GraphQLError;
use crate::execution::values;
use crate::execution::ExecutableOperation;
use crate::schema::Schema;
use crate::value::JsonMap;
use crate::value::JsonValue;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::PoisonError;

type Result<T> = std::result::Result<T, Vec<GraphQLError>>;

/// Per-request state shared by every field executed for one operation.
///
/// The only thing mutated once the context is built is the error list, which
/// concurrently executing fields append to.
#[derive(Debug)]
pub struct ExecutionContext<'a> {
    pub(crate) context_value: &'a (dyn Any + Send + Sync),
    pub(crate) errors: Mutex<Vec<GraphQLError>>,
    pub(crate) fragments: HashMap<&'a str, &'a ast::query::FragmentDefinition>,
    pub(crate) operation: ExecutableOperation<'a>,
    pub(crate) root_value: &'a JsonValue,
    pub(crate) schema: &'a Schema,
    pub(crate) variable_values: JsonMap,
}
impl<'a> ExecutionContext<'a> {
    /// Selects the operation to execute and coerces the request's variable
    /// values.
    ///
    /// Any error returned here is fatal to the request: no field gets
    /// executed.
    pub(crate) async fn build(
        schema: &'a Schema,
        document: &'a ast::query::Document,
        operation_name: Option<&str>,
        raw_variable_values: &JsonMap,
        root_value: &'a JsonValue,
        context_value: &'a (dyn Any + Send + Sync),
    ) -> Result<Self> {
        let mut operation = None;
        let mut fragments = HashMap::new();
        let mut has_multiple_assumed_operations = false;

        for definition in &document.definitions {
            match definition {
                ast::query::Definition::Operation(operation_def) => {
                    let candidate = ExecutableOperation::from(operation_def);
                    if operation_name.is_none() && operation.is_some() {
                        has_multiple_assumed_operations = true;
                    } else if operation_name.is_none() || candidate.name == operation_name {
                        operation = Some(candidate);
                    }
                },

                ast::query::Definition::Fragment(fragment_def) => {
                    fragments.insert(fragment_def.name.as_str(), fragment_def);
                },
            }
        }

        let operation = match (operation, operation_name) {
            (None, Some(operation_name)) => return Err(vec![GraphQLError::new(format!(
                "Unknown operation named < {operation_name} >.",
            ))]),

            (None, None) => return Err(vec![GraphQLError::new("Must provide an operation.")]),

            (Some(_), _) if has_multiple_assumed_operations =>
                return Err(vec![GraphQLError::new(
                    "Must provide operation name if query contains multiple operations.",
                )]),

            (Some(operation), _) => operation,
        };
        log::debug!(
            "Selected {} operation `{}`",
            operation.kind,
            operation.name.unwrap_or("<anonymous>"),
        );

        if schema.operation_type(operation.kind).is_none() {
            return Err(vec![
                GraphQLError::new(format!(
                    "Schema is not configured to execute < {} > operation.",
                    operation.kind,
                )).with_locations([operation.position]),
            ]);
        }

        let variable_values = values::coerce_variable_values(
            schema,
            operation.variable_definitions,
            raw_variable_values,
        ).await?;

        Ok(Self {
            context_value,
            errors: Mutex::new(vec![]),
            fragments,
            operation,
            root_value,
            schema,
            variable_values,
        })
    }

    pub fn context_value(&self) -> &'a (dyn Any + Send + Sync) {
        self.context_value
    }

    pub fn fragments(&self) -> &HashMap<&'a str, &'a ast::query::FragmentDefinition> {
        &self.fragments
    }

    pub fn operation(&self) -> &ExecutableOperation<'a> {
        &self.operation
    }

    pub(crate) fn record_errors(&self, errors: impl IntoIterator<Item = GraphQLError>) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(errors);
    }

    pub fn root_value(&self) -> &'a JsonValue {
        self.root_value
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Drains every error recorded so far, in the order they were recorded.
    pub(crate) fn take_errors(&self) -> Vec<GraphQLError> {
        std::mem::take(
            &mut *self.errors.lock().unwrap_or_else(PoisonError::into_inner),
        )
    }

    pub fn variable_values(&self) -> &JsonMap {
        &self.variable_values
    }
}
