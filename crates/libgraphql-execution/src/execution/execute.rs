use crate::error::GraphQLError;
use crate::error::ResponsePath;
use crate::execution::collect;
use crate::execution::collect::CollectedFields;
use crate::execution::complete;
use crate::execution::values;
use crate::execution::ExecutableField;
use crate::execution::ExecutionContext;
use crate::resolver::ResolveInfo;
use crate::resolver::ResolveParams;
use crate::types::ObjectType;
use crate::value::JsonMap;
use crate::value::JsonValue;
use futures::future::BoxFuture;

/// Marker for a `null` that must propagate to the nearest nullable
/// ancestor. The error that caused it has already been recorded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PropagateNull;

pub(crate) type FieldResult = Result<JsonValue, PropagateNull>;

/// Executes the selected operation against `root_value`, returning the
/// response `data` (`None` when it is `null`). Errors are recorded on the
/// execution context.
pub(crate) async fn execute_operation<'a>(
    ctx: &'a ExecutionContext<'a>,
    root_value: &'a JsonValue,
) -> Option<JsonMap> {
    let Some(root_type) = ctx.schema.operation_type(ctx.operation.kind) else {
        ctx.record_errors([GraphQLError::new(format!(
            "Schema is not configured to execute < {} > operation.",
            ctx.operation.kind,
        ))]);
        return None;
    };

    let (fields, collection_errors) = collect::collect_fields(
        ctx,
        root_type,
        [ctx.operation.selection_set],
        &ResponsePath::root(),
    ).await;
    if !collection_errors.is_empty() {
        ctx.record_errors(collection_errors);
        return None;
    }
    if fields.is_empty() {
        return None;
    }

    let mut errors = vec![];
    let data = execute_fields(
        ctx,
        root_type,
        root_value,
        fields,
        ctx.operation.allow_parallelization(),
        &mut errors,
    ).await;
    ctx.record_errors(errors);
    data.ok()
}

/// Executes every collected field of `parent_type` against `parent_value`.
///
/// Fields run concurrently when `parallel` is set and strictly one after the
/// other (in collection order) otherwise. Either way the resulting object
/// keeps collection order and errors are recorded in collection order.
pub(crate) fn execute_fields<'a, 'f>(
    ctx: &'a ExecutionContext<'a>,
    parent_type: &'a ObjectType,
    parent_value: &'f JsonValue,
    fields: CollectedFields<'a>,
    parallel: bool,
    errors: &'f mut Vec<GraphQLError>,
) -> BoxFuture<'f, Result<JsonMap, PropagateNull>>
where
    'a: 'f,
{
    Box::pin(async move {
        let results: Vec<(&str, FieldResult)> =
            if parallel {
                let outcomes = futures::future::join_all(
                    fields.values().map(|field| async move {
                        let mut field_errors = vec![];
                        let result =
                            execute_field(ctx, parent_type, parent_value, field, &mut field_errors)
                                .await;
                        (field.response_key, result, field_errors)
                    }),
                ).await;
                outcomes.into_iter()
                    .map(|(response_key, result, field_errors)| {
                        errors.extend(field_errors);
                        (response_key, result)
                    })
                    .collect()
            } else {
                let mut results = vec![];
                for field in fields.values() {
                    let result = execute_field(ctx, parent_type, parent_value, field, errors).await;
                    results.push((field.response_key, result));
                }
                results
            };

        let mut data = JsonMap::new();
        let mut propagate_null = false;
        for (response_key, result) in results {
            match result {
                Ok(value) => {
                    data.insert(response_key.to_string(), value);
                },
                Err(PropagateNull) => propagate_null = true,
            }
        }

        if propagate_null {
            Err(PropagateNull)
        } else {
            Ok(data)
        }
    })
}

/// Resolves one field and completes its value.
///
/// A failure is recorded once, at the field's path. The field then becomes
/// `null` when its type is nullable, or propagates the `null` upwards when it
/// is not.
async fn execute_field<'a, 'f>(
    ctx: &'a ExecutionContext<'a>,
    parent_type: &'a ObjectType,
    parent_value: &'f JsonValue,
    field: &'f ExecutableField<'a>,
    errors: &mut Vec<GraphQLError>,
) -> FieldResult
where
    'a: 'f,
{
    if field.field_name == "__typename" {
        return Ok(JsonValue::String(parent_type.name().to_string()));
    }

    let output_type = &field.definition.output_type;
    let raw_value = match resolve_field_value(ctx, parent_value, field).await {
        Ok(raw_value) => raw_value,
        Err(field_errors) => {
            errors.extend(field_errors);
            return if output_type.nullable() {
                Ok(JsonValue::Null)
            } else {
                Err(PropagateNull)
            };
        },
    };

    complete::complete_value(ctx, output_type, field, raw_value, &field.path, errors).await
}

/// Coerces the field's arguments, then runs the field's resolver wrapped by
/// its `on_argument_execution`, `on_field_execution` and
/// `on_pre_output_coercion` directive hooks.
async fn resolve_field_value<'a, 'f>(
    ctx: &'a ExecutionContext<'a>,
    parent_value: &'f JsonValue,
    field: &'f ExecutableField<'a>,
) -> Result<JsonValue, Vec<GraphQLError>>
where
    'a: 'f,
{
    let definition = field.definition;
    let locations = field.locations();
    let located = |message: String| {
        GraphQLError::new(message)
            .with_locations(locations.iter().copied())
            .with_path(field.path.clone())
    };

    let mut arguments = values::get_argument_values(
        &definition.arguments,
        field.arguments(),
        field.location(),
        ctx.schema,
        &ctx.variable_values,
    ).await.map_err(|arg_errors| {
        arg_errors.into_iter()
            .map(|err| err.with_path(field.path.clone()))
            .collect::<Vec<_>>()
    })?;

    for (arg_name, arg_def) in &definition.arguments {
        if arg_def.argument_directives.is_empty() {
            continue;
        }
        let Some(value) = arguments.get_mut(arg_name) else {
            continue;
        };
        *value = arg_def.argument_directives
            .run_argument_execution(arg_name, value.take())
            .await
            .map_err(|err| err.messages().into_iter().map(located).collect::<Vec<_>>())?;
    }

    let resolver = definition.resolver.as_ref().unwrap_or(&ctx.schema.default_resolver);
    let info = ResolveInfo {
        execution_context: ctx,
        field,
    };
    let params = ResolveParams {
        arguments: &arguments,
        context: ctx.context_value,
        info: &info,
        parent: parent_value,
    };

    let raw_value = definition.execution_directives
        .run_field_execution(resolver, params)
        .await
        .map_err(|err| {
            log::debug!("Resolver for `{}` failed: {err}", field.coordinate());
            GraphQLError::from_resolver_error(err, &locations, &field.path)
        })?;

    if definition.output_directives.is_empty() {
        return Ok(raw_value);
    }
    definition.output_directives
        .run_pre_output_coercion(raw_value)
        .await
        .map_err(|err| err.messages().into_iter().map(located).collect())
}
