use crate::error::GraphQLError;
use crate::error::ResponsePath;
use crate::execution::collect;
use crate::execution::execute;
use crate::execution::execute::FieldResult;
use crate::execution::execute::PropagateNull;
use crate::execution::ExecutableField;
use crate::execution::ExecutionContext;
use crate::resolver::ResolveInfo;
use crate::types::GraphQLType;
use crate::types::ObjectType;
use crate::types::TypeAnnotation;
use crate::value::JsonValue;
use futures::future::BoxFuture;

/// Shapes a resolved value according to `return_type`.
///
/// Every error is recorded (once) in `errors`. A nullable position absorbs a
/// failure of its own or of its descendants as `null`; a non-null position
/// turns it into [PropagateNull] for its parent to handle.
///
/// See: https://spec.graphql.org/October2021/#CompleteValue()
pub(crate) fn complete_value<'a, 'f>(
    ctx: &'a ExecutionContext<'a>,
    return_type: &'a TypeAnnotation,
    field: &'f ExecutableField<'a>,
    result: JsonValue,
    path: &'f ResponsePath,
    errors: &'f mut Vec<GraphQLError>,
) -> BoxFuture<'f, FieldResult>
where
    'a: 'f,
{
    Box::pin(async move {
        let completed = complete_nullable_value(ctx, return_type, field, result, path, errors).await;
        if return_type.nullable() {
            return Ok(completed.unwrap_or(JsonValue::Null));
        }
        match completed {
            Ok(JsonValue::Null) => {
                errors.push(field_error(
                    field,
                    path,
                    format!(
                        "Cannot return null for non-nullable field < {} >.",
                        field.coordinate(),
                    ),
                ));
                Err(PropagateNull)
            },
            completed => completed,
        }
    })
}

async fn complete_nullable_value<'a, 'f>(
    ctx: &'a ExecutionContext<'a>,
    return_type: &'a TypeAnnotation,
    field: &'f ExecutableField<'a>,
    result: JsonValue,
    path: &'f ResponsePath,
    errors: &'f mut Vec<GraphQLError>,
) -> FieldResult
where
    'a: 'f,
{
    if result.is_null() {
        return Ok(JsonValue::Null);
    }

    let type_name = match return_type {
        TypeAnnotation::List(list_annot) =>
            return complete_list_value(ctx, list_annot.inner_type(), field, result, path, errors)
                .await,
        TypeAnnotation::Named(named_annot) => named_annot.type_name(),
    };

    match ctx.schema.find_type(type_name) {
        Some(GraphQLType::Enum(enum_type)) => match enum_type.serialize(&result) {
            Some(name) => Ok(JsonValue::String(name.to_string())),
            None => {
                errors.push(field_error(
                    field,
                    path,
                    format!("Expected a value of type < {type_name} >."),
                ));
                Err(PropagateNull)
            },
        },

        Some(GraphQLType::Scalar(scalar_type)) => {
            let serialized = match scalar_type.implementation() {
                Some(implementation) => implementation.serialize(&result)
                    .map_err(|err| err.sub_message().map(str::to_string)),
                None => Err(Some(format!("Scalar < {type_name} > is missing a serialize method."))),
            };
            serialized.map_err(|sub_message| {
                let message = match sub_message {
                    Some(sub_message) =>
                        format!("Expected a value of type < {type_name} >; {sub_message}"),
                    None => format!("Expected a value of type < {type_name} >."),
                };
                errors.push(field_error(field, path, message));
                PropagateNull
            })
        },

        Some(GraphQLType::Object(object_type)) =>
            complete_object_value(ctx, object_type, field, result, path, errors).await,

        Some(abstract_type @ (GraphQLType::Interface(_) | GraphQLType::Union(_))) => {
            let object_type = resolve_runtime_type(ctx, abstract_type, field, &result)
                .map_err(|message| {
                    errors.push(field_error(field, path, message));
                    PropagateNull
                })?;
            complete_object_value(ctx, object_type, field, result, path, errors).await
        },

        Some(GraphQLType::InputObject(_)) | None => {
            errors.push(field_error(
                field,
                path,
                format!("Expected a value of type < {type_name} >."),
            ));
            Err(PropagateNull)
        },
    }
}

async fn complete_list_value<'a, 'f>(
    ctx: &'a ExecutionContext<'a>,
    item_type: &'a TypeAnnotation,
    field: &'f ExecutableField<'a>,
    result: JsonValue,
    path: &'f ResponsePath,
    errors: &'f mut Vec<GraphQLError>,
) -> FieldResult
where
    'a: 'f,
{
    let JsonValue::Array(items) = result else {
        errors.push(field_error(
            field,
            path,
            format!(
                "Expected Iterable, but did not find one for field < {} >.",
                field.coordinate(),
            ),
        ));
        return Err(PropagateNull);
    };

    let outcomes = futures::future::join_all(
        items.into_iter().enumerate().map(|(index, item)| async move {
            let item_path = path.child(index);
            let mut item_errors = vec![];
            let completed =
                complete_value(ctx, item_type, field, item, &item_path, &mut item_errors).await;
            (completed, item_errors)
        }),
    ).await;

    let mut completed_items = Vec::with_capacity(outcomes.len());
    let mut propagate_null = false;
    for (completed, item_errors) in outcomes {
        errors.extend(item_errors);
        match completed {
            Ok(value) => completed_items.push(value),
            Err(PropagateNull) => propagate_null = true,
        }
    }

    if propagate_null {
        Err(PropagateNull)
    } else {
        Ok(JsonValue::Array(completed_items))
    }
}

async fn complete_object_value<'a, 'f>(
    ctx: &'a ExecutionContext<'a>,
    object_type: &'a ObjectType,
    field: &'f ExecutableField<'a>,
    result: JsonValue,
    path: &'f ResponsePath,
    errors: &'f mut Vec<GraphQLError>,
) -> FieldResult
where
    'a: 'f,
{
    let (sub_fields, collection_errors) =
        collect::collect_fields(ctx, object_type, field.selection_sets(), path).await;
    errors.extend(collection_errors);

    execute::execute_fields(ctx, object_type, &result, sub_fields, true, errors)
        .await
        .map(JsonValue::Object)
}

/// Determines the concrete object type of a value returned for an interface
/// or union typed field.
fn resolve_runtime_type<'a>(
    ctx: &'a ExecutionContext<'a>,
    abstract_type: &'a GraphQLType,
    field: &ExecutableField<'a>,
    result: &JsonValue,
) -> Result<&'a ObjectType, String> {
    let type_resolver = match abstract_type {
        GraphQLType::Interface(iface_type) => iface_type.type_resolver.as_ref(),
        GraphQLType::Union(union_type) => union_type.type_resolver.as_ref(),
        _ => None,
    }.unwrap_or(&ctx.schema.default_type_resolver);

    let info = ResolveInfo {
        execution_context: ctx,
        field,
    };
    let abstract_name = abstract_type.name();
    let must_resolve_message = format!(
        "Abstract type < {abstract_name} > must resolve to an Object type at runtime \
        for field < {} >.",
        field.coordinate(),
    );

    let Some(runtime_type_name) = type_resolver.call(result, &info) else {
        return Err(must_resolve_message);
    };
    let Some(object_type) = ctx.schema.find_object_type(&runtime_type_name) else {
        return Err(format!("{must_resolve_message} Received < {runtime_type_name} >."));
    };
    if !ctx.schema.is_possible_type(abstract_name, object_type.name()) {
        return Err(format!(
            "Runtime Object type < {runtime_type_name} > is not a possible type for \
            < {abstract_name} >.",
        ));
    }
    Ok(object_type)
}

fn field_error(field: &ExecutableField<'_>, path: &ResponsePath, message: String) -> GraphQLError {
    GraphQLError::new(message)
        .with_locations(field.locations())
        .with_path(path.clone())
}
