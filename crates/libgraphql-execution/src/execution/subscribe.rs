use crate::error::GraphQLError;
use crate::error::ResponsePath;
use crate::execution::collect;
use crate::execution::values;
use crate::execution::ExecutionContext;
use crate::execution::OperationKind;
use crate::resolver::EventStream;
use crate::resolver::ResolveInfo;
use crate::resolver::ResolveParams;

type Result<T> = std::result::Result<T, Vec<GraphQLError>>;

/// Invokes the subscribe resolver of the subscription's single root field,
/// producing the stream of source events the operation is executed against.
///
/// See: https://spec.graphql.org/October2021/#CreateSourceEventStream()
pub(crate) async fn create_source_event_stream<'a>(
    ctx: &'a ExecutionContext<'a>,
) -> Result<EventStream> {
    let Some(root_type) = ctx.schema.operation_type(OperationKind::Subscription) else {
        return Err(vec![GraphQLError::new(
            "Schema is not configured to execute < subscription > operation.",
        )]);
    };

    let (fields, collection_errors) = collect::collect_fields(
        ctx,
        root_type,
        [ctx.operation.selection_set],
        &ResponsePath::root(),
    ).await;
    if !collection_errors.is_empty() {
        return Err(collection_errors);
    }
    let Some(field) = fields.values().next() else {
        return Err(vec![GraphQLError::new("Must provide a subscription field.")]);
    };

    let located = |message: String| {
        GraphQLError::new(message)
            .with_locations(field.locations())
            .with_path(field.path.clone())
    };

    let Some(subscribe_resolver) = field.definition.subscribe.as_ref() else {
        return Err(vec![located(format!(
            "Subscription field < {} > has no subscribe resolver.",
            field.coordinate(),
        ))]);
    };

    let arguments = values::get_argument_values(
        &field.definition.arguments,
        field.arguments(),
        field.location(),
        ctx.schema,
        &ctx.variable_values,
    ).await.map_err(|arg_errors| {
        arg_errors.into_iter()
            .map(|err| err.with_path(field.path.clone()))
            .collect::<Vec<_>>()
    })?;

    let info = ResolveInfo {
        execution_context: ctx,
        field,
    };
    let params = ResolveParams {
        arguments: &arguments,
        context: ctx.context_value,
        info: &info,
        parent: ctx.root_value,
    };

    subscribe_resolver.call(params).await.map_err(|err| {
        log::debug!("Subscribe resolver for `{}` failed: {err}", field.coordinate());
        GraphQLError::from_resolver_error(err, &field.locations(), &field.path)
    })
}
