use crate::ast;
use crate::error::default_error_coercer;
use crate::error::ErrorCoercer;
use crate::error::GraphQLError;
use crate::execution;
use crate::execution::ExecutionContext;
use crate::execution::OperationKind;
use crate::query_cache;
use crate::query_cache::QueryCache;
use crate::response::Response;
use crate::schema::Schema;
use crate::value::JsonMap;
use crate::value::JsonValue;
use futures::stream::BoxStream;
use futures::StreamExt;
use std::any::Any;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Executes GraphQL requests against a [Schema].
///
/// An [Engine] is cheap to clone and can serve any number of concurrent
/// requests. Parsed query documents are kept in a bounded LRU cache shared
/// by every clone.
///
/// ```ignore
/// let engine = Engine::new(schema);
/// let response = engine.execute(Request::new("{ hello }")).await;
/// assert_eq!(response.to_json(), json!({"data": {"hello": "world"}}));
/// ```
#[derive(Clone)]
pub struct Engine {
    error_coercer: ErrorCoercer,
    query_cache: Arc<QueryCache>,
    schema: Arc<Schema>,
}
impl Engine {
    /// Executes a query or mutation request.
    pub async fn execute(&self, request: Request) -> Response {
        match self.query_cache.get_or_parse(request.query.as_str()) {
            Ok(document) => self.execute_document(&document, request).await,
            Err(err) => self.parse_error_response(err),
        }
    }

    /// Executes `request` against an already parsed document (the request's
    /// query text is ignored).
    pub async fn execute_document(
        &self,
        document: &ast::query::Document,
        request: Request,
    ) -> Response {
        let ctx = match ExecutionContext::build(
            &self.schema,
            document,
            request.operation_name.as_deref(),
            &request.variables,
            &request.root_value,
            request.context.as_ref(),
        ).await {
            Ok(ctx) => ctx,
            Err(errors) => return Response::build(&self.error_coercer, None, errors),
        };

        let data = execution::execute_operation(&ctx, &request.root_value).await;
        Response::build(&self.error_coercer, data, ctx.take_errors())
    }

    pub fn new(schema: impl Into<Arc<Schema>>) -> Self {
        Self {
            error_coercer: default_error_coercer(),
            query_cache: Arc::new(QueryCache::new(query_cache::DEFAULT_QUERY_CACHE_CAPACITY)),
            schema: schema.into(),
        }
    }

    fn parse_error_response(&self, err: ast::query::ParseError) -> Response {
        log::debug!("Failed to parse query: {err}");
        let error = GraphQLError::new(err.to_string()).with_original_error(err);
        Response::build(&self.error_coercer, None, vec![error])
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Executes a subscription request, yielding one response per source
    /// event.
    ///
    /// The stream ends when the source event stream ends. A failure to
    /// create the source event stream, or an error emitted by it, yields a
    /// single error response and ends the stream. A request for a query or
    /// mutation yields exactly one response.
    pub fn subscribe(&self, request: Request) -> BoxStream<'static, Response> {
        let engine = self.clone();
        async_stream::stream! {
            let document = match engine.query_cache.get_or_parse(request.query.as_str()) {
                Ok(document) => document,
                Err(err) => {
                    yield engine.parse_error_response(err);
                    return;
                },
            };

            let ctx = match ExecutionContext::build(
                &engine.schema,
                &document,
                request.operation_name.as_deref(),
                &request.variables,
                &request.root_value,
                request.context.as_ref(),
            ).await {
                Ok(ctx) => ctx,
                Err(errors) => {
                    yield Response::build(&engine.error_coercer, None, errors);
                    return;
                },
            };

            if ctx.operation().kind() != OperationKind::Subscription {
                let data = execution::execute_operation(&ctx, &request.root_value).await;
                yield Response::build(&engine.error_coercer, data, ctx.take_errors());
                return;
            }

            let mut source_stream = match execution::create_source_event_stream(&ctx).await {
                Ok(source_stream) => source_stream,
                Err(errors) => {
                    yield Response::build(&engine.error_coercer, None, errors);
                    return;
                },
            };
            log::debug!("Subscription source stream started");

            while let Some(event) = source_stream.next().await {
                match event {
                    Ok(event_value) => {
                        let data = execution::execute_operation(&ctx, &event_value).await;
                        yield Response::build(&engine.error_coercer, data, ctx.take_errors());
                    },
                    Err(err) => {
                        log::debug!("Subscription source stream failed: {err}");
                        yield Response::build(
                            &engine.error_coercer,
                            None,
                            vec![GraphQLError::new(err.to_string()).with_original_error(err)],
                        );
                        return;
                    },
                }
            }
            log::debug!("Subscription source stream ended");
        }.boxed()
    }

    /// Replaces the function turning each [GraphQLError] into the JSON object
    /// placed in the response's `errors` list.
    pub fn with_error_coercer(
        mut self,
        error_coercer: impl Fn(&GraphQLError) -> JsonValue + Send + Sync + 'static,
    ) -> Self {
        self.error_coercer = Arc::new(error_coercer);
        self
    }

    /// Replaces the parsed document cache with an empty one holding at most
    /// `capacity` documents.
    pub fn with_query_cache_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.query_cache = Arc::new(QueryCache::new(capacity));
        self
    }
}
impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("query_cache", &self.query_cache)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// A single GraphQL request: the query text plus everything it is executed
/// with.
#[derive(Clone)]
pub struct Request {
    context: Arc<dyn Any + Send + Sync>,
    operation_name: Option<String>,
    query: String,
    root_value: JsonValue,
    variables: JsonMap,
}
impl Request {
    /// Sets the value handed to every resolver as `params.context`.
    pub fn context(mut self, context: impl Any + Send + Sync) -> Self {
        self.context = Arc::new(context);
        self
    }

    pub fn new(query: impl Into<String>) -> Self {
        Self {
            context: Arc::new(()),
            operation_name: None,
            query: query.into(),
            root_value: JsonValue::Null,
            variables: JsonMap::new(),
        }
    }

    pub fn operation_name(mut self, operation_name: impl Into<String>) -> Self {
        self.operation_name = Some(operation_name.into());
        self
    }

    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    /// Sets the parent value of the operation's root fields.
    pub fn root_value(mut self, root_value: JsonValue) -> Self {
        self.root_value = root_value;
        self
    }

    pub fn variables(mut self, variables: JsonMap) -> Self {
        self.variables = variables;
        self
    }
}
impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("operation_name", &self.operation_name)
            .field("query", &self.query)
            .field("root_value", &self.root_value)
            .field("variables", &self.variables)
            .finish_non_exhaustive()
    }
}
