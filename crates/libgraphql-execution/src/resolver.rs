use crate::ast;
use crate::error::ResponsePath;
use crate::execution::ExecutableField;
use crate::execution::ExecutableOperation;
use crate::execution::ExecutionContext;
use crate::schema::Schema;
use crate::types::FieldDefinition;
use crate::types::ObjectType;
use crate::types::TypeAnnotation;
use crate::value::JsonMap;
use crate::value::JsonValue;
use futures::future::BoxFuture;
use futures::stream::BoxStream;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

pub type ResolverResult = Result<JsonValue, ResolverError>;

/// The source event stream returned by a [SubscribeResolver]. Each item is
/// one event (the root value for one execution of the subscription's
/// selection set).
pub type EventStream = BoxStream<'static, ResolverResult>;

/// Failure raised by a resolver (or by an `on_field_execution` directive
/// hook wrapping one).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ResolverError {
    #[error("{0}")]
    Message(String),

    /// Several independent failures; each one is surfaced as its own error
    /// in the response.
    #[error(
        "{}",
        .0.iter()
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n"),
    )]
    Multiple(Vec<ResolverError>),
}
impl ResolverError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}
impl From<&str> for ResolverError {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}
impl From<String> for ResolverError {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

/// Everything a resolver receives for a single field invocation.
#[derive(Clone, Copy)]
pub struct ResolveParams<'a> {
    pub arguments: &'a JsonMap,
    pub context: &'a (dyn Any + Send + Sync),
    pub info: &'a ResolveInfo<'a>,
    pub parent: &'a JsonValue,
}
impl<'a> ResolveParams<'a> {
    pub fn argument(&self, name: &str) -> Option<&'a JsonValue> {
        self.arguments.get(name)
    }

    /// Downcasts the request's context value.
    pub fn context<T: Any>(&self) -> Option<&'a T> {
        self.context.downcast_ref::<T>()
    }
}

/// Information about the field being resolved and the request executing it.
pub struct ResolveInfo<'a> {
    pub(crate) execution_context: &'a ExecutionContext<'a>,
    pub(crate) field: &'a ExecutableField<'a>,
}
impl<'a> ResolveInfo<'a> {
    pub fn field_definition(&self) -> &'a FieldDefinition {
        self.field.definition
    }

    pub fn field_name(&self) -> &'a str {
        self.field.field_name
    }

    /// Every AST field node merged under this field's response key, in
    /// document order.
    pub fn field_nodes(&self) -> &'a [&'a ast::query::Field] {
        self.field.nodes.as_slice()
    }

    pub fn fragments(&self) -> &'a HashMap<&'a str, &'a ast::query::FragmentDefinition> {
        &self.execution_context.fragments
    }

    pub fn operation(&self) -> &'a ExecutableOperation<'a> {
        &self.execution_context.operation
    }

    pub fn parent_type(&self) -> &'a ObjectType {
        self.field.parent_type
    }

    pub fn path(&self) -> &'a ResponsePath {
        &self.field.path
    }

    pub fn response_key(&self) -> &'a str {
        self.field.response_key
    }

    pub fn return_type(&self) -> &'a TypeAnnotation {
        &self.field.definition.output_type
    }

    pub fn root_value(&self) -> &'a JsonValue {
        self.execution_context.root_value
    }

    pub fn schema(&self) -> &'a Schema {
        self.execution_context.schema
    }

    /// Name of the type condition the field was selected under (the runtime
    /// object type when it was selected without a fragment).
    pub fn type_condition(&self) -> &'a str {
        self.field.type_condition
    }

    pub fn variable_values(&self) -> &'a JsonMap {
        &self.execution_context.variable_values
    }
}

type ResolverFn =
    dyn for<'a> Fn(ResolveParams<'a>) -> BoxFuture<'a, ResolverResult> + Send + Sync;

/// A field resolver: `(parent, arguments, context, info) -> value`.
#[derive(Clone)]
pub struct Resolver(Arc<ResolverFn>);
impl Resolver {
    pub(crate) fn call<'a>(&self, params: ResolveParams<'a>) -> BoxFuture<'a, ResolverResult> {
        (self.0)(params)
    }

    /// Wraps a synchronous resolver function.
    pub fn from_fn<F>(resolver_fn: F) -> Self
    where
        F: Fn(ResolveParams<'_>) -> ResolverResult + Send + Sync + 'static,
    {
        Self::new(move |params| Box::pin(futures::future::ready(resolver_fn(params))))
    }

    pub fn new<F>(resolver_fn: F) -> Self
    where
        F: for<'a> Fn(ResolveParams<'a>) -> BoxFuture<'a, ResolverResult>
            + Send
            + Sync
            + 'static,
    {
        Self(Arc::new(resolver_fn))
    }

    /// A resolver that always returns `value`.
    pub fn value(value: JsonValue) -> Self {
        Self::from_fn(move |_| Ok(value.clone()))
    }
}
impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Resolver(..)")
    }
}

/// Reads `parent[fieldName]` when the parent is a JSON object.
pub(crate) fn default_resolver() -> Resolver {
    Resolver::from_fn(|params| {
        Ok(params.parent
            .get(params.info.field_name())
            .cloned()
            .unwrap_or(JsonValue::Null))
    })
}

type SubscribeFn = dyn for<'a> Fn(ResolveParams<'a>) -> BoxFuture<'a, Result<EventStream, ResolverError>>
    + Send
    + Sync;

/// Produces the source event stream of a subscription root field.
#[derive(Clone)]
pub struct SubscribeResolver(Arc<SubscribeFn>);
impl SubscribeResolver {
    pub(crate) fn call<'a>(
        &self,
        params: ResolveParams<'a>,
    ) -> BoxFuture<'a, Result<EventStream, ResolverError>> {
        (self.0)(params)
    }

    pub fn from_fn<F>(subscribe_fn: F) -> Self
    where
        F: Fn(ResolveParams<'_>) -> Result<EventStream, ResolverError>
            + Send
            + Sync
            + 'static,
    {
        Self::new(move |params| Box::pin(futures::future::ready(subscribe_fn(params))))
    }

    pub fn new<F>(subscribe_fn: F) -> Self
    where
        F: for<'a> Fn(ResolveParams<'a>) -> BoxFuture<'a, Result<EventStream, ResolverError>>
            + Send
            + Sync
            + 'static,
    {
        Self(Arc::new(subscribe_fn))
    }
}
impl std::fmt::Debug for SubscribeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SubscribeResolver(..)")
    }
}

type TypeResolverFn = dyn Fn(&JsonValue, &ResolveInfo<'_>) -> Option<String> + Send + Sync;

/// Determines the concrete object type name of a value returned for an
/// interface or union typed field.
#[derive(Clone)]
pub struct TypeResolver(Arc<TypeResolverFn>);
impl TypeResolver {
    pub(crate) fn call(&self, value: &JsonValue, info: &ResolveInfo<'_>) -> Option<String> {
        (self.0)(value, info)
    }

    pub fn new<F>(type_resolver_fn: F) -> Self
    where
        F: Fn(&JsonValue, &ResolveInfo<'_>) -> Option<String> + Send + Sync + 'static,
    {
        Self(Arc::new(type_resolver_fn))
    }
}
impl std::fmt::Debug for TypeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TypeResolver(..)")
    }
}

/// Reads a `__typename` string from the resolved value.
pub(crate) fn default_type_resolver() -> TypeResolver {
    TypeResolver::new(|value, _info| {
        value.get("__typename")
            .and_then(JsonValue::as_str)
            .map(str::to_string)
    })
}
