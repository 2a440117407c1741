use crate::ast;
use crate::directives::NextCollection;
use crate::directives::NextResolve;
use crate::directives::NextValue;
use crate::resolver::ResolverResult;
use crate::schema::Schema;
use crate::value::JsonMap;
use crate::value::JsonValue;
use thiserror::Error;

/// Failure (or skip signal) raised by a [Directive] hook.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DirectiveError {
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
    Multiple(Vec<DirectiveError>),

    /// Raised by a collection hook to exclude the selection it guards.
    #[error("The selection was skipped")]
    SkipCollection,
}
impl DirectiveError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Flattens nested [DirectiveError::Multiple] errors into their messages.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Multiple(errs) => errs.iter().flat_map(|err| err.messages()).collect(),
            other => vec![other.to_string()],
        }
    }
}

/// The runtime behavior of a schema directive.
///
/// Every hook receives the directive's coerced arguments and a `next`
/// continuation running the rest of the chain (and, at the end of the chain,
/// the wrapped operation). The default implementation of every hook simply
/// calls `next`, so an implementation overrides only the hooks it cares
/// about.
///
/// Collection hooks run while a selection set is expanded, with the
/// directives applied to the selection in the executable document. The
/// remaining hooks run with the directives applied in the schema (to the
/// argument, input field, enum value or field being processed, followed by
/// those applied to its named type).
#[async_trait::async_trait]
pub trait Directive: std::fmt::Debug + Send + Sync {
    /// Called once, after the schema that registered this directive is built.
    fn on_build(&self, _schema: &Schema) -> Result<(), DirectiveError> {
        Ok(())
    }

    async fn on_field_collection(
        &self,
        _arguments: &JsonMap,
        next: NextCollection<'_>,
        _field: &ast::query::Field,
    ) -> Result<(), DirectiveError> {
        next.call().await
    }

    async fn on_fragment_spread_collection(
        &self,
        _arguments: &JsonMap,
        next: NextCollection<'_>,
        _fragment_spread: &ast::query::FragmentSpread,
    ) -> Result<(), DirectiveError> {
        next.call().await
    }

    async fn on_inline_fragment_collection(
        &self,
        _arguments: &JsonMap,
        next: NextCollection<'_>,
        _inline_fragment: &ast::query::InlineFragment,
    ) -> Result<(), DirectiveError> {
        next.call().await
    }

    /// Receives a successfully coerced input value and returns the value to
    /// use in its place.
    async fn on_post_input_coercion(
        &self,
        _arguments: &JsonMap,
        next: NextValue<'_>,
        value: JsonValue,
    ) -> Result<JsonValue, DirectiveError> {
        next.call(value).await
    }

    /// Receives a field's resolved value before it is completed.
    async fn on_pre_output_coercion(
        &self,
        _arguments: &JsonMap,
        next: NextValue<'_>,
        value: JsonValue,
    ) -> Result<JsonValue, DirectiveError> {
        next.call(value).await
    }

    /// Receives each coerced field argument value before the resolver runs.
    async fn on_argument_execution(
        &self,
        _arguments: &JsonMap,
        next: NextValue<'_>,
        _argument_name: &str,
        value: JsonValue,
    ) -> Result<JsonValue, DirectiveError> {
        next.call(value).await
    }

    /// Wraps the invocation of a field's resolver.
    async fn on_field_execution(
        &self,
        _arguments: &JsonMap,
        next: NextResolve<'_>,
    ) -> ResolverResult {
        next.call().await
    }
}
