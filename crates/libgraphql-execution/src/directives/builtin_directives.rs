//! The `@skip` and `@include` directives:
//! https://spec.graphql.org/October2021/#sec--skip

use crate::ast;
use crate::directives::Directive;
use crate::directives::DirectiveError;
use crate::directives::NextCollection;
use crate::value::JsonMap;
use crate::value::JsonValue;

type Result<T> = std::result::Result<T, DirectiveError>;

fn skip_when(arguments: &JsonMap, condition: bool) -> Result<()> {
    match arguments.get("if") {
        Some(JsonValue::Bool(value)) if *value == condition =>
            Err(DirectiveError::SkipCollection),
        _ => Ok(()),
    }
}

/// Excludes a selection when its `if` argument is `true`.
#[derive(Debug)]
pub struct SkipDirective;

#[async_trait::async_trait]
impl Directive for SkipDirective {
    async fn on_field_collection(
        &self,
        arguments: &JsonMap,
        next: NextCollection<'_>,
        _field: &ast::query::Field,
    ) -> Result<()> {
        skip_when(arguments, true)?;
        next.call().await
    }

    async fn on_fragment_spread_collection(
        &self,
        arguments: &JsonMap,
        next: NextCollection<'_>,
        _fragment_spread: &ast::query::FragmentSpread,
    ) -> Result<()> {
        skip_when(arguments, true)?;
        next.call().await
    }

    async fn on_inline_fragment_collection(
        &self,
        arguments: &JsonMap,
        next: NextCollection<'_>,
        _inline_fragment: &ast::query::InlineFragment,
    ) -> Result<()> {
        skip_when(arguments, true)?;
        next.call().await
    }
}

/// Excludes a selection when its `if` argument is `false`.
#[derive(Debug)]
pub struct IncludeDirective;

#[async_trait::async_trait]
impl Directive for IncludeDirective {
    async fn on_field_collection(
        &self,
        arguments: &JsonMap,
        next: NextCollection<'_>,
        _field: &ast::query::Field,
    ) -> Result<()> {
        skip_when(arguments, false)?;
        next.call().await
    }

    async fn on_fragment_spread_collection(
        &self,
        arguments: &JsonMap,
        next: NextCollection<'_>,
        _fragment_spread: &ast::query::FragmentSpread,
    ) -> Result<()> {
        skip_when(arguments, false)?;
        next.call().await
    }

    async fn on_inline_fragment_collection(
        &self,
        arguments: &JsonMap,
        next: NextCollection<'_>,
        _inline_fragment: &ast::query::InlineFragment,
    ) -> Result<()> {
        skip_when(arguments, false)?;
        next.call().await
    }
}
