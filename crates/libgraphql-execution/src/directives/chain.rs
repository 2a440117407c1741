use crate::ast;
use crate::directives::Directive;
use crate::directives::DirectiveDefinition;
use crate::directives::DirectiveError;
use crate::resolver::ResolveParams;
use crate::resolver::Resolver;
use crate::resolver::ResolverResult;
use crate::types::DirectiveAnnotation;
use crate::value::JsonMap;
use crate::value::JsonValue;
use futures::future::BoxFuture;
use indexmap::IndexMap;
use std::sync::Arc;

/// A directive implementation paired with the arguments it was applied with.
#[derive(Clone, Debug)]
pub struct AppliedDirective {
    pub(crate) arguments: JsonMap,
    pub(crate) implementation: Arc<dyn Directive>,
    pub(crate) name: String,
}
impl AppliedDirective {
    pub fn arguments(&self) -> &JsonMap {
        &self.arguments
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// An ordered list of applied directives. The first directive is the
/// outermost layer: it runs first and decides whether (and with what) the
/// rest of the chain runs.
#[derive(Clone, Debug)]
pub struct DirectiveChain(Arc<[AppliedDirective]>);
impl DirectiveChain {
    pub fn empty() -> Self {
        Self(Arc::from(vec![]))
    }

    /// Builds a chain out of schema directive annotations, in order, keeping
    /// only directives that have an implementation. Unset arguments take the
    /// directive definition's default values.
    pub(crate) fn from_annotations<'a>(
        annotations: impl IntoIterator<Item = &'a DirectiveAnnotation>,
        directive_defs: &IndexMap<String, DirectiveDefinition>,
    ) -> Self {
        annotations.into_iter()
            .filter_map(|annot| {
                let directive_def = directive_defs.get(annot.name())?;
                let implementation = directive_def.implementation.clone()?;
                let mut arguments = annot.arguments().clone();
                for (arg_name, arg_def) in &directive_def.arguments {
                    if !arguments.contains_key(arg_name)
                        && let Some(default_value) = &arg_def.default_value {
                        arguments.insert(arg_name.to_string(), default_value.clone());
                    }
                }
                Some(AppliedDirective {
                    arguments,
                    implementation,
                    name: annot.name().to_string(),
                })
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(AppliedDirective::name)
    }

    pub(crate) fn run_argument_execution<'a>(
        &'a self,
        argument_name: &'a str,
        value: JsonValue,
    ) -> BoxFuture<'a, Result<JsonValue, DirectiveError>> {
        NextValue {
            hook: ValueHook::ArgumentExecution { argument_name },
            remaining: &self.0,
        }.call(value)
    }

    pub(crate) fn run_collection<'a>(
        &'a self,
        node: SelectionNode<'a>,
    ) -> BoxFuture<'a, Result<(), DirectiveError>> {
        NextCollection {
            node,
            remaining: &self.0,
        }.call()
    }

    pub(crate) fn run_field_execution<'a>(
        &'a self,
        resolver: &'a Resolver,
        params: ResolveParams<'a>,
    ) -> BoxFuture<'a, ResolverResult> {
        NextResolve {
            params,
            remaining: &self.0,
            resolver,
        }.call()
    }

    pub(crate) fn run_post_input_coercion(
        &self,
        value: JsonValue,
    ) -> BoxFuture<'_, Result<JsonValue, DirectiveError>> {
        NextValue {
            hook: ValueHook::PostInputCoercion,
            remaining: &self.0,
        }.call(value)
    }

    pub(crate) fn run_pre_output_coercion(
        &self,
        value: JsonValue,
    ) -> BoxFuture<'_, Result<JsonValue, DirectiveError>> {
        NextValue {
            hook: ValueHook::PreOutputCoercion,
            remaining: &self.0,
        }.call(value)
    }
}
impl std::default::Default for DirectiveChain {
    fn default() -> Self {
        Self::empty()
    }
}
impl FromIterator<AppliedDirective> for DirectiveChain {
    fn from_iter<I: IntoIterator<Item = AppliedDirective>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The selection a collection hook is guarding.
#[derive(Clone, Copy, Debug)]
pub enum SelectionNode<'a> {
    Field(&'a ast::query::Field),
    FragmentSpread(&'a ast::query::FragmentSpread),
    InlineFragment(&'a ast::query::InlineFragment),
}

/// Continuation of a collection hook chain.
pub struct NextCollection<'a> {
    node: SelectionNode<'a>,
    remaining: &'a [AppliedDirective],
}
impl<'a> NextCollection<'a> {
    pub fn call(self) -> BoxFuture<'a, Result<(), DirectiveError>> {
        Box::pin(async move {
            let Some((directive, rest)) = self.remaining.split_first() else {
                return Ok(());
            };
            let next = NextCollection {
                node: self.node,
                remaining: rest,
            };
            let implementation = directive.implementation.as_ref();
            match self.node {
                SelectionNode::Field(field) =>
                    implementation.on_field_collection(&directive.arguments, next, field).await,
                SelectionNode::FragmentSpread(spread) =>
                    implementation.on_fragment_spread_collection(
                        &directive.arguments,
                        next,
                        spread,
                    ).await,
                SelectionNode::InlineFragment(fragment) =>
                    implementation.on_inline_fragment_collection(
                        &directive.arguments,
                        next,
                        fragment,
                    ).await,
            }
        })
    }

    pub fn node(&self) -> SelectionNode<'a> {
        self.node
    }
}

#[derive(Clone, Copy)]
enum ValueHook<'a> {
    ArgumentExecution { argument_name: &'a str },
    PostInputCoercion,
    PreOutputCoercion,
}

/// Continuation of a value-transforming hook chain (`on_post_input_coercion`,
/// `on_pre_output_coercion` or `on_argument_execution`).
pub struct NextValue<'a> {
    hook: ValueHook<'a>,
    remaining: &'a [AppliedDirective],
}
impl<'a> NextValue<'a> {
    pub fn call(self, value: JsonValue) -> BoxFuture<'a, Result<JsonValue, DirectiveError>> {
        Box::pin(async move {
            let Some((directive, rest)) = self.remaining.split_first() else {
                return Ok(value);
            };
            let next = NextValue {
                hook: self.hook,
                remaining: rest,
            };
            let implementation = directive.implementation.as_ref();
            match self.hook {
                ValueHook::ArgumentExecution { argument_name } =>
                    implementation.on_argument_execution(
                        &directive.arguments,
                        next,
                        argument_name,
                        value,
                    ).await,
                ValueHook::PostInputCoercion =>
                    implementation.on_post_input_coercion(&directive.arguments, next, value).await,
                ValueHook::PreOutputCoercion =>
                    implementation.on_pre_output_coercion(&directive.arguments, next, value).await,
            }
        })
    }
}

/// Continuation of an `on_field_execution` chain. The end of the chain
/// invokes the field's resolver.
pub struct NextResolve<'a> {
    params: ResolveParams<'a>,
    remaining: &'a [AppliedDirective],
    resolver: &'a Resolver,
}
impl<'a> NextResolve<'a> {
    pub fn call(self) -> BoxFuture<'a, ResolverResult> {
        Box::pin(async move {
            let Some((directive, rest)) = self.remaining.split_first() else {
                return self.resolver.call(self.params).await;
            };
            let next = NextResolve {
                params: self.params,
                remaining: rest,
                resolver: self.resolver,
            };
            directive.implementation.on_field_execution(&directive.arguments, next).await
        })
    }

    pub fn params(&self) -> &ResolveParams<'a> {
        &self.params
    }
}
