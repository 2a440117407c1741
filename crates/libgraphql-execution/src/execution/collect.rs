use crate::ast;
use crate::directives::AppliedDirective;
use crate::directives::DirectiveChain;
use crate::directives::DirectiveError;
use crate::directives::SelectionNode;
use crate::error::GraphQLError;
use crate::error::ResponsePath;
use crate::execution::values;
use crate::execution::ExecutableField;
use crate::execution::ExecutionContext;
use crate::loc::SourceLocation;
use crate::schema::Schema;
use crate::types::ObjectType;
use futures::future::BoxFuture;
use indexmap::IndexMap;
use std::collections::HashSet;

/// The fields of one selection set (or of several merged ones), keyed by
/// response key in first-occurrence order.
pub(crate) type CollectedFields<'a> = IndexMap<&'a str, ExecutableField<'a>>;

struct CollectionState<'a> {
    errors: Vec<GraphQLError>,
    fields: CollectedFields<'a>,
    visited_fragments: HashSet<&'a str>,
}

/// Expands `selection_sets` against `runtime_type`, following fragment
/// spreads and inline fragments whose type condition applies, evaluating
/// collection directives, and merging selections that share a response key.
///
/// Errors raised while collecting (unknown directives, invalid directive
/// arguments, failing directive hooks, unknown fields) exclude the
/// selection they were raised for and are returned alongside whatever could
/// be collected.
///
/// See: https://spec.graphql.org/October2021/#CollectFields()
pub(crate) async fn collect_fields<'a>(
    ctx: &'a ExecutionContext<'a>,
    runtime_type: &'a ObjectType,
    selection_sets: impl IntoIterator<Item = &'a ast::query::SelectionSet>,
    path: &ResponsePath,
) -> (CollectedFields<'a>, Vec<GraphQLError>) {
    let mut state = CollectionState {
        errors: vec![],
        fields: IndexMap::new(),
        visited_fragments: HashSet::new(),
    };
    for selection_set in selection_sets {
        collect_selection_set(
            ctx,
            runtime_type,
            selection_set,
            runtime_type.name(),
            path,
            &mut state,
        ).await;
    }
    (state.fields, state.errors)
}

fn collect_selection_set<'a, 's>(
    ctx: &'a ExecutionContext<'a>,
    runtime_type: &'a ObjectType,
    selection_set: &'a ast::query::SelectionSet,
    type_condition: &'a str,
    path: &'s ResponsePath,
    state: &'s mut CollectionState<'a>,
) -> BoxFuture<'s, ()>
where
    'a: 's,
{
    Box::pin(async move {
        use ast::query::Selection;
        for selection in &selection_set.items {
            match selection {
                Selection::Field(field) => {
                    if !should_include_node(
                        ctx,
                        &field.directives,
                        SelectionNode::Field(field),
                        path,
                        &mut state.errors,
                    ).await {
                        continue;
                    }

                    let response_key = field.alias.as_deref().unwrap_or(field.name.as_str());
                    if let Some(collected) = state.fields.get_mut(response_key) {
                        collected.nodes.push(field);
                        continue;
                    }

                    let field_path = path.child(response_key);
                    let Some(definition) = ctx.schema.find_field(runtime_type, &field.name) else {
                        state.errors.push(
                            GraphQLError::new(format!(
                                "Cannot query field < {} > on type < {} >.",
                                field.name,
                                runtime_type.name(),
                            ))
                            .with_locations([SourceLocation::from(field.position)])
                            .with_path(field_path),
                        );
                        continue;
                    };

                    state.fields.insert(response_key, ExecutableField {
                        definition,
                        field_name: field.name.as_str(),
                        first_node: field,
                        nodes: vec![field],
                        parent_type: runtime_type,
                        path: field_path,
                        response_key,
                        type_condition,
                    });
                },

                Selection::InlineFragment(inline_fragment) => {
                    if !should_include_node(
                        ctx,
                        &inline_fragment.directives,
                        SelectionNode::InlineFragment(inline_fragment),
                        path,
                        &mut state.errors,
                    ).await {
                        continue;
                    }

                    let fragment_condition = inline_fragment.type_condition.as_ref()
                        .map(|ast::query::TypeCondition::On(type_name)| type_name.as_str());
                    if !does_fragment_condition_match(ctx.schema, fragment_condition, runtime_type) {
                        continue;
                    }

                    collect_selection_set(
                        ctx,
                        runtime_type,
                        &inline_fragment.selection_set,
                        fragment_condition.unwrap_or(type_condition),
                        path,
                        state,
                    ).await;
                },

                Selection::FragmentSpread(fragment_spread) => {
                    if !should_include_node(
                        ctx,
                        &fragment_spread.directives,
                        SelectionNode::FragmentSpread(fragment_spread),
                        path,
                        &mut state.errors,
                    ).await {
                        continue;
                    }

                    let fragment_name = fragment_spread.fragment_name.as_str();
                    if !state.visited_fragments.insert(fragment_name) {
                        continue;
                    }

                    let Some(fragment_def) = ctx.fragments.get(fragment_name).copied() else {
                        continue;
                    };

                    let ast::query::TypeCondition::On(fragment_condition) =
                        &fragment_def.type_condition;
                    if !does_fragment_condition_match(
                        ctx.schema,
                        Some(fragment_condition.as_str()),
                        runtime_type,
                    ) {
                        continue;
                    }

                    collect_selection_set(
                        ctx,
                        runtime_type,
                        &fragment_def.selection_set,
                        fragment_condition.as_str(),
                        path,
                        state,
                    ).await;
                },
            }
        }
    })
}

/// A fragment applies when it has no type condition, when its condition is
/// the runtime type itself, or when its condition is an abstract type the
/// runtime type belongs to.
fn does_fragment_condition_match(
    schema: &Schema,
    type_condition: Option<&str>,
    runtime_type: &ObjectType,
) -> bool {
    let Some(type_condition) = type_condition else {
        return true;
    };
    type_condition == runtime_type.name()
        || schema.is_possible_type(type_condition, runtime_type.name())
}

/// Runs the collection hooks of the directives applied to a selection.
///
/// Returns `false` when a directive raised
/// [DirectiveError::SkipCollection] or when the directives could not be
/// evaluated (in which case the errors are recorded).
async fn should_include_node<'a>(
    ctx: &'a ExecutionContext<'a>,
    directive_nodes: &'a [ast::query::Directive],
    node: SelectionNode<'a>,
    path: &ResponsePath,
    errors: &mut Vec<GraphQLError>,
) -> bool {
    if directive_nodes.is_empty() {
        return true;
    }

    let locate = |err: GraphQLError| {
        if path.segments().is_empty() {
            err
        } else {
            err.with_path(path.clone())
        }
    };

    let mut applied_directives = vec![];
    for directive_node in directive_nodes {
        let location = SourceLocation::from(directive_node.position);
        let Some(directive_def) = ctx.schema.find_directive(&directive_node.name) else {
            errors.push(locate(
                GraphQLError::new(format!("Unknown directive < @{} >.", directive_node.name))
                    .with_locations([location]),
            ));
            return false;
        };

        let arguments = match values::get_argument_values(
            &directive_def.arguments,
            &directive_node.arguments,
            location,
            ctx.schema,
            &ctx.variable_values,
        ).await {
            Ok(arguments) => arguments,
            Err(arg_errors) => {
                errors.extend(arg_errors.into_iter().map(locate));
                return false;
            },
        };

        if let Some(implementation) = &directive_def.implementation {
            applied_directives.push(AppliedDirective {
                arguments,
                implementation: implementation.clone(),
                name: directive_def.name.to_string(),
            });
        }
    }

    let chain: DirectiveChain = applied_directives.into_iter().collect();
    match chain.run_collection(node).await {
        Ok(()) => true,
        Err(DirectiveError::SkipCollection) => false,
        Err(err) => {
            let locations: Vec<SourceLocation> = directive_nodes.iter()
                .map(|directive_node| directive_node.position.into())
                .collect();
            errors.extend(err.messages().into_iter().map(|message| {
                locate(GraphQLError::new(message).with_locations(locations.iter().copied()))
            }));
            false
        },
    }
}
