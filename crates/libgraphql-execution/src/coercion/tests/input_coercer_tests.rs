use crate::ast;
use crate::coercion::CoercionResult;
use crate::directives::Directive;
use crate::directives::DirectiveError;
use crate::directives::NextValue;
use crate::schema::Schema;
use crate::schema::SchemaBuildError;
use crate::schema::SchemaBuilder;
use crate::types::InputValueDefinition;
use crate::value::JsonMap;
use crate::value::JsonValue;
use proptest::prelude::*;
use serde_json::json;
use std::sync::LazyLock;

type Result<T> = std::result::Result<T, SchemaBuildError>;

const SCHEMA_SDL: &str = concat!(
    "directive @clamp(max: Int = 100) on ARGUMENT_DEFINITION | INPUT_FIELD_DEFINITION\n",
    "directive @positive on ARGUMENT_DEFINITION\n",
    "type Query {\n",
    "  f(\n",
    "    int: Int\n",
    "    requiredInt: Int!\n",
    "    ints: [Int!]\n",
    "    color: Color\n",
    "    filter: Filter\n",
    "    clamped: Int @clamp\n",
    "    positive: Int @positive\n",
    "    unimplemented: Loud\n",
    "  ): Int\n",
    "}\n",
    "enum Color { RED GREEN }\n",
    "input Filter {\n",
    "  name: String!\n",
    "  limit: Int = 10 @clamp(max: 50)\n",
    "  nested: Filter\n",
    "}\n",
    "scalar Loud\n",
);

/// Caps integers at the directive's `max` argument.
#[derive(Debug)]
struct ClampDirective;
#[async_trait::async_trait]
impl Directive for ClampDirective {
    async fn on_post_input_coercion(
        &self,
        arguments: &JsonMap,
        next: NextValue<'_>,
        value: JsonValue,
    ) -> std::result::Result<JsonValue, DirectiveError> {
        let max = arguments.get("max").and_then(JsonValue::as_i64).unwrap_or(i64::MAX);
        let clamped = match value.as_i64() {
            Some(i) if i > max => json!(max),
            _ => value,
        };
        next.call(clamped).await
    }
}

/// Rejects negative integers with one error per complaint.
#[derive(Debug)]
struct PositiveDirective;
#[async_trait::async_trait]
impl Directive for PositiveDirective {
    async fn on_post_input_coercion(
        &self,
        _arguments: &JsonMap,
        next: NextValue<'_>,
        value: JsonValue,
    ) -> std::result::Result<JsonValue, DirectiveError> {
        match value.as_i64() {
            Some(i) if i < 0 => Err(DirectiveError::Multiple(vec![
                DirectiveError::message("Value must be positive"),
                DirectiveError::message(format!("Received {i}")),
            ])),
            _ => next.call(value).await,
        }
    }
}

fn build_schema() -> Result<Schema> {
    SchemaBuilder::new()
        .load_str(None, SCHEMA_SDL)?
        .directive("clamp", ClampDirective)
        .directive("positive", PositiveDirective)
        .enum_value("Color.GREEN", json!(2))
        .build()
}

static SCHEMA: LazyLock<Schema> =
    LazyLock::new(|| build_schema().expect("test schema builds"));

fn argument(arg_name: &str) -> &'static InputValueDefinition {
    SCHEMA.find_object_type("Query")
        .and_then(|query_type| query_type.field("f"))
        .and_then(|field_def| field_def.argument(arg_name))
        .expect("argument is defined")
}

async fn coerce_arg(arg_name: &str, value: JsonValue) -> CoercionResult {
    argument(arg_name).coercer().coerce(&SCHEMA, &value, None, None).await
}

/// Coerces `literal`, written as the argument of a field in a query
/// document, with the given coerced `variables`.
async fn coerce_arg_literal(arg_name: &str, literal: &str, variables: JsonValue) -> CoercionResult {
    let document = ast::query::parse(&format!("{{ f(arg: {literal}) }}"))
        .expect("literal parses");
    let ast::query::Definition::Operation(
        ast::query::OperationDefinition::SelectionSet(selection_set)
    ) = &document.definitions[0] else {
        panic!("expected a shorthand query");
    };
    let ast::query::Selection::Field(field) = &selection_set.items[0] else {
        panic!("expected a field");
    };
    let variables = match variables {
        JsonValue::Object(variables) => variables,
        _ => JsonMap::new(),
    };
    argument(arg_name).coercer()
        .coerce_literal(&SCHEMA, &field.arguments[0].1, &variables, None, None)
        .await
}

fn messages(result: &CoercionResult) -> Vec<&str> {
    result.errors().iter().map(|err| err.message.as_str()).collect()
}

// =============================================================================
// Scalars and wrappers
// =============================================================================

mod scalars_and_wrappers {
    use super::*;

    #[tokio::test]
    async fn null_is_accepted_for_nullable_types() {
        let result = coerce_arg("int", json!(null)).await;
        assert_eq!(result.value(), Some(&json!(null)));
    }

    #[tokio::test]
    async fn null_is_rejected_for_non_null_types() {
        let result = coerce_arg("requiredInt", json!(null)).await;
        assert_eq!(messages(&result), vec![
            "Expected non-nullable type < Int! > not to be null.",
        ]);
        assert!(result.value().is_none());
    }

    #[tokio::test]
    async fn scalar_failures_carry_the_scalar_message() {
        let result = coerce_arg("int", json!("seven")).await;
        assert_eq!(messages(&result), vec![
            "Expected type < Int >; Int cannot represent non-integer value: \"seven\"",
        ]);
    }

    #[tokio::test]
    async fn scalar_without_an_implementation_cannot_be_coerced() {
        let result = coerce_arg("unimplemented", json!("hey")).await;
        assert_eq!(messages(&result), vec![
            "Expected type < Loud >; Scalar < Loud > is missing a parse method.",
        ]);
    }

    #[tokio::test]
    async fn list_items_are_coerced_with_their_index() {
        let ok = coerce_arg("ints", json!([1, 2, 3])).await;
        assert_eq!(ok.value(), Some(&json!([1, 2, 3])));

        let failed = coerce_arg("ints", json!([1, null, "x"])).await;
        assert_eq!(messages(&failed), vec![
            "Expected non-nullable type < Int! > not to be null at value[1].",
            "Expected type < Int > at value[2]; Int cannot represent non-integer value: \"x\"",
        ]);
    }

    proptest! {
        #[test]
        fn single_values_are_promoted_to_a_list_of_one(n in any::<i32>()) {
            let result = futures::executor::block_on(coerce_arg("ints", json!(n)));
            prop_assert_eq!(result.value(), Some(&json!([n])));
        }
    }
}

// =============================================================================
// Enums
// =============================================================================

mod enums {
    use super::*;

    #[tokio::test]
    async fn enum_names_map_onto_internal_values() {
        assert_eq!(coerce_arg("color", json!("RED")).await.value(), Some(&json!("RED")));
        assert_eq!(coerce_arg("color", json!("GREEN")).await.value(), Some(&json!(2)));
    }

    #[tokio::test]
    async fn unknown_enum_names_are_rejected() {
        let result = coerce_arg("color", json!("BLUE")).await;
        assert_eq!(messages(&result), vec!["Expected type < Color >."]);

        let result = coerce_arg("color", json!(2)).await;
        assert_eq!(messages(&result), vec!["Expected type < Color >."]);
    }
}

// =============================================================================
// Input objects
// =============================================================================

mod input_objects {
    use super::*;

    #[tokio::test]
    async fn absent_fields_take_their_default_values() {
        let result = coerce_arg("filter", json!({"name": "a"})).await;
        assert_eq!(result.value(), Some(&json!({"name": "a", "limit": 10})));
    }

    #[tokio::test]
    async fn field_directives_run_on_provided_values() {
        let result = coerce_arg("filter", json!({"name": "a", "limit": 75})).await;
        assert_eq!(result.value(), Some(&json!({"name": "a", "limit": 50})));
    }

    #[tokio::test]
    async fn missing_required_fields_are_reported() {
        let result = coerce_arg("filter", json!({})).await;
        assert_eq!(messages(&result), vec![
            "Field < value.name > of required type < String! > was not provided.",
        ]);
    }

    #[tokio::test]
    async fn nested_failures_are_reported_at_their_path() {
        let result = coerce_arg("filter", json!({"name": "a", "nested": {"name": 5}})).await;
        assert_eq!(messages(&result), vec![
            "Expected type < String > at value.nested.name; String cannot represent a non \
            string value: 5",
        ]);
    }

    #[tokio::test]
    async fn non_objects_are_rejected() {
        let result = coerce_arg("filter", json!("name")).await;
        assert_eq!(messages(&result), vec!["Expected type < Filter > to be an object."]);
    }

    proptest! {
        #[test]
        fn every_undeclared_field_is_reported(
            extra_names in prop::collection::btree_set("extra_[a-z]{1,8}", 0..6),
        ) {
            let mut provided = JsonMap::new();
            provided.insert("name".to_string(), json!("a"));
            for extra_name in &extra_names {
                provided.insert(extra_name.to_string(), json!(1));
            }

            let result = futures::executor::block_on(
                coerce_arg("filter", JsonValue::Object(provided)),
            );
            let expected: Vec<String> = extra_names.iter()
                .map(|name| format!("Field < {name} > is not defined by type < Filter >."))
                .collect();
            prop_assert_eq!(messages(&result), expected);
            prop_assert_eq!(result.is_ok(), extra_names.is_empty());
        }
    }
}

// =============================================================================
// Directives
// =============================================================================

mod directives {
    use super::*;

    #[tokio::test]
    async fn directive_default_arguments_apply() {
        let result = coerce_arg("clamped", json!(500)).await;
        assert_eq!(result.value(), Some(&json!(100)));

        let result = coerce_arg("clamped", json!(7)).await;
        assert_eq!(result.value(), Some(&json!(7)));
    }

    #[tokio::test]
    async fn aggregate_directive_failures_become_separate_errors() {
        let result = coerce_arg("positive", json!(-3)).await;
        assert_eq!(messages(&result), vec!["Value must be positive.", "Received -3."]);
        assert!(result.value().is_none());
    }

    #[tokio::test]
    async fn directives_do_not_run_when_coercion_fails() {
        let result = coerce_arg("positive", json!("x")).await;
        assert_eq!(messages(&result), vec![
            "Expected type < Int >; Int cannot represent non-integer value: \"x\"",
        ]);
    }
}

// =============================================================================
// Document literals
// =============================================================================

mod literals {
    use super::*;

    #[tokio::test]
    async fn enum_positions_only_accept_enum_literals() {
        let result = coerce_arg_literal("color", "GREEN", json!({})).await;
        assert_eq!(result.value(), Some(&json!(2)));

        let result = coerce_arg_literal("color", "\"GREEN\"", json!({})).await;
        assert_eq!(messages(&result), vec!["Expected type < Color >."]);
    }

    #[tokio::test]
    async fn scalar_positions_reject_enum_literals() {
        let result = coerce_arg_literal("int", "GREEN", json!({})).await;
        assert_eq!(messages(&result), vec!["Expected type < Int >."]);
    }

    #[tokio::test]
    async fn nested_variables_are_taken_as_already_coerced() {
        let result = coerce_arg_literal("filter", "{name: $n}", json!({"n": 5})).await;
        assert_eq!(result.value(), Some(&json!({"name": 5, "limit": 10})));

        let result = coerce_arg_literal("color", "$c", json!({"c": 2})).await;
        assert_eq!(result.value(), Some(&json!(2)));
    }

    #[tokio::test]
    async fn directives_skip_variable_references() {
        let result = coerce_arg_literal("clamped", "$v", json!({"v": 500})).await;
        assert_eq!(result.value(), Some(&json!(500)));

        let result = coerce_arg_literal("clamped", "500", json!({})).await;
        assert_eq!(result.value(), Some(&json!(100)));

        let result = coerce_arg_literal("filter", "{name: \"a\", limit: 75}", json!({})).await;
        assert_eq!(result.value(), Some(&json!({"name": "a", "limit": 50})));
    }

    #[tokio::test]
    async fn missing_variables_are_absent_fields_and_null_items() {
        let result = coerce_arg_literal(
            "filter",
            "{name: \"a\", limit: $missing}",
            json!({}),
        ).await;
        assert_eq!(result.value(), Some(&json!({"name": "a", "limit": 10})));

        let result = coerce_arg_literal("ints", "[1, $missing]", json!({})).await;
        assert_eq!(messages(&result), vec![
            "Expected non-nullable type < Int! > not to be null at value[1].",
        ]);
    }
}
