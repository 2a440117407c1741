use crate::execution::tests::build_engine;
use crate::execution::tests::error_messages;
use crate::execution::tests::execute;
use crate::execution::tests::execute_with_variables;
use crate::execution::tests::Result;
use crate::resolver::Resolver;
use crate::value::JsonValue;
use crate::Engine;
use serde_json::json;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

const ECHO_SDL: &str = concat!(
    "type Query {\n",
    "  echo(text: String!, times: Int = 1): String\n",
    "  takeFoo(foo: Foo): String\n",
    "  takeInt(x: Int!): Int\n",
    "}\n",
    "input Foo { a: Int b: String = \"bee\" }\n",
);

/// Builds the echo schema, counting every resolver invocation.
fn build_echo_engine(calls: &Arc<AtomicUsize>) -> Result<Engine> {
    let echo_calls = calls.clone();
    let foo_calls = calls.clone();
    let int_calls = calls.clone();
    build_engine(ECHO_SDL, move |builder| builder
        .resolver("Query.echo", Resolver::from_fn(move |params| {
            echo_calls.fetch_add(1, Ordering::SeqCst);
            let text = params.argument("text").and_then(JsonValue::as_str).unwrap_or_default();
            let times = params.argument("times").and_then(JsonValue::as_u64).unwrap_or(0);
            Ok(json!(text.repeat(times as usize)))
        }))
        .resolver("Query.takeFoo", Resolver::from_fn(move |params| {
            foo_calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!(params.argument("foo").map(JsonValue::to_string)))
        }))
        .resolver("Query.takeInt", Resolver::from_fn(move |params| {
            int_calls.fetch_add(1, Ordering::SeqCst);
            Ok(params.argument("x").cloned().unwrap_or(JsonValue::Null))
        })))
}

// =============================================================================
// Literal arguments
// =============================================================================

mod literal_arguments {
    use super::*;

    #[tokio::test]
    async fn provided_and_default_arguments() -> Result<()> {
        let engine = build_echo_engine(&Arc::new(AtomicUsize::new(0)))?;

        let response = execute(
            &engine,
            "{ a: echo(text: \"hi\", times: 3) b: echo(text: \"hi\") }",
        ).await;
        assert_eq!(response, json!({"data": {"a": "hihihi", "b": "hi"}}));
        Ok(())
    }

    #[tokio::test]
    async fn missing_required_argument_nulls_the_field() -> Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let engine = build_echo_engine(&calls)?;

        let response = execute(&engine, "{ echo }").await;
        assert_eq!(response, json!({
            "data": {"echo": null},
            "errors": [{
                "message": "Argument < text > of required type < String! > was not provided.",
                "locations": [{"line": 1, "column": 3}],
                "path": ["echo"],
            }],
        }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        Ok(())
    }

    #[tokio::test]
    async fn explicit_null_for_non_null_argument() -> Result<()> {
        let engine = build_echo_engine(&Arc::new(AtomicUsize::new(0)))?;

        let response = execute(&engine, "{ echo(text: null) }").await;
        assert_eq!(error_messages(&response), vec![
            "Argument < text > of non-null type < String! > must not be null.",
        ]);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_literal_reports_the_coercion_failure() -> Result<()> {
        let engine = build_echo_engine(&Arc::new(AtomicUsize::new(0)))?;

        let response = execute(&engine, "{ echo(text: 5) }").await;
        assert_eq!(response["data"], json!({"echo": null}));
        assert_eq!(error_messages(&response), vec![
            "Argument < text > has invalid value < 5 >; Expected type < String >; String \
            cannot represent a non string value: 5",
        ]);
        Ok(())
    }

    #[tokio::test]
    async fn enum_literals_are_not_strings() -> Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let engine = build_echo_engine(&calls)?;

        let response = execute(&engine, "{ echo(text: HELLO) }").await;
        assert_eq!(response, json!({
            "data": {"echo": null},
            "errors": [{
                "message": "Argument < text > has invalid value < HELLO >; Expected type < \
                    String >.",
                "locations": [{"line": 1, "column": 3}],
                "path": ["echo"],
            }],
        }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        Ok(())
    }

    #[tokio::test]
    async fn merged_selections_report_argument_errors_at_the_first_selection() -> Result<()> {
        let engine = build_echo_engine(&Arc::new(AtomicUsize::new(0)))?;

        let response = execute(&engine, concat!(
            "{ takeInt ...IntAgain }\n",
            "fragment IntAgain on Query { takeInt }\n",
        )).await;
        assert_eq!(response, json!({
            "data": {"takeInt": null},
            "errors": [{
                "message": "Argument < x > of required type < Int! > was not provided.",
                "locations": [{"line": 1, "column": 3}],
                "path": ["takeInt"],
            }],
        }));
        Ok(())
    }

    #[tokio::test]
    async fn input_object_defaults_are_filled_in() -> Result<()> {
        let engine = build_echo_engine(&Arc::new(AtomicUsize::new(0)))?;

        let response = execute(&engine, "{ takeFoo(foo: {a: 1}) }").await;
        assert_eq!(response, json!({"data": {"takeFoo": "{\"a\":1,\"b\":\"bee\"}"}}));
        Ok(())
    }
}

// =============================================================================
// Variables
// =============================================================================

mod variables {
    use super::*;

    #[tokio::test]
    async fn variables_are_substituted() -> Result<()> {
        let engine = build_echo_engine(&Arc::new(AtomicUsize::new(0)))?;

        let response = execute_with_variables(
            &engine,
            "query Echo($t: String!, $n: Int) { echo(text: $t, times: $n) }",
            json!({"t": "ab", "n": 3}),
        ).await;
        assert_eq!(response, json!({"data": {"echo": "ababab"}}));
        Ok(())
    }

    #[tokio::test]
    async fn absent_variable_falls_back_to_the_argument_default() -> Result<()> {
        let engine = build_echo_engine(&Arc::new(AtomicUsize::new(0)))?;

        let response = execute_with_variables(
            &engine,
            "query Echo($t: String!, $n: Int) { echo(text: $t, times: $n) }",
            json!({"t": "ab"}),
        ).await;
        assert_eq!(response, json!({"data": {"echo": "ab"}}));
        Ok(())
    }

    #[tokio::test]
    async fn variable_defaults_are_used() -> Result<()> {
        let engine = build_echo_engine(&Arc::new(AtomicUsize::new(0)))?;

        let response = execute_with_variables(
            &engine,
            "query Echo($t: String = \"yo\") { echo(text: $t, times: 2) }",
            json!({}),
        ).await;
        assert_eq!(response, json!({"data": {"echo": "yoyo"}}));
        Ok(())
    }

    #[tokio::test]
    async fn missing_required_variable_aborts_execution() -> Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let engine = build_echo_engine(&calls)?;

        let response = execute_with_variables(
            &engine,
            "query Q($x: Int!) { takeInt(x: $x) }",
            json!({}),
        ).await;
        assert_eq!(response["data"], json!(null));
        assert_eq!(error_messages(&response), vec![
            "Variable < $x > of required type < Int! > was not provided.",
        ]);
        assert!(response["errors"][0].get("path").is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        Ok(())
    }

    #[tokio::test]
    async fn every_invalid_variable_is_reported() -> Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let engine = build_echo_engine(&calls)?;

        let response = execute_with_variables(
            &engine,
            "query Echo($t: String!, $n: Int, $x: Int!) { echo(text: $t, times: $n) }",
            json!({"t": 1, "n": "x", "x": null}),
        ).await;
        assert_eq!(response["data"], json!(null));
        assert_eq!(error_messages(&response), vec![
            "Variable < $t > got invalid value < 1 >; Expected type < String >; String cannot \
            represent a non string value: 1",
            "Variable < $n > got invalid value < \"x\" >; Expected type < Int >; Int cannot \
            represent non-integer value: \"x\"",
            "Variable < $x > of non-null type < Int! > must not be null.",
        ]);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        Ok(())
    }

    #[tokio::test]
    async fn variables_of_output_types_are_rejected() -> Result<()> {
        let engine = build_engine("type Query { a(x: Int): Int }\ntype User { id: ID }", |b| b)?;

        let response = execute_with_variables(
            &engine,
            "query Q($u: User) { a }",
            json!({}),
        ).await;
        assert_eq!(error_messages(&response), vec![
            "Variable < $u > expected value of type < User > which cannot be used as an input \
            type.",
        ]);
        Ok(())
    }

    #[tokio::test]
    async fn undeclared_input_object_fields_are_rejected() -> Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let engine = build_echo_engine(&calls)?;

        let response = execute_with_variables(
            &engine,
            "query Q($foo: Foo) { takeFoo(foo: $foo) }",
            json!({"foo": {"a": 1, "unknownField": 1}}),
        ).await;
        assert_eq!(response["data"], json!(null));
        assert_eq!(error_messages(&response), vec![
            "Variable < $foo > got invalid value < {\"a\":1,\"unknownField\":1} >; Field < \
            unknownField > is not defined by type < Foo >.",
        ]);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let response = execute_with_variables(
            &engine,
            "query Q($foo: Foo) { takeFoo(foo: $foo) }",
            json!({"foo": {"a": 1}}),
        ).await;
        assert_eq!(response, json!({"data": {"takeFoo": "{\"a\":1,\"b\":\"bee\"}"}}));
        Ok(())
    }

    #[tokio::test]
    async fn variables_nested_in_literals_are_coerced_with_the_literal() -> Result<()> {
        let engine = build_echo_engine(&Arc::new(AtomicUsize::new(0)))?;

        let response = execute_with_variables(
            &engine,
            "query Q($a: Int) { takeFoo(foo: {a: $a, b: \"see\"}) }",
            json!({"a": 4}),
        ).await;
        assert_eq!(response, json!({"data": {"takeFoo": "{\"a\":4,\"b\":\"see\"}"}}));
        Ok(())
    }

    #[tokio::test]
    async fn variable_for_required_argument_without_runtime_value() -> Result<()> {
        let engine = build_echo_engine(&Arc::new(AtomicUsize::new(0)))?;

        let response = execute_with_variables(
            &engine,
            "query Q($x: Int) { takeInt(x: $x) }",
            json!({}),
        ).await;
        assert_eq!(response["data"], json!({"takeInt": null}));
        assert_eq!(error_messages(&response), vec![
            "Argument < x > of required type < Int! > was provided the variable < $x > which \
            was not provided a runtime value.",
        ]);
        Ok(())
    }
}

// =============================================================================
// Enum arguments
// =============================================================================

mod enum_arguments {
    use super::*;

    const COLOR_SDL: &str = concat!(
        "type Query {\n",
        "  take(f: F): String\n",
        "  takeC(c: Color): String\n",
        "  takeD(c: Color = RED): String\n",
        "  takeL(cs: [Color]): String\n",
        "}\n",
        "enum Color { RED BLUE }\n",
        "input F { c: Color d: Color = BLUE }\n",
    );

    /// Resolves to the JSON text of the `arg_name` argument.
    fn stringify(arg_name: &'static str) -> Resolver {
        Resolver::from_fn(move |params| {
            Ok(json!(params.argument(arg_name).map(JsonValue::to_string)))
        })
    }

    fn build_color_engine() -> Result<Engine> {
        build_engine(COLOR_SDL, |builder| builder
            .enum_value("Color.RED", json!(1))
            .enum_value("Color.BLUE", json!(2))
            .resolver("Query.take", stringify("f"))
            .resolver("Query.takeC", stringify("c"))
            .resolver("Query.takeD", stringify("c"))
            .resolver("Query.takeL", stringify("cs")))
    }

    #[tokio::test]
    async fn enum_literals_map_onto_internal_values() -> Result<()> {
        let engine = build_color_engine()?;

        let response = execute(
            &engine,
            "{ takeC(c: BLUE) takeL(cs: [RED, BLUE]) take(f: {c: RED}) }",
        ).await;
        assert_eq!(response, json!({
            "data": {"takeC": "2", "takeL": "[1,2]", "take": "{\"c\":1,\"d\":2}"},
        }));
        Ok(())
    }

    #[tokio::test]
    async fn variables_nested_in_literals_are_not_coerced_again() -> Result<()> {
        let engine = build_color_engine()?;

        let response = execute_with_variables(
            &engine,
            "query Q($c: Color) { take(f: {c: $c}) takeL(cs: [$c]) takeC(c: $c) }",
            json!({"c": "RED"}),
        ).await;
        assert_eq!(response, json!({
            "data": {"take": "{\"c\":1,\"d\":2}", "takeL": "[1]", "takeC": "1"},
        }));
        Ok(())
    }

    #[tokio::test]
    async fn missing_nested_variables_are_left_out() -> Result<()> {
        let engine = build_color_engine()?;

        let response = execute_with_variables(
            &engine,
            "query Q($c: Color, $d: Color) { take(f: {c: $c, d: $d}) takeL(cs: [$c]) }",
            json!({"c": "BLUE"}),
        ).await;
        assert_eq!(response, json!({
            "data": {"take": "{\"c\":2,\"d\":2}", "takeL": "[2]"},
        }));
        Ok(())
    }

    #[tokio::test]
    async fn string_literals_are_not_enum_values() -> Result<()> {
        let engine = build_color_engine()?;

        let response = execute(&engine, "{ takeC(c: \"RED\") }").await;
        assert_eq!(response, json!({
            "data": {"takeC": null},
            "errors": [{
                "message": "Argument < c > has invalid value < \"RED\" >; Expected type < \
                    Color >.",
                "locations": [{"line": 1, "column": 3}],
                "path": ["takeC"],
            }],
        }));
        Ok(())
    }

    #[tokio::test]
    async fn schema_defaults_match_variable_defaults() -> Result<()> {
        let engine = build_color_engine()?;

        let response = execute(
            &engine,
            "query Q($c: Color = RED) { takeD viaVar: takeC(c: $c) take(f: {}) }",
        ).await;
        assert_eq!(response, json!({
            "data": {"takeD": "1", "viaVar": "1", "take": "{\"d\":2}"},
        }));
        Ok(())
    }
}
