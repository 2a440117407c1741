use crate::ast;
use crate::execution::tests::build_engine;
use crate::execution::tests::error_messages;
use crate::execution::tests::execute;
use crate::execution::tests::Result;
use crate::resolver::Resolver;
use crate::resolver::ResolverError;
use crate::Request;
use serde_json::json;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

/// A resolver that sleeps for `millis`, then appends `name` to `log`.
fn logging_resolver(
    log: &Arc<Mutex<Vec<&'static str>>>,
    name: &'static str,
    millis: u64,
) -> Resolver {
    let log = log.clone();
    Resolver::new(move |_| {
        let log = log.clone();
        Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(millis)).await;
            if let Ok(mut log) = log.lock() {
                log.push(name);
            }
            Ok(json!(name))
        })
    })
}

// =============================================================================
// Operation selection
// =============================================================================

mod operation_selection {
    use super::*;

    const SDL: &str = "type Query { a: Int }";

    #[tokio::test]
    async fn named_operation_is_selected() -> Result<()> {
        let engine = build_engine(SDL, |builder| builder
            .resolver("Query.a", Resolver::value(json!(1))))?;

        let response = engine.execute(
            Request::new("query One { one: a } query Two { two: a }").operation_name("Two"),
        ).await;
        assert_eq!(response.to_json(), json!({"data": {"two": 1}}));
        Ok(())
    }

    #[tokio::test]
    async fn multiple_operations_require_a_name() -> Result<()> {
        let engine = build_engine(SDL, |builder| builder)?;

        let response = execute(&engine, "query One { a } query Two { a }").await;
        assert_eq!(response, json!({
            "data": null,
            "errors": [{
                "message": "Must provide operation name if query contains multiple operations.",
            }],
        }));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_operation_name() -> Result<()> {
        let engine = build_engine(SDL, |builder| builder)?;

        let response = engine.execute(Request::new("query One { a }").operation_name("Nope")).await;
        assert_eq!(error_messages(&response.to_json()), vec!["Unknown operation named < Nope >."]);
        assert_eq!(response.data, None);
        Ok(())
    }

    #[tokio::test]
    async fn documents_without_operations() -> Result<()> {
        let engine = build_engine(SDL, |builder| builder)?;

        let response = execute(&engine, "fragment F on Query { a }").await;
        assert_eq!(error_messages(&response), vec!["Must provide an operation."]);
        Ok(())
    }

    #[tokio::test]
    async fn operations_without_a_root_type() -> Result<()> {
        let engine = build_engine(SDL, |builder| builder)?;

        let response = execute(&engine, "mutation { a }").await;
        assert_eq!(response, json!({
            "data": null,
            "errors": [{
                "message": "Schema is not configured to execute < mutation > operation.",
                "locations": [{"line": 1, "column": 1}],
            }],
        }));
        Ok(())
    }

    #[tokio::test]
    async fn parse_errors_produce_a_single_error() -> Result<()> {
        let engine = build_engine(SDL, |builder| builder)?;

        let response = engine.execute(Request::new("{ a ")).await;
        assert_eq!(response.data, None);
        assert_eq!(response.errors.len(), 1);
        assert!(response.errors[0].get("path").is_none());
        Ok(())
    }
}

// =============================================================================
// Root field ordering
// =============================================================================

mod root_field_ordering {
    use super::*;

    const SDL: &str = concat!(
        "type Query { slow: String fast: String }\n",
        "type Mutation { slow: String failing: String fast: String }\n",
    );

    #[tokio::test]
    async fn mutation_fields_run_one_after_another() -> Result<()> {
        let log = Arc::new(Mutex::new(vec![]));
        let failing_log = log.clone();
        let engine = build_engine(SDL, |builder| builder
            .resolver("Mutation.slow", logging_resolver(&log, "slow", 50))
            .resolver("Mutation.failing", Resolver::from_fn(move |_| {
                if let Ok(mut log) = failing_log.lock() {
                    log.push("failing");
                }
                Err(ResolverError::message("no"))
            }))
            .resolver("Mutation.fast", logging_resolver(&log, "fast", 0)))?;

        let response = execute(&engine, "mutation { slow failing fast }").await;
        assert_eq!(response["data"], json!({"slow": "slow", "failing": null, "fast": "fast"}));
        assert_eq!(error_messages(&response), vec!["no"]);
        assert_eq!(log.lock().map(|log| log.clone()).unwrap_or_default(), vec![
            "slow",
            "failing",
            "fast",
        ]);
        Ok(())
    }

    #[tokio::test]
    async fn query_fields_run_concurrently() -> Result<()> {
        let log = Arc::new(Mutex::new(vec![]));
        let engine = build_engine(SDL, |builder| builder
            .resolver("Query.slow", logging_resolver(&log, "slow", 200))
            .resolver("Query.fast", logging_resolver(&log, "fast", 200)))?;

        let started = tokio::time::Instant::now();
        let response = execute(&engine, "{ slow fast }").await;
        assert!(started.elapsed() < Duration::from_millis(350));

        let keys: Vec<&str> = response["data"]
            .as_object()
            .map(|data| data.keys().map(String::as_str).collect())
            .unwrap_or_default();
        assert_eq!(keys, vec!["slow", "fast"]);
        Ok(())
    }

    #[tokio::test]
    async fn query_results_keep_selection_order_regardless_of_completion() -> Result<()> {
        let log = Arc::new(Mutex::new(vec![]));
        let engine = build_engine(SDL, |builder| builder
            .resolver("Query.slow", logging_resolver(&log, "slow", 100))
            .resolver("Query.fast", logging_resolver(&log, "fast", 0)))?;

        let response = execute(&engine, "{ slow fast }").await;
        assert_eq!(response, json!({"data": {"slow": "slow", "fast": "fast"}}));
        assert_eq!(log.lock().map(|log| log.clone()).unwrap_or_default(), vec!["fast", "slow"]);
        Ok(())
    }
}

// =============================================================================
// Request options
// =============================================================================

mod request_options {
    use super::*;

    #[derive(Debug)]
    struct Viewer {
        name: &'static str,
    }

    #[tokio::test]
    async fn root_value_is_the_parent_of_root_fields() -> Result<()> {
        let engine = build_engine("type Query { greeting: String }", |builder| builder)?;

        let response = engine.execute(
            Request::new("{ greeting }").root_value(json!({"greeting": "from root"})),
        ).await;
        assert_eq!(response.to_json(), json!({"data": {"greeting": "from root"}}));
        Ok(())
    }

    #[tokio::test]
    async fn context_is_handed_to_resolvers() -> Result<()> {
        let engine = build_engine("type Query { me: String }", |builder| builder
            .resolver("Query.me", Resolver::from_fn(|params| {
                Ok(json!(params.context::<Viewer>().map(|viewer| viewer.name)))
            })))?;

        let response = engine.execute(Request::new("{ me }").context(Viewer { name: "ada" })).await;
        assert_eq!(response.to_json(), json!({"data": {"me": "ada"}}));

        let response = engine.execute(Request::new("{ me }")).await;
        assert_eq!(response.to_json(), json!({"data": {"me": null}}));
        Ok(())
    }

    #[tokio::test]
    async fn custom_error_coercer_shapes_errors() -> Result<()> {
        let engine = build_engine("type Query { a: Int }", |builder| builder
            .resolver("Query.a", Resolver::from_fn(|_| Err(ResolverError::message("boom")))))?
            .with_error_coercer(|err| json!({"msg": err.message, "code": "INTERNAL"}));

        let response = execute(&engine, "{ a }").await;
        assert_eq!(response, json!({
            "data": {"a": null},
            "errors": [{"msg": "boom", "code": "INTERNAL"}],
        }));
        Ok(())
    }

    #[tokio::test]
    async fn pre_parsed_documents_can_be_executed() -> Result<()> {
        let engine = build_engine("type Query { a: Int }", |builder| builder
            .resolver("Query.a", Resolver::value(json!(3))))?;
        let document = ast::query::parse("{ a }").expect("query should parse");

        let response = engine.execute_document(&document, Request::new("ignored")).await;
        assert_eq!(response.to_json(), json!({"data": {"a": 3}}));
        assert_eq!(
            serde_json::to_value(&response).ok(),
            Some(json!({"data": {"a": 3}})),
        );
        Ok(())
    }
}
