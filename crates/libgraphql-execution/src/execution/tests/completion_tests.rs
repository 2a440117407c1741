use crate::execution::tests::build_engine;
use crate::execution::tests::error_messages;
use crate::execution::tests::execute;
use crate::execution::tests::Result;
use crate::resolver::Resolver;
use crate::resolver::ResolverError;
use serde_json::json;

// =============================================================================
// Successful execution
// =============================================================================

mod successful_execution {
    use super::*;

    #[tokio::test]
    async fn hello_world() -> Result<()> {
        let engine = build_engine("type Query { hello: String }", |builder| {
            builder.resolver("Query.hello", Resolver::value(json!("world")))
        })?;

        let response = execute(&engine, "{ hello }").await;
        assert_eq!(response, json!({"data": {"hello": "world"}}));
        Ok(())
    }

    #[tokio::test]
    async fn response_keys_follow_selection_order() -> Result<()> {
        let engine = build_engine(
            concat!(
                "type Query { user: User }\n",
                "type User { id: ID name: String age: Int }\n",
            ),
            |builder| builder.resolver(
                "Query.user",
                Resolver::value(json!({"age": 42, "name": "Ada", "id": 7})),
            ),
        )?;

        let response = execute(&engine, "{ user { name first: id age name } }").await;
        let user_keys: Vec<&str> = response["data"]["user"]
            .as_object()
            .map(|user| user.keys().map(String::as_str).collect())
            .unwrap_or_default();
        assert_eq!(user_keys, vec!["name", "first", "age"]);
        assert_eq!(response["data"]["user"], json!({"name": "Ada", "first": "7", "age": 42}));
        assert!(response.get("errors").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn typename_resolves_to_the_parent_type() -> Result<()> {
        let engine = build_engine(
            "type Query { user: User }\ntype User { id: ID }",
            |builder| builder.resolver("Query.user", Resolver::value(json!({"id": "1"}))),
        )?;

        let response = execute(&engine, "{ __typename user { __typename kind: __typename } }").await;
        assert_eq!(response, json!({
            "data": {
                "__typename": "Query",
                "user": {"__typename": "User", "kind": "User"},
            },
        }));
        Ok(())
    }

    #[tokio::test]
    async fn enum_values_serialize_to_their_names() -> Result<()> {
        let engine = build_engine(
            "type Query { color: Color colors: [Color] }\nenum Color { RED GREEN }",
            |builder| builder
                .enum_value("Color.RED", json!(1))
                .resolver("Query.color", Resolver::value(json!(1)))
                .resolver("Query.colors", Resolver::value(json!(["GREEN", 1]))),
        )?;

        let response = execute(&engine, "{ color colors }").await;
        assert_eq!(response, json!({"data": {"color": "RED", "colors": ["GREEN", "RED"]}}));
        Ok(())
    }

    #[tokio::test]
    async fn resolver_info_describes_the_field() -> Result<()> {
        let engine = build_engine(
            "type Query { user: User }\ntype User { describe: String }",
            |builder| builder
                .resolver("Query.user", Resolver::value(json!({})))
                .resolver("User.describe", Resolver::from_fn(|params| {
                    let info = params.info;
                    Ok(json!(format!(
                        "{} {} {} {}",
                        info.parent_type().name(),
                        info.field_name(),
                        info.response_key(),
                        serde_json::to_string(info.path()).unwrap_or_default(),
                    )))
                })),
        )?;

        let response = execute(&engine, "{ user { alias: describe } }").await;
        assert_eq!(
            response["data"]["user"]["alias"],
            json!("User describe alias [\"user\",\"alias\"]"),
        );
        Ok(())
    }
}

// =============================================================================
// Resolver errors
// =============================================================================

mod resolver_errors {
    use super::*;

    #[tokio::test]
    async fn resolver_errors_null_the_field() -> Result<()> {
        let engine = build_engine("type Query { a: Int b: Int }", |builder| builder
            .resolver("Query.a", Resolver::from_fn(|_| Err(ResolverError::message("boom"))))
            .resolver("Query.b", Resolver::value(json!(2))))?;

        let response = execute(&engine, "{ a b }").await;
        assert_eq!(response, json!({
            "data": {"a": null, "b": 2},
            "errors": [{
                "message": "boom",
                "locations": [{"line": 1, "column": 3}],
                "path": ["a"],
            }],
        }));
        Ok(())
    }

    #[tokio::test]
    async fn errors_without_a_message_get_a_generic_one() -> Result<()> {
        let engine = build_engine("type Query { a: Int }", |builder| builder
            .resolver("Query.a", Resolver::from_fn(|_| Err(ResolverError::message("  ")))))?;

        let response = execute(&engine, "{ a }").await;
        assert_eq!(error_messages(&response), vec!["Server encountered an error."]);
        Ok(())
    }

    #[tokio::test]
    async fn aggregate_errors_are_unpacked_at_the_same_location() -> Result<()> {
        let engine = build_engine("type Query { a: Int }", |builder| builder
            .resolver("Query.a", Resolver::from_fn(|_| Err(ResolverError::Multiple(vec![
                ResolverError::message("first"),
                ResolverError::message("second"),
            ])))))?;

        let response = execute(&engine, "{ a }").await;
        assert_eq!(error_messages(&response), vec!["first", "second"]);
        assert_eq!(response["errors"][0]["path"], response["errors"][1]["path"]);
        assert_eq!(response["errors"][0]["locations"], response["errors"][1]["locations"]);
        Ok(())
    }

    #[tokio::test]
    async fn scalar_serialization_failures_are_located() -> Result<()> {
        let engine = build_engine("type Query { count: Int }", |builder| builder
            .resolver("Query.count", Resolver::value(json!("abc"))))?;

        let response = execute(&engine, "{ count }").await;
        assert_eq!(response, json!({
            "data": {"count": null},
            "errors": [{
                "message": "Expected a value of type < Int >; Int cannot represent non-integer \
                    value: \"abc\"",
                "locations": [{"line": 1, "column": 3}],
                "path": ["count"],
            }],
        }));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_enum_values_fail_serialization() -> Result<()> {
        let engine = build_engine("type Query { color: Color }\nenum Color { RED }", |builder| {
            builder.resolver("Query.color", Resolver::value(json!("PURPLE")))
        })?;

        let response = execute(&engine, "{ color }").await;
        assert_eq!(response["data"], json!({"color": null}));
        assert_eq!(error_messages(&response), vec!["Expected a value of type < Color >."]);
        Ok(())
    }
}

// =============================================================================
// Non-null propagation
// =============================================================================

mod non_null_propagation {
    use super::*;

    #[tokio::test]
    async fn null_root_field_nulls_data() -> Result<()> {
        let engine = build_engine("type Query { name: String! other: Int }", |builder| builder
            .resolver("Query.name", Resolver::value(json!(null)))
            .resolver("Query.other", Resolver::value(json!(1))))?;

        let response = execute(&engine, "{ name other }").await;
        assert_eq!(response, json!({
            "data": null,
            "errors": [{
                "message": "Cannot return null for non-nullable field < Query.name >.",
                "locations": [{"line": 1, "column": 3}],
                "path": ["name"],
            }],
        }));
        Ok(())
    }

    #[tokio::test]
    async fn null_bubbles_to_the_nearest_nullable_ancestor() -> Result<()> {
        let engine = build_engine(
            concat!(
                "type Query { viewer: Viewer }\n",
                "type Viewer { user: User! }\n",
                "type User { id: ID! name: String! }\n",
            ),
            |builder| builder.resolver(
                "Query.viewer",
                Resolver::value(json!({"user": {"id": "1", "name": null}})),
            ),
        )?;

        let response = execute(&engine, "{ viewer { user { id name } } }").await;
        assert_eq!(response["data"], json!({"viewer": null}));
        assert_eq!(error_messages(&response), vec![
            "Cannot return null for non-nullable field < User.name >.",
        ]);
        assert_eq!(response["errors"][0]["path"], json!(["viewer", "user", "name"]));
        Ok(())
    }

    #[tokio::test]
    async fn failing_non_null_field_is_reported_once() -> Result<()> {
        let engine = build_engine("type Query { user: User }\ntype User { id: ID! }", |builder| {
            builder
                .resolver("Query.user", Resolver::value(json!({})))
                .resolver("User.id", Resolver::from_fn(|_| Err(ResolverError::message("nope"))))
        })?;

        let response = execute(&engine, "{ user { id } }").await;
        assert_eq!(response["data"], json!({"user": null}));
        assert_eq!(error_messages(&response), vec!["nope"]);
        Ok(())
    }
}

// =============================================================================
// Lists
// =============================================================================

mod lists {
    use super::*;

    fn list_sdl() -> &'static str {
        "type Query { nullableItems: [Int] items: [Int!] strictItems: [Int!]! other: Int }"
    }

    #[tokio::test]
    async fn nullable_items_absorb_nulls() -> Result<()> {
        let engine = build_engine(list_sdl(), |builder| builder
            .resolver("Query.nullableItems", Resolver::value(json!([1, null, 3]))))?;

        let response = execute(&engine, "{ nullableItems }").await;
        assert_eq!(response, json!({"data": {"nullableItems": [1, null, 3]}}));
        Ok(())
    }

    #[tokio::test]
    async fn null_non_null_item_nulls_a_nullable_list() -> Result<()> {
        let engine = build_engine(list_sdl(), |builder| builder
            .resolver("Query.items", Resolver::value(json!([1, null, 3])))
            .resolver("Query.other", Resolver::value(json!(5))))?;

        let response = execute(&engine, "{ items other }").await;
        assert_eq!(response["data"], json!({"items": null, "other": 5}));
        assert_eq!(error_messages(&response), vec![
            "Cannot return null for non-nullable field < Query.items >.",
        ]);
        assert_eq!(response["errors"][0]["path"], json!(["items", 1]));
        Ok(())
    }

    #[tokio::test]
    async fn null_non_null_item_in_non_null_list_nulls_data() -> Result<()> {
        let engine = build_engine(list_sdl(), |builder| builder
            .resolver("Query.strictItems", Resolver::value(json!([null, 2, null])))
            .resolver("Query.other", Resolver::value(json!(5))))?;

        let response = execute(&engine, "{ strictItems other }").await;
        assert_eq!(response["data"], json!(null));
        assert_eq!(
            response["errors"].as_array().map(|errors| {
                errors.iter().map(|err| err["path"].clone()).collect::<Vec<_>>()
            }),
            Some(vec![json!(["strictItems", 0]), json!(["strictItems", 2])]),
        );
        Ok(())
    }

    #[tokio::test]
    async fn non_list_values_are_rejected() -> Result<()> {
        let engine = build_engine(list_sdl(), |builder| builder
            .resolver("Query.nullableItems", Resolver::value(json!(5))))?;

        let response = execute(&engine, "{ nullableItems }").await;
        assert_eq!(response["data"], json!({"nullableItems": null}));
        assert_eq!(error_messages(&response), vec![
            "Expected Iterable, but did not find one for field < Query.nullableItems >.",
        ]);
        Ok(())
    }

    #[tokio::test]
    async fn lists_of_objects_complete_each_item() -> Result<()> {
        let engine = build_engine(
            "type Query { users: [User] }\ntype User { name: String! }",
            |builder| builder.resolver(
                "Query.users",
                Resolver::value(json!([{"name": "a"}, {"name": null}, {"name": "c"}])),
            ),
        )?;

        let response = execute(&engine, "{ users { name } }").await;
        assert_eq!(
            response["data"],
            json!({"users": [{"name": "a"}, null, {"name": "c"}]}),
        );
        assert_eq!(response["errors"][0]["path"], json!(["users", 1, "name"]));
        Ok(())
    }
}
