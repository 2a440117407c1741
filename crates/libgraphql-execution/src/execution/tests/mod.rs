mod argument_tests;
mod completion_tests;
mod operation_tests;

use crate::schema::SchemaBuildError;
use crate::schema::SchemaBuilder;
use crate::value::JsonMap;
use crate::value::JsonValue;
use crate::Engine;
use crate::Request;

type Result<T> = std::result::Result<T, SchemaBuildError>;

fn build_engine(
    sdl: &str,
    configure: impl FnOnce(SchemaBuilder) -> SchemaBuilder,
) -> Result<Engine> {
    let builder = SchemaBuilder::new().load_str(None, sdl)?;
    Ok(Engine::new(configure(builder).build()?))
}

async fn execute(engine: &Engine, query: &str) -> JsonValue {
    engine.execute(Request::new(query)).await.to_json()
}

async fn execute_with_variables(engine: &Engine, query: &str, variables: JsonValue) -> JsonValue {
    let variables = match variables {
        JsonValue::Object(variables) => variables,
        _ => JsonMap::new(),
    };
    engine.execute(Request::new(query).variables(variables)).await.to_json()
}

fn error_messages(response: &JsonValue) -> Vec<&str> {
    response["errors"]
        .as_array()
        .map(|errors| errors.iter().filter_map(|err| err["message"].as_str()).collect())
        .unwrap_or_default()
}
