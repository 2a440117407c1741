use crate::command;
use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use anyhow::Context;
use libgraphql_execution::read_content;
use libgraphql_execution::Engine;
use libgraphql_execution::JsonMap;
use libgraphql_execution::JsonValue;
use libgraphql_execution::Request;
use std::path::Path;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct ExecuteCmd {
    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "graphqls".to_string(),
        ],
        help="Set of file extensions to filter to when searching for schema \
             files within a directory.",
        long,
        value_delimiter = ',',
    )]
    graphql_file_exts: Vec<String>,

    #[arg(
        help="Name of the operation to execute when the query file contains \
             more than one.",
        long,
    )]
    operation_name: Option<String>,

    #[arg(
        help="Path to a JSON file whose value is the parent of the root \
             fields. Fields without a resolver read from it.",
        long,
    )]
    root_value: Option<PathBuf>,

    #[arg(
        help="Paths to one or more GraphQL schema files or directories \
             containing them.",
        long,
        required=true,
        value_delimiter = ',',
    )]
    schema: Vec<PathBuf>,

    #[arg(
        help="Path to a JSON file holding an object of variable values.",
        long,
    )]
    variables: Option<PathBuf>,

    #[arg(
        help="Path to the file containing the GraphQL operation to execute.",
        name="QUERY_FILE_PATH",
    )]
    query_file_path: PathBuf,
}
impl ExecuteCmd {
    fn build_request(&self) -> anyhow::Result<Request> {
        let query = read_content(&self.query_file_path).context("Failed to read the query file")?;
        let mut request = Request::new(query);

        if let Some(operation_name) = &self.operation_name {
            request = request.operation_name(operation_name.as_str());
        }
        if let Some(root_value_path) = &self.root_value {
            request = request.root_value(read_json(root_value_path)?);
        }
        if let Some(variables_path) = &self.variables {
            request = request.variables(match read_json(variables_path)? {
                JsonValue::Object(variables) => variables,
                JsonValue::Null => JsonMap::new(),
                _ => anyhow::bail!(
                    "Variables file {variables_path:#?} must contain a JSON object",
                ),
            });
        }
        Ok(request)
    }
}

#[inherent::inherent]
impl RunnableCommand for ExecuteCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let (schema, _found) = match command::load_schema(&self.schema, &self.graphql_file_exts) {
            Ok(loaded) => loaded,
            Err(result) => return result,
        };

        let request = match self.build_request() {
            Ok(request) => request,
            Err(err) => return CommandResult::stderr(format_args!(
                "{} {err:#}",
                output_utils::RED_X,
            )),
        };

        let response = Engine::new(schema).execute(request).await;
        log::debug!("Executed with {} errors.", response.errors.len());
        let response_json = match serde_json::to_string_pretty(&response) {
            Ok(response_json) => response_json,
            Err(err) => return CommandResult::stderr(format_args!(
                "{} Failed to serialize the response: {err}",
                output_utils::RED_X,
            )),
        };

        if response.is_ok() {
            CommandResult::stdout(format_args!("{response_json}"))
        } else {
            CommandResult::stdout_with_failure(format_args!("{response_json}"))
        }
    }
}

fn read_json(path: &Path) -> anyhow::Result<JsonValue> {
    let content = read_content(path).context("Failed to read a JSON input file")?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file {path:#?}"))
}
