use crate::command;
use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct ValidateSchemaCmd {
    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "graphqls".to_string(),
        ],
        help="Set of file extensions to filter to when searching for files \
             within a directory.",
        long,
        value_delimiter = ',',
    )]
    graphql_file_exts: Vec<String>,

    #[arg(
        help="Paths to one or more GraphQL schema files or directories \
             containing GraphQL schema files which need to be validated.",
        name="FILE_OR_DIR_PATHS",
        required=true,
    )]
    file_or_dir_paths: Vec<PathBuf>,
}

#[inherent::inherent]
impl RunnableCommand for ValidateSchemaCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let (schema, found) = match command::load_schema(
            &self.file_or_dir_paths,
            &self.graphql_file_exts,
        ) {
            Ok(loaded) => loaded,
            Err(result) => return result,
        };

        let num_builtin_directives =
            schema.defined_directives()
                .values()
                .filter(|directive_def| directive_def.is_builtin())
                .count();
        CommandResult::stdout(format_args!(
            concat!(
                "{} Schema validated successfully:\n",
                "  * Analyzed {} files.\n",
                "  * Skipped {} non-graphql files.\n",
                "  * Validated {} type definitions.\n",
                "  * Validated {} directive definitions ({} built-in).",
            ),
            output_utils::GREEN_CHECK,
            found.file_paths.len(),
            found.num_skipped_files,
            schema.defined_types().len(),
            schema.defined_directives().len(),
            num_builtin_directives,
        ))
    }
}
