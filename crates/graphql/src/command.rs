use crate::output_utils;
use crate::schema_files;
use crate::schema_files::FoundSchemaFiles;
use crate::Cli;
use crate::CommandResult;
use libgraphql_execution::schema::Schema;
use libgraphql_execution::schema::SchemaBuilder;
use std::path::PathBuf;

pub(crate) trait RunnableCommand: std::fmt::Debug {
    async fn run(self, cli: Cli) -> CommandResult;
}

/// Finds and loads every schema file at or under `paths`, then builds the
/// schema. Any failure is returned as the [CommandResult] to report.
pub(crate) fn load_schema(
    paths: &[PathBuf],
    file_exts: &[String],
) -> Result<(Schema, FoundSchemaFiles), CommandResult> {
    let found = schema_files::find_schema_files(paths, file_exts);
    if !found.errors.is_empty() {
        return Err(CommandResult::stderr(format_args!(
            "{} Errors finding schema files: {:#?}",
            output_utils::RED_X,
            found.errors,
        )));
    }

    match SchemaBuilder::from_files(&found.file_paths).and_then(SchemaBuilder::build) {
        Ok(schema) => Ok((schema, found)),
        Err(err) => Err(CommandResult::stderr(format_args!(
            "{} Errors building schema: {err:#?}",
            output_utils::RED_X,
        ))),
    }
}
