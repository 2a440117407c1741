mod execute;
mod validate_schema;

use crate::Cli;
use crate::CommandResult;
use execute::ExecuteCmd;
use validate_schema::ValidateSchemaCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "graphql")]
pub(crate) enum CommandEnum {
    Execute(Box<ExecuteCmd>),
    ValidateSchema(Box<ValidateSchemaCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Execute(cmd) => cmd.run(cli).await,
            Self::ValidateSchema(cmd) => cmd.run(cli).await,
        }
    }
}
