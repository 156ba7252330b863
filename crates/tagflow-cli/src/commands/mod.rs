mod listen;
mod process;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Process(args) => process::run(args),
        Command::Listen(args) => {
            // the local UTC offset is only queryable before worker threads exist,
            // so the runtime is started here rather than in main
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(listen::run(args))
        }
    }
}
