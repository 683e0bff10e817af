pub(crate) mod bootstrap;
mod cli;

use std::io;
use std::process::ExitCode;

use tracing::error;

use bootstrap::AppWiring;
use cli::Invocation;

pub(crate) fn run(app: AppWiring) -> ExitCode {
    let invocation = match cli::parse_args(&app.args, app.default_config_path) {
        Ok(invocation) => invocation,
        Err(message) => {
            eprintln!("{message}\n\n{}", cli::usage_text());
            return ExitCode::from(2);
        }
    };

    let Invocation::Run { kind, options } = invocation else {
        println!("{}", cli::usage_text());
        return ExitCode::SUCCESS;
    };

    if let Err(message) = cli::run(kind, &options, &app.catalog, &mut io::stdout()) {
        error!(error = %message, "command_failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
