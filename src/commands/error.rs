use clap::{Args, Subcommand};
use serde::Serialize;

use super::CmdResult;

#[derive(Args)]
pub struct ErrorArgs {
    #[command(subcommand)]
    command: ErrorCommand,
}

#[derive(Subcommand)]
enum ErrorCommand {
    /// List available propconv error codes
    Codes,
    /// Explain an error code
    Explain {
        /// Error code (example: `dictionary.not_found`)
        code: String,
    },
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum ErrorOutput {
    #[serde(rename = "error.codes")]
    Codes {
        codes: Vec<propconv::error::ErrorHelpSummary>,
    },
    #[serde(rename = "error.explain")]
    Explain { help: propconv::error::ErrorHelp },
}

pub fn run(args: ErrorArgs) -> CmdResult<ErrorOutput> {
    match args.command {
        ErrorCommand::Codes => Ok((
            ErrorOutput::Codes {
                codes: propconv::error::list(),
            },
            0,
        )),
        ErrorCommand::Explain { code } => {
            let Some(code_enum) = propconv::error::parse_code(&code) else {
                let tried = propconv::ErrorCode::all()
                    .iter()
                    .map(|c| c.as_str().to_string())
                    .collect();
                return Err(propconv::Error::validation_invalid_argument(
                    "code",
                    format!("Unknown error code '{}'", code),
                    Some(code),
                    Some(tried),
                ));
            };

            Ok((
                ErrorOutput::Explain {
                    help: propconv::error::explain(code_enum),
                },
                0,
            ))
        }
    }
}
