use clap::Args;
use serde::Serialize;

use propconv::config::ResolvedConfig;

use super::{CmdResult, ConfigArgs as SharedConfigArgs};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    config: SharedConfigArgs,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum ConfigOutput {
    #[serde(rename = "config")]
    Show {
        #[serde(flatten)]
        resolved: ResolvedConfig,
    },
}

pub fn run(args: ConfigArgs) -> CmdResult<ConfigOutput> {
    let resolved = args.config.resolve()?;
    Ok((ConfigOutput::Show { resolved }, 0))
}
