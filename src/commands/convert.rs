use clap::Args;
use serde::Serialize;

use propconv::converter::{self, ConversionReport, ConvertOptions};

use super::{CmdResult, ConfigArgs};

#[derive(Args)]
pub struct ConvertArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum ConvertOutput {
    #[serde(rename = "convert")]
    Convert {
        #[serde(flatten)]
        report: ConversionReport,
    },
}

pub fn run(args: ConvertArgs, global: &crate::commands::GlobalArgs) -> CmdResult<ConvertOutput> {
    let resolved = args.config.resolve()?;
    let options = ConvertOptions {
        dry_run: global.dry_run,
    };

    let report = converter::convert(&resolved.config, options)?;

    // Partial runs still report every file; the exit code flags them.
    let exit_code = if report.has_failures() { 1 } else { 0 };

    Ok((ConvertOutput::Convert { report }, exit_code))
}
