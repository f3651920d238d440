use clap::Args;
use serde::Serialize;

use propconv::{converter, scanner};

use super::{CmdResult, ConfigArgs};

#[derive(Args)]
pub struct ScanArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum ScanOutput {
    #[serde(rename = "scan")]
    Scan {
        root: String,
        base_name: String,
        total: usize,
        files: Vec<ScanEntry>,
    },
}

#[derive(Serialize)]
pub struct ScanEntry {
    pub source: String,
    pub output: Option<String>,
}

pub fn run(args: ScanArgs) -> CmdResult<ScanOutput> {
    let config = args.config.resolve()?.config;

    let files = scanner::find_matching_files(&config.root, &config.base_name, &config.exclude)?;
    let entries: Vec<ScanEntry> = files
        .iter()
        .map(|file| ScanEntry {
            source: file.display().to_string(),
            output: converter::output_path(file, &config.base_name, &config.suffix)
                .map(|p| p.display().to_string()),
        })
        .collect();

    Ok((
        ScanOutput::Scan {
            root: config.root.display().to_string(),
            base_name: config.base_name,
            total: entries.len(),
            files: entries,
        },
        0,
    ))
}
