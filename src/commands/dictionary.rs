use clap::Args;
use serde::Serialize;

use propconv::dictionary::{self, Replacement};

use super::{CmdResult, ConfigArgs};

#[derive(Args)]
pub struct DictionaryArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum DictionaryOutput {
    #[serde(rename = "dictionary")]
    Dictionary {
        path: String,
        total: usize,
        /// In the order they are applied.
        entries: Vec<Replacement>,
    },
}

pub fn run(args: DictionaryArgs) -> CmdResult<DictionaryOutput> {
    let config = args.config.resolve()?.config;
    let loaded = dictionary::load(&config.dictionary)?;

    Ok((
        DictionaryOutput::Dictionary {
            path: config.dictionary.display().to_string(),
            total: loaded.len(),
            entries: loaded.entries().to_vec(),
        },
        0,
    ))
}
