use clap::Args;
use std::path::PathBuf;

use propconv::config::{ConfigOverrides, ResolvedConfig};

pub type CmdResult<T> = propconv::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    pub dry_run: bool,
}

/// Configuration flags shared by every command that touches bundles.
///
/// Flags override `propconv.json` / `propconv.toml`, which override built-in
/// defaults.
#[derive(Args, Default, Debug)]
pub struct ConfigArgs {
    /// Config file (default: propconv.json or propconv.toml in the current directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory to scan
    #[arg(long, value_name = "DIR")]
    pub root: Option<String>,

    /// File-name substring identifying bundles to convert
    #[arg(long, value_name = "NAME")]
    pub base_name: Option<String>,

    /// Text inserted before the extension of each output file
    #[arg(long)]
    pub suffix: Option<String>,

    /// Replacement dictionary (key=value file)
    #[arg(long, value_name = "PATH")]
    pub dictionary: Option<String>,

    /// Glob of root-relative paths to skip (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Do not write the timestamp comment at the top of output files
    #[arg(long)]
    pub no_timestamp: bool,
}

impl ConfigArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            root: self.root.clone(),
            base_name: self.base_name.clone(),
            suffix: self.suffix.clone(),
            dictionary: self.dictionary.clone(),
            exclude: self.exclude.clone(),
            no_timestamp: self.no_timestamp,
        }
    }

    pub fn resolve(&self) -> propconv::Result<ResolvedConfig> {
        propconv::config::resolve(self.config.as_deref(), &self.overrides())
    }
}

pub mod config;
pub mod convert;
pub mod dictionary;
pub mod error;
pub mod scan;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args))
    };
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (propconv::Result<serde_json::Value>, i32) {
    crate::tty::status("propconv is working...");

    match command {
        // Commands without global context
        crate::Commands::Scan(args) => dispatch!(args, scan),
        crate::Commands::Dictionary(args) => dispatch!(args, dictionary),
        crate::Commands::Config(args) => dispatch!(args, config),
        crate::Commands::Error(args) => dispatch!(args, error),

        // Commands with global context
        crate::Commands::Convert(args) => dispatch!(args, global, convert),
    }
}
