use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;
mod tty;

use commands::{config, convert, dictionary, error, scan};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "propconv")]
#[command(version = VERSION)]
#[command(about = "Rewrite properties bundles through a replacement dictionary")]
struct Cli {
    /// Dry-run: show what would happen without writing.
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every matching bundle under the root
    Convert(convert::ConvertArgs),
    /// List matching bundles and where their output would go
    Scan(scan::ScanArgs),
    /// Show the replacement dictionary in substitution order
    Dictionary(dictionary::DictionaryArgs),
    /// Show the resolved configuration
    Config(config::ConfigArgs),
    /// Explain propconv error codes
    Error(error::ErrorArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let global = GlobalArgs {
        dry_run: cli.dry_run,
    };

    let (json_result, exit_code) = commands::run_json(cli.command, &global);

    // stdout is the only output channel left; nothing useful to do if it is gone.
    let _ = output::print_json_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
