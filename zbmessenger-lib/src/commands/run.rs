//! Command dispatch logic for zbmessenger

use super::common::GlobalArgs;
use super::{InitArgs, ParseArgs, SendArgs, init_config, parse_report, send_report, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "zbmessenger", version, author, long_about = None)]
#[command(about = "Forward Bacula job reports to Zabbix as metrics")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the metrics of a job report and send them with `zabbix_sender`
    Send(SendArgs),
    /// Extract the metrics of a job report and print them
    Parse(ParseArgs),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate,
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);

    match &cli.command {
        Command::Send(send_args) => {
            let config = cli.global.init()?;
            send_report(host, send_args, &config).await
        }
        Command::Parse(parse_args) => {
            let config = cli.global.init()?;
            parse_report(host, parse_args, &config)
        }
        Command::Init(init_args) => init_config(host, init_args),
        Command::Validate => {
            cli.global.init_logging()?;
            validate_config(host, cli.global.config.as_ref())
        }
    }
}
