//! Command-line arguments for both binaries, and the process plumbing they
//! share.

use crate::error::Exit;
use clap::{error::ErrorKind, Parser};
use tracing::Level;

/// Post a message to a Slack channel via an incoming webhook
#[derive(Parser, Debug)]
#[command(name = "notify", version)]
pub struct NotifyArgs {
    /// Channel to post to [default: #ora-agents]
    pub channel: Option<String>,

    /// Message text
    pub message: Option<String>,

    /// Activate verbose logging (-v, -vv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Create the dedicated Slack channel for a project
#[derive(Parser, Debug)]
#[command(name = "provision", version)]
pub struct ProvisionArgs {
    /// Lowercase letters, digits, and hyphens, e.g. `my-awesome-project`
    pub project_name: Option<String>,

    /// Attempt creation even if the channel already exists
    #[arg(long)]
    pub force: bool,

    /// Activate verbose logging (-v, -vv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse arguments, printing help, version, or errors as clap would.
///
/// Argument errors exit with 1 rather than clap's usual 2, as every other
/// failure does.
pub fn parse<P, I, T>(args: I) -> Result<P, Exit>
where
    P: Parser,
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    P::try_parse_from(args).map_err(|e| {
        let _ = e.print();

        match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Exit::Success,
            _ => Exit::Failed,
        }
    })
}

/// Map `-v` occurrences to the most verbose level logged.
pub fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialise tracing to stderr, leaving stdout to the report.
pub fn init_tracing(verbose: u8) {
    tracing_subscriber::fmt()
        .with_max_level(log_level(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_args() {
        let args: NotifyArgs = parse(["notify", "#ops", "hello world"]).unwrap();
        assert_eq!(args.channel.as_deref(), Some("#ops"));
        assert_eq!(args.message.as_deref(), Some("hello world"));

        let args: NotifyArgs = parse(["notify"]).unwrap();
        assert_eq!(args.channel, None);
        assert_eq!(args.message, None);
    }

    #[test]
    fn test_provision_args() {
        let args: ProvisionArgs = parse(["provision", "my-project", "--force"]).unwrap();
        assert_eq!(args.project_name.as_deref(), Some("my-project"));
        assert!(args.force);

        let args: ProvisionArgs = parse(["provision", "--force", "my-project", "-vv"]).unwrap();
        assert!(args.force);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_unknown_flag_fails_with_one() {
        let res = parse::<ProvisionArgs, _, _>(["provision", "x", "--recreate"]);
        assert_eq!(res.unwrap_err(), Exit::Failed);
    }

    #[test]
    fn test_help_succeeds() {
        let res = parse::<NotifyArgs, _, _>(["notify", "--help"]);
        assert_eq!(res.unwrap_err(), Exit::Success);
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0), Level::WARN);
        assert_eq!(log_level(1), Level::INFO);
        assert_eq!(log_level(9), Level::TRACE);
    }
}
