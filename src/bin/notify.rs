//! Post a message to Slack via an incoming webhook.
//!
//! ```sh
//! SLACK_WEBHOOK_URL=https://hooks.slack.com/services/... notify "#channel-name" "Message content"
//! ```

use iris::{cli, config, console::Console, notify};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args: cli::NotifyArgs = match cli::parse(std::env::args_os()) {
        Ok(x) => x,
        Err(exit) => return exit.into(),
    };

    cli::init_tracing(args.verbose);
    config::load_dotenv();

    let mut console = Console::stdio();
    notify::run(&args, config::NotifierConfig::from_env, &mut console)
        .await
        .into()
}
