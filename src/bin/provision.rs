//! Create the dedicated Slack channel for a project.
//!
//! ```sh
//! SLACK_BOT_TOKEN=xoxb-... provision my-awesome-project [--force]
//! ```

use iris::{cli, config, console::Console, provision};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args: cli::ProvisionArgs = match cli::parse(std::env::args_os()) {
        Ok(x) => x,
        Err(exit) => return exit.into(),
    };

    cli::init_tracing(args.verbose);
    config::load_dotenv();

    let mut console = Console::stdio();
    provision::run(&args, config::ProvisionerConfig::from_env, &mut console)
        .await
        .into()
}
