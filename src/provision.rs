//! Create the dedicated Slack channel for a project.
//!
//! The workflow runs once per invocation, strictly in order:
//!
//! 1. Validate the project name. Nothing remote is touched if it's invalid.
//! 2. Require a bot token.
//! 3. Look for an existing channel of the derived name. This is best effort:
//!    if listing fails we carry on as though it doesn't exist.
//! 4. Stop here, successfully, if it exists, unless forced.
//! 5. Create the channel.
//! 6. Set its topic and purpose.
//! 7. Report.
//!
//! `--force` doesn't delete or archive anything. It only skips the early exit
//! in step 4, so an existing channel surfaces as Slack's `name_taken`.
//!
//! A failure in step 6 leaves the channel in place with Slack's default
//! metadata; the report says so and includes its ID.

use crate::{
    cli::ProvisionArgs,
    config::ProvisionerConfig,
    console::Console,
    error::{Exit, Failure},
    project::ProjectName,
    slack::{
        api::SlackClient,
        auth::SlackAccessToken,
        channel::{deep_link, ChannelName, ChannelRecord, Visibility},
        SlackError,
    },
};
use std::io::Write;
use tracing::{debug, info};

/// What we learnt from looking for the channel.
#[derive(Debug)]
pub enum Existence {
    Exists(ChannelRecord),
    /// We listed every channel and it isn't there.
    Absent,
    /// We couldn't tell; the listing itself failed.
    Unknown(SlackError),
}

/// Whether the channel was made. A failure is either Slack's rejection, such
/// as `name_taken`, or a transport error.
#[derive(Debug)]
pub enum CreationResult {
    Created(ChannelRecord),
    Failed(Failure),
}

/// How a provisioning run that got as far as Slack ended.
#[derive(Debug)]
pub enum Outcome {
    Created(ChannelRecord),
    /// The channel already exists and we weren't forced.
    Conflict(ChannelName),
    CreationFailed(Failure),
    /// The channel exists now, but describing it failed.
    MetadataFailed {
        channel: ChannelRecord,
        error: Failure,
    },
}

impl Outcome {
    pub fn exit(&self) -> Exit {
        match self {
            Outcome::Created(_) | Outcome::Conflict(_) => Exit::Success,
            Outcome::CreationFailed(_) | Outcome::MetadataFailed { .. } => Exit::Failed,
        }
    }
}

pub fn topic(project: &ProjectName) -> String {
    format!("Ora Framework - {} project agents and notifications", project)
}

pub fn purpose(project: &ProjectName) -> String {
    format!(
        "Autonomous agent coordination and notifications for {} project. Managed by Ora Framework.",
        project
    )
}

/// Look for a non-archived channel called `name`.
pub async fn check_exists(
    client: &SlackClient,
    name: &ChannelName,
    token: &SlackAccessToken,
) -> Existence {
    match client.find_channel(name, token).await {
        Ok(Some(channel)) => Existence::Exists(channel),
        Ok(None) => Existence::Absent,
        Err(e) => {
            // The operator sees this on the console; see [provision].
            debug!(channel = %name, error = %e, "Could not check channel existence");
            Existence::Unknown(e)
        }
    }
}

/// Create a public channel.
pub async fn create(
    client: &SlackClient,
    name: &ChannelName,
    token: &SlackAccessToken,
) -> CreationResult {
    match client.create_channel(name, Visibility::Public, token).await {
        Ok(channel) => {
            info!(channel = %channel.name, id = %channel.id, "Channel created");
            CreationResult::Created(channel)
        }
        Err(e) => CreationResult::Failed(Failure::from(e)),
    }
}

/// Set the topic, then the purpose. The first failure stops the pair.
pub async fn describe(
    client: &SlackClient,
    channel: &ChannelRecord,
    project: &ProjectName,
    token: &SlackAccessToken,
) -> Result<(), SlackError> {
    client.set_topic(&channel.id, &topic(project), token).await?;
    client.set_purpose(&channel.id, &purpose(project), token).await?;

    Ok(())
}

/// Steps 3 to 6 for the channel `name`, narrating progress as it goes.
pub async fn provision<O: Write, E: Write>(
    client: &SlackClient,
    config: &ProvisionerConfig,
    project: &ProjectName,
    name: ChannelName,
    force: bool,
    console: &mut Console<O, E>,
) -> Outcome {
    console.info("Checking if channel exists...");
    match check_exists(client, &name, &config.token).await {
        Existence::Exists(_) => {
            console.warning(format!("Channel #{} already exists", name));

            if !force {
                return Outcome::Conflict(name);
            }
        }
        Existence::Unknown(e) => {
            console.warning(format!("Could not check channel existence: {}", e));
        }
        Existence::Absent => {}
    }

    console.info(format!("Creating channel #{}...", name));
    let channel = match create(client, &name, &config.token).await {
        CreationResult::Created(x) => x,
        CreationResult::Failed(e) => return Outcome::CreationFailed(e),
    };

    match describe(client, &channel, project, &config.token).await {
        Ok(()) => Outcome::Created(channel),
        Err(e) => Outcome::MetadataFailed {
            channel,
            error: Failure::from(e),
        },
    }
}

/// Step 7.
pub fn report<O: Write, E: Write>(outcome: &Outcome, console: &mut Console<O, E>) -> Exit {
    match outcome {
        Outcome::Created(channel) => {
            console.success("Channel created successfully!");
            console.blank();
            console.line("Channel Details:");
            console.line(format!("  Name: #{}", channel.name));
            console.line(format!("  ID:   {}", channel.id));
            console.line(format!("  URL:  {}", deep_link(&channel.id)));
            console.blank();
            console.line("Next Steps:");
            console.line(format!("  1. Invite team members to #{}", channel.name));
            console.line(format!(
                "  2. Configure agent notifications to post to #{}",
                channel.name
            ));
            console.line("  3. Set up channel integrations (GitHub, LangSmith, etc.)");
            console.blank();
        }
        Outcome::Conflict(_) => {
            console.blank();
            console.line(
                "Channel already exists. Use --force to attempt creation anyway, or choose a different project name.",
            );
        }
        Outcome::CreationFailed(e) => {
            console.failure_in("Failed to create channel", e);
        }
        Outcome::MetadataFailed { channel, error } => {
            console.failure_in("Unexpected error", error);
            console.error_line(format!(
                "Channel #{} was created (ID: {}) but its topic and purpose may not be set.",
                channel.name, channel.id
            ));
            console.error_line(format!("Finish setup at: {}", deep_link(&channel.id)));
        }
    }

    outcome.exit()
}

fn print_usage<O: Write, E: Write>(console: &mut Console<O, E>) {
    console.blank();
    console.line("Usage: provision <project-name> [--force]");
    console.blank();
    console.line("Example:");
    console.line("  provision my-awesome-project");
    console.blank();
    console.line("Environment Variables:");
    console.line("  SLACK_BOT_TOKEN       - Slack bot token (required)");
    console.line("  SLACK_CHANNEL_PREFIX  - Channel prefix (default: ora)");
}

fn print_rules<O: Write, E: Write>(console: &mut Console<O, E>) {
    console.blank();
    console.line("Project name must be:");
    console.line("  - Lowercase only");
    console.line("  - Alphanumeric and hyphens only");
    console.line("  - At least 2 characters long");
    console.line("  - Cannot start/end with hyphen");
    console.line("  - Example: \"my-project\" or \"awesome-app\"");
}

/// The whole invocation.
///
/// Configuration is resolved through `load_config` only once the project
/// name is known to be valid, and nothing remote happens before both.
pub async fn run<O, E, F>(args: &ProvisionArgs, load_config: F, console: &mut Console<O, E>) -> Exit
where
    O: Write,
    E: Write,
    F: FnOnce() -> Result<ProvisionerConfig, Failure>,
{
    let raw = match args.project_name.as_deref() {
        Some(x) => x,
        None => {
            console.failure(&Failure::Usage("Project name is required".into()));
            print_usage(console);
            return Exit::Failed;
        }
    };

    let project = match ProjectName::parse(raw) {
        Ok(x) => x,
        Err(e) => {
            console.failure(&Failure::from(e));
            print_rules(console);
            return Exit::Failed;
        }
    };

    let config = match load_config() {
        Ok(x) => x,
        Err(e) => {
            console.failure(&e);
            return Exit::Failed;
        }
    };

    let name = project.channel_name(&config.channel_prefix);
    let project_line = format!("Project Name: {}", console.highlight(project.as_str()));
    let channel_line = format!("Channel Name: {}", console.highlight(format!("#{}", name)));

    console.banner("SLACK CHANNEL CREATION");
    console.line(project_line);
    console.line(channel_line);
    console.blank();

    let client = SlackClient::new(config.api_base.clone());
    let outcome = provision(&client, &config, &project, name, args.force, console).await;

    report(&outcome, console)
}
