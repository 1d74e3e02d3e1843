//! Project names, and the channel names derived from them.

use crate::slack::channel::ChannelName;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// The channel prefix when `$SLACK_CHANNEL_PREFIX` isn't set.
pub const DEFAULT_CHANNEL_PREFIX: &str = "ora";

// This unwrap is covered by every test in this module.
static ALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9-]+$").unwrap());

/// A validated project name: lowercase ASCII letters, digits, and hyphens, at
/// least two characters long, neither starting nor ending with a hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

/// The first rule a candidate project name broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectNameError {
    Empty,
    InvalidCharacters,
    LeadingHyphen,
    TrailingHyphen,
    TooShort,
}

impl fmt::Display for ProjectNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            ProjectNameError::Empty => "Project name is empty",
            ProjectNameError::InvalidCharacters => {
                "Project name may only contain lowercase letters, digits, and hyphens"
            }
            ProjectNameError::LeadingHyphen => "Project name cannot start with a hyphen",
            ProjectNameError::TrailingHyphen => "Project name cannot end with a hyphen",
            ProjectNameError::TooShort => "Project name must be at least 2 characters long",
        };

        write!(f, "{}", x)
    }
}

impl ProjectName {
    pub fn parse(raw: &str) -> Result<Self, ProjectNameError> {
        if raw.is_empty() {
            return Err(ProjectNameError::Empty);
        }

        if !ALLOWED.is_match(raw) {
            return Err(ProjectNameError::InvalidCharacters);
        }

        if raw.starts_with('-') {
            return Err(ProjectNameError::LeadingHyphen);
        }

        if raw.ends_with('-') {
            return Err(ProjectNameError::TrailingHyphen);
        }

        // The pattern above guarantees ASCII, so bytes are characters.
        if raw.len() < 2 {
            return Err(ProjectNameError::TooShort);
        }

        Ok(ProjectName(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The channel dedicated to this project's agents.
    pub fn channel_name(&self, prefix: &str) -> ChannelName {
        channel_name(&self.0, prefix)
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Derive a project's channel name. This doesn't validate; see [ProjectName].
///
/// ```
/// use iris::project::channel_name;
///
/// assert_eq!(channel_name("my-project", "ora").0, "ora-my-project-agents");
/// ```
pub fn channel_name(project: &str, prefix: &str) -> ChannelName {
    ChannelName(format!("{}-{}-agents", prefix, project))
}
