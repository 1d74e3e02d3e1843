//! The messenger between Ora projects and Slack.
//!
//! Two small operational tools are built from this library:
//!
//! - `notify` posts a message to a channel via an incoming webhook. See
//!   [notify].
//! - `provision` creates a project-scoped channel via a bot token and sets its
//!   topic and purpose. See [provision].
//!
//! Both are single-shot: one invocation, one workflow, an exit code.

#[cfg(test)]
#[macro_use]
extern crate quickcheck;

pub mod cli;
pub mod config;
pub mod console;
mod de;
pub mod error;
pub mod notify;
pub mod project;
pub mod provision;
pub mod slack;
