//! Deserialisation helpers for Slack's `ok` envelope flag.

use serde::de::{Deserialize, Deserializer, Error};

/// Accept the boolean only if it's `expected`.
fn expect_bool<'a, D>(deserializer: D, expected: bool) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    let b = bool::deserialize(deserializer)?;

    if b == expected {
        Ok(b)
    } else {
        Err(Error::custom(format!("invalid ok flag: {}", b)))
    }
}

/// For successful response bodies, so that an error body never satisfies them.
pub fn only_true<'a, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    expect_bool(deserializer, true)
}

/// For error response bodies.
pub fn only_false<'a, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    expect_bool(deserializer, false)
}
