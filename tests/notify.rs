use assert_cmd::Command;
use mockito::Matcher;
use predicates::prelude::*;

fn notify() -> Command {
    let mut cmd = Command::cargo_bin("notify").unwrap();
    cmd.env_remove("SLACK_WEBHOOK_URL");
    cmd
}

#[test]
fn missing_message_is_a_usage_error() {
    let mut srv = mockito::Server::new();
    let hook = srv.mock("POST", Matcher::Any).expect(0).create();

    notify()
        .arg("#ops")
        .env("SLACK_WEBHOOK_URL", format!("{}/hook", srv.url()))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage: notify"));

    hook.assert();
}

#[test]
fn missing_webhook_is_a_configuration_error() {
    notify()
        .args(["#ops", "hello"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("SLACK_WEBHOOK_URL environment variable not set"))
        .stderr(predicate::str::contains("export SLACK_WEBHOOK_URL="));
}

#[test]
fn delivered() {
    let mut srv = mockito::Server::new();
    let hook = srv
        .mock("POST", "/hook")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(serde_json::json!({
            "text": "deploy finished",
            "channel": "#ops",
            "username": "Ora Agent System",
            "icon_emoji": ":robot_face:",
        })))
        .with_body("ok")
        .create();

    notify()
        .args(["#ops", "deploy finished"])
        .env("SLACK_WEBHOOK_URL", format!("{}/hook", srv.url()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Message posted to Slack"));

    hook.assert();
}

#[test]
fn rejected() {
    let mut srv = mockito::Server::new();
    let _hook = srv
        .mock("POST", "/hook")
        .with_status(404)
        .with_body("channel_not_found")
        .create();

    notify()
        .args(["#missing", "hello"])
        .env("SLACK_WEBHOOK_URL", format!("{}/hook", srv.url()))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("404"))
        .stderr(predicate::str::contains("channel_not_found"));
}
