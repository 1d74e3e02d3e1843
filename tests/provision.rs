use assert_cmd::Command;
use mockito::Matcher;
use predicates::prelude::*;

fn provision(srv: &mockito::ServerGuard) -> Command {
    let mut cmd = Command::cargo_bin("provision").unwrap();
    cmd.env("SLACK_BOT_TOKEN", "xoxb-test")
        .env("SLACK_API_BASE", srv.url())
        .env_remove("SLACK_CHANNEL_PREFIX");
    cmd
}

#[test]
fn help() {
    Command::cargo_bin("provision")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));
}

#[test]
fn invalid_name_never_calls_slack() {
    let mut srv = mockito::Server::new();
    let any = srv.mock("GET", Matcher::Any).expect(0).create();

    provision(&srv)
        .arg("Bad_Name")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid project name format"));

    any.assert();
}

#[test]
fn missing_token() {
    Command::cargo_bin("provision")
        .unwrap()
        .env_remove("SLACK_BOT_TOKEN")
        .arg("my-project")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("SLACK_BOT_TOKEN"));
}

#[test]
fn existing_channel_is_a_no_op() {
    let mut srv = mockito::Server::new();
    let _list = srv
        .mock("GET", "/conversations.list")
        .match_query(Matcher::Any)
        .with_body(
            r#"{
                "ok": true,
                "channels": [{"id": "C1", "name": "ora-foo-agents"}],
                "response_metadata": {"next_cursor": ""}
            }"#,
        )
        .create();
    let create = srv.mock("POST", "/conversations.create").expect(0).create();

    provision(&srv)
        .arg("foo")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    create.assert();
}

#[test]
fn creates_and_describes() {
    let mut srv = mockito::Server::new();
    let _list = srv
        .mock("GET", "/conversations.list")
        .match_query(Matcher::Any)
        .with_body(r#"{"ok": true, "channels": [], "response_metadata": {"next_cursor": ""}}"#)
        .create();
    let create = srv
        .mock("POST", "/conversations.create")
        .with_body(r#"{"ok": true, "channel": {"id": "C0NEW", "name": "ora-foo-agents"}}"#)
        .create();
    let topic = srv
        .mock("POST", "/conversations.setTopic")
        .with_body(r#"{"ok": true}"#)
        .create();
    let purpose = srv
        .mock("POST", "/conversations.setPurpose")
        .with_body(r#"{"ok": true}"#)
        .create();

    provision(&srv)
        .arg("foo")
        .assert()
        .success()
        .stdout(predicate::str::contains("#ora-foo-agents"))
        .stdout(predicate::str::contains(
            "https://slack.com/app_redirect?channel=C0NEW",
        ));

    create.assert();
    topic.assert();
    purpose.assert();
}

#[test]
fn name_taken_fails() {
    let mut srv = mockito::Server::new();
    let _list = srv
        .mock("GET", "/conversations.list")
        .match_query(Matcher::Any)
        .with_body(r#"{"ok": true, "channels": [], "response_metadata": {"next_cursor": ""}}"#)
        .create();
    let _create = srv
        .mock("POST", "/conversations.create")
        .with_body(r#"{"ok": false, "error": "name_taken"}"#)
        .create();
    let topic = srv
        .mock("POST", "/conversations.setTopic")
        .expect(0)
        .create();

    provision(&srv)
        .arg("foo")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("name_taken"));

    topic.assert();
}
