//! 命令行二进制测试
//!
//! 以子进程方式运行 howler，验证日志初始化、控制台输出和退出码

use mockito::{Matcher, Server};
use std::process::{Command, Output};

const SEND_PATH: &str = "/_matrix/client/r0/rooms/!room:example.org/send/m.room.message";
const SUCCESS_TEXT: &str = "Howler has successfully sent the message!";

/// 清空相关环境变量后的 howler 命令
fn howler() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_howler"));
    for var in [
        "MATRIX_BOT_ROOM_ID",
        "MATRIX_BOT_USER_ID",
        "MATRIX_BOT_ACCESS_TOKEN",
        "MATRIX_RECIPIENT_SHORT_USERNAME",
        "MATRIX_RECIPIENT_FULL_USERNAME",
        "HOWLER_HOMESERVER_URL",
        "HOWLER_REQUEST_TIMEOUT_SECONDS",
        "HOWLER_LOG_LEVEL",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// 指向模拟 homeserver 的完整配置
fn configured(server_url: &str) -> Command {
    let mut cmd = howler();
    cmd.env("MATRIX_BOT_ROOM_ID", "!room:example.org")
        .env("MATRIX_BOT_USER_ID", "@bot:example.org")
        .env("MATRIX_BOT_ACCESS_TOKEN", "secret-token")
        .env("MATRIX_RECIPIENT_SHORT_USERNAME", "ops")
        .env("MATRIX_RECIPIENT_FULL_USERNAME", "@ops:example.org")
        .env("HOWLER_HOMESERVER_URL", server_url)
        .env("HOWLER_REQUEST_TIMEOUT_SECONDS", "5");
    cmd
}

fn run(cmd: &mut Command) -> (i32, String, String) {
    let Output {
        status,
        stdout,
        stderr,
    } = cmd.output().unwrap();
    (
        status.code().unwrap(),
        String::from_utf8_lossy(&stdout).into_owned(),
        String::from_utf8_lossy(&stderr).into_owned(),
    )
}

#[test]
fn test_version_flag_needs_no_environment() {
    let (code, stdout, _) = run(howler().arg("-v"));

    assert_eq!(code, 0);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_env_var_exits_with_config_error() {
    let (code, stdout, stderr) = run(howler().args(["-m", "hello"]));

    assert_eq!(code, 1);
    assert!(stderr.contains("Error: could not obtain value for"));
    assert!(stderr.contains("MATRIX_BOT_ROOM_ID"));
    assert!(!stderr.contains("日志系统初始化失败"));
    assert!(!stdout.contains(SUCCESS_TEXT));
}

#[test]
fn test_successful_send_exits_zero() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", SEND_PATH)
        .match_header("authorization", "Bearer secret-token")
        .match_body(Matcher::PartialJsonString(
            r#"{"msgtype":"m.text","user_id":"@bot:example.org"}"#.to_string(),
        ))
        .with_status(200)
        .with_body(r#"{"event_id":"$abc"}"#)
        .create();

    let (code, stdout, stderr) = run(configured(&server.url()).args(["-m", "disk full"]));

    mock.assert();
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains(SUCCESS_TEXT));
}

#[test]
fn test_server_error_exits_with_network_code() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", SEND_PATH)
        .with_status(500)
        .with_body(r#"{"errcode":"M_UNKNOWN"}"#)
        .create();

    let (code, stdout, stderr) = run(&mut configured(&server.url()));

    mock.assert();
    assert_eq!(code, 3);
    assert!(stderr.contains("There was a problem posting the data to matrix"));
    // 默认 warn 级别下失败只报告一次
    assert_eq!(stderr.matches("M_UNKNOWN").count(), 1, "stderr: {}", stderr);
    assert!(!stdout.contains(SUCCESS_TEXT));
}

#[test]
fn test_server_error_exits_zero_in_best_effort_mode() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", SEND_PATH)
        .with_status(500)
        .with_body(r#"{"errcode":"M_UNKNOWN"}"#)
        .create();

    let (code, stdout, stderr) = run(configured(&server.url()).arg("--best-effort"));

    mock.assert();
    assert_eq!(code, 0);
    assert!(stderr.contains("There was a problem posting the data to matrix"));
    assert_eq!(stderr.matches("M_UNKNOWN").count(), 1, "stderr: {}", stderr);
    assert!(stdout.contains(SUCCESS_TEXT));
}
