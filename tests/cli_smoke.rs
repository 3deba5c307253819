#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic command functionality.
//!
//! Every test points the data and config directories at a temporary
//! directory, so nothing touches the real settings. The only translation that
//! reaches a "vendor" talks to a local server.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    #[allow(deprecated)]
    fn aitr(&self) -> Command {
        let mut cmd = Command::cargo_bin("aitr").unwrap();
        cmd.env("XDG_DATA_HOME", self.dir.path().join("data"))
            .env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env("NO_COLOR", "1")
            .env_remove("AITR_LOG");
        cmd
    }

    fn write_config(&self, content: &str) {
        let dir = self.dir.path().join("config").join("aitr");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), content).unwrap();
    }
}

/// Serves one OpenAI-style streaming response and returns the base URL.
fn serve_openai_once(deltas: &'static [&'static str]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());

    thread::spawn(move || {
        let (mut socket, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
            if request_complete(&request) {
                break;
            }
        }

        let mut body = String::new();
        for delta in deltas {
            body.push_str(&format!(
                "data: {{\"choices\":[{{\"delta\":{{\"content\":\"{delta}\"}}}}]}}\n\n"
            ));
        }
        body.push_str("data: [DONE]\n\n");

        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/event-stream\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).unwrap();
    });

    endpoint
}

fn request_complete(request: &[u8]) -> bool {
    let text = String::from_utf8_lossy(request);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..header_end]
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    request.len() >= header_end + 4 + content_length
}

#[test]
fn test_help_displays_usage() {
    Sandbox::new()
        .aitr()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Streaming AI translation"))
        .stdout(predicate::str::contains("--text"))
        .stdout(predicate::str::contains("--provider"))
        .stdout(predicate::str::contains("--model"))
        .stdout(predicate::str::contains("settings"))
        .stdout(predicate::str::contains("history"));
}

#[test]
fn test_version_displays_version() {
    Sandbox::new()
        .aitr()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_chat_help() {
    Sandbox::new()
        .aitr()
        .args(["chat", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--provider"))
        .stdout(predicate::str::contains("--model"));
}

#[test]
fn test_history_empty() {
    Sandbox::new()
        .aitr()
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No history yet."));
}

#[test]
fn test_history_show_on_empty_history() {
    Sandbox::new()
        .aitr()
        .args(["history", "show", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("History is empty"));
}

#[test]
fn test_settings_show_defaults() {
    Sandbox::new()
        .aitr()
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gemini-2.5-flash"))
        .stdout(predicate::str::contains("(not set)"))
        .stdout(predicate::str::contains("generativelanguage.googleapis.com"));
}

#[test]
fn test_settings_set_then_show_masks_key() {
    let sandbox = Sandbox::new();

    sandbox
        .aitr()
        .args([
            "settings",
            "set",
            "--api-key",
            "AIzaSyExampleKey6789",
            "--model",
            "gemini-1.5-pro",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings saved"));

    sandbox
        .aitr()
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gemini-1.5-pro"))
        .stdout(predicate::str::contains("(set, ...6789)"))
        .stdout(predicate::str::contains("AIzaSyExampleKey").not());
}

#[test]
fn test_settings_set_endpoint_writes_config_file() {
    let sandbox = Sandbox::new();

    sandbox
        .aitr()
        .args([
            "settings",
            "set",
            "--provider",
            "openai",
            "--openai-endpoint",
            "http://localhost:8080",
        ])
        .assert()
        .success();

    let config =
        std::fs::read_to_string(sandbox.dir.path().join("config/aitr/config.toml")).unwrap();
    assert!(config.contains("http://localhost:8080"));

    sandbox
        .aitr()
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:8080"));
}

#[test]
fn test_settings_set_without_values() {
    Sandbox::new()
        .aitr()
        .args(["settings", "set"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to change"));
}

#[test]
fn test_invalid_provider_rejected() {
    Sandbox::new()
        .aitr()
        .args(["--provider", "claude", "--text", "Hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_translate_without_key() {
    Sandbox::new()
        .aitr()
        .args(["--text", "Hello"])
        .assert()
        .failure()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains(
            "Please enter your Gemini API Key in settings first.",
        ));
}

#[test]
fn test_translate_provider_override_needs_its_own_key() {
    let sandbox = Sandbox::new();
    sandbox
        .aitr()
        .args(["settings", "set", "--api-key", "gemini-only"])
        .assert()
        .success();

    sandbox
        .aitr()
        .args(["-p", "openai", "--text", "Hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please enter your OpenAI API Key in settings first.",
        ));
}

#[test]
fn test_translate_empty_input() {
    Sandbox::new()
        .aitr()
        .args(["--text", "   \n"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input is empty"));
}

#[test]
fn test_translate_missing_file() {
    Sandbox::new()
        .aitr()
        .arg("does-not-exist.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.txt"));
}

#[test]
fn test_translate_streams_and_records_history() {
    let sandbox = Sandbox::new();
    let endpoint = serve_openai_once(&["Bon", "jour"]);
    sandbox.write_config(&format!("[endpoints]\nopenai = \"{endpoint}\"\n"));

    sandbox
        .aitr()
        .args([
            "settings",
            "set",
            "--provider",
            "openai",
            "--openai-api-key",
            "sk-test",
            "--model",
            "gpt-4o-mini",
        ])
        .assert()
        .success();

    sandbox
        .aitr()
        .args(["--quiet", "--prompt", "Translate to French:"])
        .write_stdin("Hello")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bonjour"));

    sandbox
        .aitr()
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("[0]"))
        .stdout(predicate::str::contains("Hello"))
        .stdout(predicate::str::contains("Bonjour"));

    // --prompt applies to one run only.
    sandbox
        .aitr()
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Translate to French:").not());
}
