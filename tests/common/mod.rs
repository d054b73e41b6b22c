use assert_cmd::Command;
use regex::Regex;
use tempfile::TempDir;

/// A CLI invocation rooted in its own temporary data directory.
pub struct CliEnv {
    pub home: TempDir,
}

impl CliEnv {
    pub fn new() -> Self {
        Self {
            home: TempDir::new().expect("create temp home"),
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("docseq_cli").expect("binary built");
        cmd.env("DOCSEQ_HOME", self.home.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Runs `create` and returns the new document's id.
    pub fn create(&self, args: &[&str]) -> String {
        let output = self
            .cmd()
            .arg("create")
            .args(args)
            .output()
            .expect("run create");
        assert!(output.status.success(), "create failed: {output:?}");
        extract_id(&String::from_utf8_lossy(&output.stdout))
    }
}

pub fn extract_id(stdout: &str) -> String {
    let pattern = Regex::new(r"Id:\s+([0-9a-f-]{36})").expect("id regex");
    pattern
        .captures(stdout)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
        .expect("id in output")
}
