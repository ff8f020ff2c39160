use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod check;
mod get;

const BIN_NAME: &str = "locbake";

pub const EN_YAML: &str = r#"
en:
  Greeting:
    title: Hello
    farewell: Bye
  Menu:
    items: [One, Two, Three]
"#;

pub const DE_YAML: &str = r#"
de:
  Greeting:
    title: Hallo
"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// Project with `locales/en.yml` and `locales/de.yml`.
    pub fn with_locales() -> Result<Self> {
        let test = Self::new()?;
        test.write_file("locales/en.yml", EN_YAML)?;
        test.write_file("locales/de.yml", DE_YAML)?;
        Ok(test)
    }

    /// Write `.locbakerc.json` at the project root.
    pub fn write_config(&self, json: &str) -> Result<()> {
        self.write_file(".locbakerc.json", json)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn check_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("check");
        cmd
    }

    pub fn get_command(&self, key: &str) -> Command {
        let mut cmd = self.command();
        cmd.arg("get").arg(key);
        cmd
    }

    pub fn init_command(&self, args: &[&str]) -> Command {
        let mut cmd = self.command();
        cmd.arg("init").args(args);
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

/// Captured output of a finished command.
pub struct Run {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl Run {
    /// Panics with stderr attached when the exit code differs.
    #[track_caller]
    pub fn assert_code(&self, expected: i32) -> &Self {
        assert_eq!(
            self.code,
            Some(expected),
            "stdout: {}\nstderr: {}",
            self.stdout,
            self.stderr
        );
        self
    }
}

pub fn run(mut cmd: Command) -> Result<Run> {
    let Output {
        status,
        stdout,
        stderr,
    } = cmd.output()?;
    Ok(Run {
        code: status.code(),
        stdout: String::from_utf8(stdout)?,
        stderr: String::from_utf8(stderr)?,
    })
}
