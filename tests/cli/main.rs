use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod graph;
mod init;

const BIN_NAME: &str = "modgraph";

/// A throwaway project directory the binary runs inside.
///
/// The directory carries an empty `.git` marker so config discovery stops
/// at the project boundary instead of walking into the host filesystem.
pub struct CliTest {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().canonicalize()?;
        fs::create_dir(root.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            root,
        })
    }

    pub fn with_unit(unit: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_unit(unit, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.root.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))
    }

    /// Write a unit definitions file under the default definitions root.
    pub fn write_unit(&self, unit: &str, content: &str) -> Result<()> {
        self.write_file(&format!("modules/{unit}.modules.json"), content)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.root);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // keep assertions free of escape sequences
        cmd
    }

    pub fn graph_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("graph");
        cmd
    }

    pub fn list_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("list");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.root.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}
