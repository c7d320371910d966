use anyhow::Result;
use colored::Colorize;
use std::env;
use std::path::PathBuf;

use crate::application::use_cases::clone_repositories::{
    CloneRepositoriesConfig, CloneRepositoriesUseCase, CloneSummary, PlanOnlyCloner,
};

/// Handler for the clone command
pub struct CloneCommand {
    pub manifest: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub verbose: bool,
}

impl CloneCommand {
    pub fn new(manifest: Option<PathBuf>, verbose: bool) -> Self {
        Self {
            manifest,
            root: None,
            verbose,
        }
    }

    /// Use `root` as the workspace instead of the current directory
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub async fn execute(&self) -> Result<CloneSummary> {
        println!("Starting to clone repositories.");

        let root = match &self.root {
            Some(root) => root.clone(),
            None => env::current_dir()?,
        };
        let mut config = CloneRepositoriesConfig::new(root);
        if let Some(manifest) = &self.manifest {
            config = config.with_manifest_file(manifest);
        }

        let use_case = CloneRepositoriesUseCase::new(config, PlanOnlyCloner);
        let summary = use_case.execute().await.into_std()?;

        if self.verbose {
            println!("  Manifest: {}", summary.manifest_path.display());
        }
        for repo in &summary.repositories {
            let marker = if repo.already_present {
                "=".yellow().bold()
            } else {
                "✓".green().bold()
            };
            println!("{} {} -> {}", marker, repo.git, repo.destination.display());
        }
        println!(
            "{} {} repositories planned",
            "::".blue().bold(),
            summary.repositories.len()
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::Error;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_clone_command_with_explicit_manifest() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("custom.yml"),
            "repos:\n  - git: https://github.com/example/a.git\n",
        )
        .unwrap();

        let command =
            CloneCommand::new(Some(PathBuf::from("custom.yml")), true).with_root(dir.path());
        let summary = command.execute().await.unwrap();
        assert_eq!(summary.repositories.len(), 1);
        assert_eq!(summary.repositories[0].destination, dir.path().join("a"));
    }

    #[tokio::test]
    async fn test_clone_command_reports_missing_manifest() {
        let dir = TempDir::new().unwrap();
        let command = CloneCommand::new(None, false).with_root(dir.path());

        let error = command.execute().await.unwrap_err();
        assert!(error.to_string().starts_with("No manifest file in"));
        assert!(matches!(
            error.downcast_ref::<Error>(),
            Some(Error::FileSystem { .. })
        ));
    }
}
