//! Integration tests for gitdag
//!
//! The engine tests drive the layout with hand-built and generated
//! histories; the repository tests feed it topology read from real git
//! repositories built on the fly.

mod stream;

/// Test utilities shared across the integration modules
pub mod test_utils {
    use std::path::{Path, PathBuf};
    use std::process::Command;
    use tempfile::TempDir;

    /// Create a temporary Git repository for testing
    pub fn create_test_repo() -> anyhow::Result<(TempDir, PathBuf)> {
        let temp_dir = TempDir::new()?;
        let repo_path = temp_dir.path().to_path_buf();

        Command::new("git")
            .args(["init", "-b", "main"])
            .current_dir(&repo_path)
            .output()?;

        Command::new("git")
            .args(["config", "user.name", "Test User"])
            .current_dir(&repo_path)
            .output()?;

        Command::new("git")
            .args(["config", "user.email", "test@example.com"])
            .current_dir(&repo_path)
            .output()?;

        Ok((temp_dir, repo_path))
    }

    /// Create a test commit in the repository
    pub fn create_test_commit(repo_path: &Path, message: &str) -> anyhow::Result<()> {
        let test_file = repo_path.join("test.txt");
        std::fs::write(&test_file, format!("Test content for {}", message))?;

        Command::new("git")
            .args(["add", "test.txt"])
            .current_dir(repo_path)
            .output()?;

        Command::new("git")
            .args(["commit", "-m", message])
            .current_dir(repo_path)
            .output()?;

        Ok(())
    }

    /// Create a test repository with a feature branch merged back, so the
    /// graph has a genuine fork and merge
    pub fn create_branchy_test_repo() -> anyhow::Result<(TempDir, PathBuf)> {
        let (temp_dir, repo_path) = create_test_repo()?;

        create_test_commit(&repo_path, "Initial commit")?;

        Command::new("git")
            .args(["checkout", "-b", "feature/test"])
            .current_dir(&repo_path)
            .output()?;

        create_test_commit(&repo_path, "Add feature functionality")?;
        create_test_commit(&repo_path, "Fix feature bug")?;

        Command::new("git")
            .args(["checkout", "main"])
            .current_dir(&repo_path)
            .output()?;

        // touch a different file so the merge is not a fast-forward
        let main_file = repo_path.join("main.txt");
        std::fs::write(&main_file, "Main branch update")?;
        Command::new("git")
            .args(["add", "main.txt"])
            .current_dir(&repo_path)
            .output()?;
        Command::new("git")
            .args(["commit", "-m", "Main branch update"])
            .current_dir(&repo_path)
            .output()?;

        Command::new("git")
            .args(["merge", "feature/test", "--no-ff", "-m", "Merge feature branch"])
            .current_dir(&repo_path)
            .output()?;

        Ok((temp_dir, repo_path))
    }
}
