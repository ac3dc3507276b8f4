//! Output delivery: persisted category files, stdout, and the GUI viewer.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Error types for output delivery.
#[derive(Debug)]
pub enum OutputError {
    NoHome,
    Write(PathBuf, std::io::Error),
    Viewer(std::io::Error),
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputError::NoHome => write!(f, "Could not determine home directory"),
            OutputError::Write(path, e) => {
                write!(f, "Cannot write output file {}: {}", path.display(), e)
            }
            OutputError::Viewer(e) => write!(f, "Viewer failed: {}", e),
        }
    }
}

impl std::error::Error for OutputError {}

/// Persisted file for one keybinding category. `begin` truncates the
/// previous run and writes the header; each row is a separate append.
pub struct CategoryFile {
    path: PathBuf,
    header: &'static str,
}

impl CategoryFile {
    pub fn new(path: PathBuf, header: &'static str) -> Self {
        Self { path, header }
    }

    /// Start a run: overwrite the file with its header line.
    pub fn begin(&self) -> Result<(), OutputError> {
        fs::write(&self.path, format!("{}\n", self.header))
            .map_err(|e| OutputError::Write(self.path.clone(), e))
    }

    /// Append one rendered row.
    pub fn append_row(&self, row: &str) -> Result<(), OutputError> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| OutputError::Write(self.path.clone(), e))?;
        writeln!(file, "{}", row).map_err(|e| OutputError::Write(self.path.clone(), e))
    }
}

/// Hand the rendered text to a graphical viewer over its stdin and block
/// until the dialog is closed. The viewer's own exit status is not
/// inspected; dismissing the dialog is not a failure.
pub fn show_in_viewer(text: &str) -> Result<(), OutputError> {
    let mut child = Command::new("zenity")
        .args([
            "--text-info",
            "--title",
            "Openbox Keybindings",
            "--width",
            "500",
            "--height",
            "600",
        ])
        .stdin(Stdio::piped())
        .spawn()
        .map_err(OutputError::Viewer)?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(OutputError::Viewer)?;
    }

    child.wait().map_err(OutputError::Viewer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("obkeys-test-{}-{}", std::process::id(), name))
    }

    #[test]
    fn begin_truncates_and_writes_header() {
        let path = temp_path("begin");
        fs::write(&path, "stale content\nfrom a previous run\n").unwrap();

        let file = CategoryFile::new(path.clone(), "Openbox Actions");
        file.begin().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Openbox Actions\n");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn rows_append_after_header() {
        let path = temp_path("rows");
        let file = CategoryFile::new(path.clone(), "User Commands");
        file.begin().unwrap();
        file.append_row("\u{2022} W-Return  xterm").unwrap();
        file.append_row("\u{2022} W-e       thunar").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "User Commands\n\u{2022} W-Return  xterm\n\u{2022} W-e       thunar\n"
        );
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn write_error_names_the_path() {
        let path = PathBuf::from("/nonexistent-dir/obkeys-out.txt");
        let file = CategoryFile::new(path.clone(), "All Keybindings");
        match file.begin() {
            Err(OutputError::Write(p, _)) => assert_eq!(p, path),
            other => panic!("expected Write error, got {:?}", other.err().map(|e| e.to_string())),
        }
    }
}
