/*!
 * Common test utilities for the mdsegment test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A small documentation page touching every block type
pub const SAMPLE_GUIDE: &str = r#"# Install Guide

Run `cargo install mdsegment` to get the [binary](https://example.com/dl "Download").

## Usage

- Scan a folder with {command}
- Check <b>every</b> result
  before committing

> Translations keep
> their placeholders.

```sh
mdsegment extract docs/
```

## Usage

Second usage section.
"#;

/// Initialize env_logger once for tests that want log output
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content, creating parent directories
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a small docs tree: two markdown files, one nested, plus a non-markdown file
pub fn create_docs_tree(dir: &Path) -> Result<()> {
    create_test_file(dir, "guide.md", SAMPLE_GUIDE)?;
    create_test_file(dir, "reference/api.md", "# API\n\nCall `init()` first.\n")?;
    create_test_file(dir, "notes.txt", "Not markdown.\n")?;
    Ok(())
}
