use anyhow::{Result, Context};
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Find markdown files under a directory, sorted by path
    ///
    /// Extensions are compared case-insensitively and may be given with or
    /// without the leading dot.
    pub fn find_markdown_files<P: AsRef<Path>>(dir: P, extensions: &[String]) -> Result<Vec<PathBuf>> {
        let normalized: Vec<String> = extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_lowercase())
            .collect();

        let mut result = Vec::new();
        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && Self::has_extension(path, &normalized) {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    // @checks: Extension membership, case-insensitive
    fn has_extension(path: &Path, extensions: &[String]) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| extensions.iter().any(|wanted| *wanted == ext))
    }

    /// Forward-slash path of `path` relative to `root`
    ///
    /// When `root` is the file itself, its file name is used.
    pub fn relative_posix_path<P1: AsRef<Path>, P2: AsRef<Path>>(root: P1, path: P2) -> String {
        let root = root.as_ref();
        let path = path.as_ref();

        let relative = match path.strip_prefix(root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel,
            _ => path.file_name().map(Path::new).unwrap_or(path),
        };

        relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir(parent)?;
            }
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}
