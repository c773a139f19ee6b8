/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::path::Path;
use mdsegment::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_with_existing_file_should_return_true() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "exists.md", "# Hi\n")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::dir_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_with_missing_file_should_return_false() {
    assert!(!FileManager::file_exists("non_existent_file_12345.md"));
}

/// Test that discovery keeps only markdown files, sorted, nested ones included
#[test]
fn test_find_markdown_files_should_filter_and_sort() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "b.md", "B")?;
    common::create_test_file(temp_dir.path(), "a.md", "A")?;
    common::create_test_file(temp_dir.path(), "sub/c.MD", "C")?;
    common::create_test_file(temp_dir.path(), "sub/d.txt", "D")?;

    let files = FileManager::find_markdown_files(temp_dir.path(), &["md".to_string()])?;
    let relative: Vec<String> = files
        .iter()
        .map(|path| FileManager::relative_posix_path(temp_dir.path(), path))
        .collect();

    assert_eq!(relative, vec!["a.md", "b.md", "sub/c.MD"]);

    Ok(())
}

/// Test that extensions may be configured with a leading dot
#[test]
fn test_find_markdown_files_with_dotted_extension_should_match() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "page.markdown", "Text")?;
    common::create_test_file(temp_dir.path(), "page.md", "Text")?;

    let files = FileManager::find_markdown_files(temp_dir.path(), &[".markdown".to_string()])?;

    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("page.markdown"));

    Ok(())
}

/// Test that a missing root is reported as an error
#[test]
fn test_find_markdown_files_with_missing_dir_should_fail() {
    let result = FileManager::find_markdown_files("./non_existent_directory_12345", &["md".to_string()]);
    assert!(result.is_err());
}

/// Test that write_to_file creates parent directories
#[test]
fn test_write_to_file_should_create_parents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("out/nested/catalog.po");

    FileManager::write_to_file(&target, "msgid \"\"\n")?;

    assert_eq!(FileManager::read_to_string(&target)?, "msgid \"\"\n");

    Ok(())
}

/// Test that read_to_string reports the path on failure
#[test]
fn test_read_to_string_with_missing_file_should_mention_path() {
    let error = FileManager::read_to_string(Path::new("missing_12345.md")).unwrap_err();
    assert!(error.to_string().contains("missing_12345.md"));
}
