/*!
 * Integration tests for extracting a docs tree through the controller
 */

use anyhow::Result;
use mdsegment::app_config::Config;
use mdsegment::app_controller::Controller;
use mdsegment::extraction::hash_source;
use crate::common;

/// Test that a directory yields one document per markdown file, in path order
#[tokio::test]
async fn test_extract_path_with_directory_should_scan_markdown_files() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_docs_tree(temp_dir.path())?;

    let controller = Controller::new_for_test()?;
    let documents = controller.extract_path(temp_dir.path()).await?;

    let paths: Vec<&str> = documents.iter().map(|d| d.file_path.as_str()).collect();
    assert_eq!(paths, vec!["guide.md", "reference/api.md"]);

    assert_eq!(documents[0].segments.len(), 8);
    assert_eq!(documents[0].source_hash, hash_source(common::SAMPLE_GUIDE));

    let api = &documents[1];
    assert_eq!(api.segments[0].identifier, "reference/api.md#h1-api#title");
    assert_eq!(api.segments[1].msgid, "Call [[CODE_1]] first.");

    Ok(())
}

/// Test that a single file uses its file name as document path
#[tokio::test]
async fn test_extract_path_with_single_file_should_use_file_name() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "deep/dir/README.md", "# Readme\n\nHello.\n")?;

    let controller = Controller::new_for_test()?;
    let documents = controller.extract_path(&file).await?;

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].file_path, "README.md");
    assert_eq!(documents[0].segments[1].identifier, "README.md#h1-readme#p-1");

    Ok(())
}

/// Test that concurrency does not change the result or its order
#[tokio::test]
async fn test_extract_path_with_any_concurrency_should_keep_order() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    for index in 0..12 {
        common::create_test_file(
            temp_dir.path(),
            &format!("page{:02}.md", index),
            &format!("# Page {}\n\nBody {}.\n", index, index),
        )?;
    }

    let mut serial = Config::default();
    serial.extraction.concurrency = 1;
    let mut parallel = Config::default();
    parallel.extraction.concurrency = 8;

    let first = Controller::with_config(serial)?.extract_path(temp_dir.path()).await?;
    let second = Controller::with_config(parallel)?.extract_path(temp_dir.path()).await?;

    let paths = |docs: &[mdsegment::DocumentSegments]| {
        docs.iter().map(|d| d.file_path.clone()).collect::<Vec<_>>()
    };
    assert_eq!(paths(&first), paths(&second));
    assert_eq!(first[11].file_path, "page11.md");
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.segments, b.segments);
    }

    Ok(())
}

/// Test that configured extensions drive discovery
#[tokio::test]
async fn test_extract_path_with_custom_extensions_should_include_them() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_docs_tree(temp_dir.path())?;
    common::create_test_file(temp_dir.path(), "extra.markdown", "Extra page.\n")?;

    let mut config = Config::default();
    config.extraction.extensions = vec!["md".to_string(), "markdown".to_string()];
    let documents = Controller::with_config(config)?.extract_path(temp_dir.path()).await?;

    assert_eq!(documents.len(), 3);
    assert_eq!(documents[0].file_path, "extra.markdown");

    Ok(())
}

/// Test that a file that is not valid UTF-8 is skipped, not fatal
#[tokio::test]
async fn test_extract_path_with_unreadable_file_should_skip_it() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "good.md", "Fine.\n")?;
    std::fs::write(temp_dir.path().join("bad.md"), [0xff, 0xfe, 0x00, 0x41])?;

    let controller = Controller::new_for_test()?;
    let documents = controller.extract_path(temp_dir.path()).await?;

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].file_path, "good.md");

    Ok(())
}

/// Test that extraction also runs from a synchronous test through a blocking runtime
#[test]
fn test_extract_path_from_sync_context_should_succeed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "sync.md", "# Sync\n")?;

    let controller = Controller::new_for_test()?;
    let documents = tokio_test::block_on(controller.extract_path(temp_dir.path()))?;

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].segments[0].identifier, "sync.md#h1-sync#title");

    Ok(())
}
