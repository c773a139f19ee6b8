use anyhow::{anyhow, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::database::{Repository, UpsertOutcome};
use crate::errors::ExtractError;
use crate::export::{self, ExportFormat};
use crate::extraction::{collect_segments, DocumentSegments};
use crate::file_utils::FileManager;

// @module: Application controller for segment extraction

/// A markdown file found under the input, with its document path
#[derive(Debug, Clone)]
struct SourceFile {
    path: PathBuf,
    relative: String,
}

/// Outcome of scanning every discovered document
#[derive(Debug, Default)]
struct Extraction {
    documents: Vec<DocumentSegments>,
    discovered: Vec<String>,
    skipped: usize,
}

/// Counters reported at the end of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub documents: usize,
    pub segments: usize,
    pub skipped: usize,
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub removed: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    fn record(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Inserted => self.inserted += 1,
            UpsertOutcome::Updated => self.updated += 1,
            UpsertOutcome::Unchanged => self.unchanged += 1,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} documents, {} segments, {} skipped in {}",
            self.documents,
            self.segments,
            self.skipped,
            Controller::format_duration(self.elapsed)
        )
    }
}

/// Main application controller for segment extraction
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| ExtractError::Config(e.to_string()))?;

        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scan a single file or every markdown file under a directory
    ///
    /// Documents come back in discovery order. Unreadable files are logged
    /// and left out.
    pub async fn extract_path(&self, input: &Path) -> Result<Vec<DocumentSegments>> {
        let files = self.discover(input)?;
        let extraction = self.scan_files(files, None).await;
        Ok(extraction.documents)
    }

    /// Run the whole workflow: discover, scan, export and store
    ///
    /// An existing `output` is only replaced when `force_overwrite` is set.
    /// A document the store rejects is logged and counted as skipped. Pruning
    /// of vanished documents happens in directory mode only, and not at all
    /// once a store write has failed.
    pub async fn run(
        &self,
        input: &Path,
        output: Option<&Path>,
        format: ExportFormat,
        store: Option<&Repository>,
        force_overwrite: bool,
    ) -> Result<RunSummary> {
        let start_time = Instant::now();

        if let Some(output_path) = output {
            if output_path.exists() && !force_overwrite {
                return Err(ExtractError::Export(format!(
                    "Output file already exists: {} (use --force to overwrite)",
                    output_path.display()
                ))
                .into());
            }
        }

        let files = self.discover(input)?;
        if files.is_empty() {
            warn!("No markdown files found in {:?}", input);
        }

        let progress_bar = ProgressBar::new(files.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar.set_message("Scanning");

        let extraction = self.scan_files(files, Some(&progress_bar)).await;
        progress_bar.finish_with_message("Scan complete");

        let mut summary = RunSummary {
            documents: extraction.documents.len(),
            segments: extraction.documents.iter().map(|doc| doc.segments.len()).sum(),
            skipped: extraction.skipped,
            ..RunSummary::default()
        };

        if let Some(output_path) = output {
            let rendered = export::render(format, &extraction.documents, &self.config.target_language)
                .map_err(|e| ExtractError::Export(e.to_string()))?;
            FileManager::write_to_file(output_path, &rendered)?;
            info!("Wrote {} catalog: {}", format, output_path.display());
        }

        if let Some(repository) = store {
            let mut store_failed = false;
            for document in &extraction.documents {
                match repository.upsert_document(document).await {
                    Ok(outcome) => {
                        debug!("{}: {}", document.file_path, outcome);
                        summary.record(outcome);
                    }
                    Err(e) => {
                        error!("Failed to store {}: {:#}", document.file_path, e);
                        summary.skipped += 1;
                        store_failed = true;
                    }
                }
            }

            // A failed write leaves stale rows that pruning must not judge
            if input.is_dir() && !store_failed {
                match repository.remove_missing_documents(&extraction.discovered).await {
                    Ok(removed) => summary.removed = removed,
                    Err(e) => error!("Failed to prune store: {:#}", e),
                }
            } else if store_failed {
                warn!("Store pruning skipped after write failures");
            }

            info!(
                "Store: {} inserted, {} updated, {} unchanged, {} removed",
                summary.inserted, summary.updated, summary.unchanged, summary.removed
            );
        }

        summary.elapsed = start_time.elapsed();
        info!("Extraction completed: {}", summary);

        Ok(summary)
    }

    /// Resolve the input into markdown files with their document paths
    fn discover(&self, input: &Path) -> Result<Vec<SourceFile>> {
        if FileManager::file_exists(input) {
            return Ok(vec![SourceFile {
                path: input.to_path_buf(),
                relative: FileManager::relative_posix_path(input, input),
            }]);
        }

        if !FileManager::dir_exists(input) {
            return Err(anyhow!("Input path does not exist: {:?}", input));
        }

        let files = FileManager::find_markdown_files(input, &self.config.extraction.extensions)
            .map_err(|e| ExtractError::Discovery(format!("{:#}", e)))?;

        debug!("Discovered {} markdown files under {:?}", files.len(), input);

        Ok(files
            .into_iter()
            .map(|path| SourceFile {
                relative: FileManager::relative_posix_path(input, &path),
                path,
            })
            .collect())
    }

    /// Scan documents on the blocking pool, keeping discovery order
    async fn scan_files(&self, files: Vec<SourceFile>, progress_bar: Option<&ProgressBar>) -> Extraction {
        let mut extraction = Extraction {
            discovered: files.iter().map(|file| file.relative.clone()).collect(),
            ..Extraction::default()
        };

        let mut results = stream::iter(files)
            .map(|file| async move {
                let relative = file.relative.clone();
                let scanned = tokio::task::spawn_blocking(move || Self::scan_file(&file)).await;
                (relative, scanned)
            })
            .buffered(self.config.extraction.concurrency);

        while let Some((relative, scanned)) = results.next().await {
            match scanned {
                Ok(Ok(document)) => extraction.documents.push(document),
                Ok(Err(e)) => {
                    error!("Skipping {}: {:#}", relative, e);
                    extraction.skipped += 1;
                }
                Err(e) => {
                    error!("Scan task for {} failed: {}", relative, e);
                    extraction.skipped += 1;
                }
            }

            if let Some(pb) = progress_bar {
                pb.set_message(relative);
                pb.inc(1);
            }
        }

        extraction
    }

    fn scan_file(file: &SourceFile) -> Result<DocumentSegments> {
        let text = FileManager::read_to_string(&file.path)?;
        let segments = collect_segments(&text, &file.relative);
        Ok(DocumentSegments::new(&file.relative, &text, segments))
    }

    // @formats: Elapsed time for the summary line
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
