//! Prompt sync pipeline.
//!
//! Flow: load local dataset → list remote directory → for each prompt file:
//!       fetch → extract → pause → merge by title → write dataset.
//!
//! Strictly sequential: one request in flight, files processed in listing
//! order. Any error aborts the run before the output file is touched.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::errors::SyncError;
use crate::github::{ContentFetcher, RemoteLister};
use crate::models::{FileDescriptor, PromptRecord, PromptSource};
use crate::progress::ProgressObserver;
use crate::records::dedup::{colliding_titles, merge_by_title};
use crate::records::extract::{extract_prompt, ExtractedPrompt};
use crate::records::store::{load_local, write_records};
use crate::throttle::Throttle;

const REMOTE_TOOL: &str = "GitHub Copilot";
const REMOTE_CATEGORY: &str = "External";
const REMOTE_TAGS: &[&str] = &["GitHub", "OpenSource"];

/// Where the pipeline reads from and writes to.
#[derive(Debug, Clone)]
pub struct SyncTargets {
    pub listing_url: String,
    pub file_suffix: String,
    pub local_file: PathBuf,
    pub output_file: PathBuf,
    /// Skip the final write; everything else runs.
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSummary {
    pub local: usize,
    pub remote: usize,
    pub written: usize,
    pub output: PathBuf,
}

pub struct SyncPipeline {
    lister: Box<dyn RemoteLister>,
    fetcher: Box<dyn ContentFetcher>,
    throttle: Box<dyn Throttle>,
    progress: Box<dyn ProgressObserver>,
    targets: SyncTargets,
}

impl SyncPipeline {
    pub fn new(
        lister: Box<dyn RemoteLister>,
        fetcher: Box<dyn ContentFetcher>,
        throttle: Box<dyn Throttle>,
        progress: Box<dyn ProgressObserver>,
        targets: SyncTargets,
    ) -> Self {
        Self {
            lister,
            fetcher,
            throttle,
            progress,
            targets,
        }
    }

    /// Runs the full sync and returns what was written.
    pub async fn run(&self) -> Result<SyncSummary, SyncError> {
        // Step 1: bundled dataset
        let local = load_local(&self.targets.local_file).await?;
        self.progress.local_loaded(local.len());

        // Step 2: remote listing
        info!("Fetching file list from {}", self.targets.listing_url);
        let files = self
            .lister
            .list(&self.targets.listing_url, &self.targets.file_suffix)
            .await?;
        self.progress.listing_received(files.len());

        // Step 3: download and extract, one file at a time
        let remote = self.collect_remote(&files).await?;
        self.progress.downloads_finished(remote.len());

        // Step 4: merge
        for title in colliding_titles(&local, &remote) {
            warn!("Remote prompt '{title}' replaces the local prompt with the same title");
        }
        let local_count = local.len();
        let remote_count = remote.len();
        let merged = merge_by_title(local, remote);

        // Step 5: persist
        if self.targets.dry_run {
            info!(
                "Dry run: {} prompts would be written to {}",
                merged.len(),
                self.targets.output_file.display()
            );
        } else {
            write_records(&self.targets.output_file, &merged).await?;
            self.progress.saved(merged.len(), &self.targets.output_file);
        }

        Ok(SyncSummary {
            local: local_count,
            remote: remote_count,
            written: merged.len(),
            output: self.targets.output_file.clone(),
        })
    }

    async fn collect_remote(
        &self,
        files: &[FileDescriptor],
    ) -> Result<Vec<PromptRecord>, SyncError> {
        let mut records = Vec::with_capacity(files.len());

        for (index, file) in files.iter().enumerate() {
            self.progress.download_started(index + 1, files.len(), &file.name);

            let raw = self.fetcher.fetch(&file.download_url).await?;
            let extracted = extract_prompt(&raw, &file.name, &self.targets.file_suffix);
            debug!(
                file = %file.name,
                sha = %file.sha,
                title = %extracted.title,
                mode = ?extracted.front_matter.mode,
                "Extracted prompt"
            );
            records.push(remote_record(index, file, extracted));

            self.throttle.pause().await;
        }

        Ok(records)
    }
}

/// Builds the record for the `index`-th (0-based) matched remote file.
fn remote_record(index: usize, file: &FileDescriptor, extracted: ExtractedPrompt) -> PromptRecord {
    PromptRecord {
        id: format!("EXT-{}", index + 1),
        title: extracted.title,
        tool: REMOTE_TOOL.to_string(),
        category: REMOTE_CATEGORY.to_string(),
        tags: REMOTE_TAGS.iter().map(|t| t.to_string()).collect(),
        source: PromptSource::AwesomeCopilot,
        description: extracted.front_matter.description,
        content: extracted.content,
        original_url: Some(file.html_url.clone()).filter(|u| !u.is_empty()),
        extra: Default::default(),
    }
}
