//! Progress reporting for the sync pipeline.
//!
//! The pipeline notifies an observer after each step instead of writing to the
//! console itself. `ConsoleProgress` renders the human-facing output on stdout;
//! `SilentProgress` drops everything.

use std::io::Write;
use std::path::Path;

/// Side-channel notified as the pipeline advances. All methods default to no-ops.
pub trait ProgressObserver: Send + Sync {
    fn local_loaded(&self, _count: usize) {}
    fn listing_received(&self, _matched: usize) {}
    /// `index` is 1-based.
    fn download_started(&self, _index: usize, _total: usize, _name: &str) {}
    fn downloads_finished(&self, _count: usize) {}
    fn saved(&self, _count: usize, _path: &Path) {}
}

pub struct SilentProgress;

impl ProgressObserver for SilentProgress {}

/// Console renderer. The download line is rewritten in place with `\r`.
pub struct ConsoleProgress;

impl ConsoleProgress {
    fn line(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{text}");
    }
}

impl ProgressObserver for ConsoleProgress {
    fn local_loaded(&self, count: usize) {
        self.line(&format!("Loaded {count} local prompts."));
    }

    fn listing_received(&self, matched: usize) {
        self.line(&format!("Found {matched} prompt files."));
    }

    fn download_started(&self, index: usize, total: usize, name: &str) {
        let mut out = std::io::stdout().lock();
        let _ = write!(out, "\rDownloading {index}/{total}: {name}...");
        let _ = out.flush();
    }

    fn downloads_finished(&self, count: usize) {
        self.line(&format!("\nDownload complete ({count} files)."));
    }

    fn saved(&self, count: usize, path: &Path) {
        self.line(&format!(
            "Saved {count} consolidated prompts to {}",
            path.display()
        ));
    }
}
