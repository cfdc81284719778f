//! Analysis counters with optional JSON persistence.

use crate::core::report::MetricReport;
use crate::linguistic::AugmentationStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::warn;

/// File name of the persisted log inside the data directory.
pub const LOG_FILE_NAME: &str = "analysis_log.json";

/// Cumulative counters across analyzed submissions.
#[derive(Debug, Default)]
pub struct AnalysisLog {
    submissions_analyzed: AtomicU64,
    keystrokes_processed: AtomicU64,
    pointer_samples_processed: AtomicU64,
    events_dropped: AtomicU64,
    augmentation_applied: AtomicU64,
    augmentation_skipped: AtomicU64,
    last_analysis: Mutex<Option<DateTime<Utc>>>,
    /// Path for persisting stats
    persist_path: Option<PathBuf>,
}

impl AnalysisLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log persisted under `data_dir`, loading any previous counters.
    pub fn with_persistence(data_dir: impl AsRef<Path>) -> Self {
        let log = Self {
            persist_path: Some(data_dir.as_ref().join(LOG_FILE_NAME)),
            ..Self::default()
        };

        if let Err(e) = log.load() {
            warn!(error = %e, "Could not load previous analysis log");
        }

        log
    }

    /// Count one analyzed submission.
    pub fn record_report(&self, report: &MetricReport) {
        let accepted = report.telemetry.accepted;
        self.submissions_analyzed.fetch_add(1, Ordering::Relaxed);
        self.keystrokes_processed
            .fetch_add(accepted.keystrokes as u64, Ordering::Relaxed);
        self.pointer_samples_processed
            .fetch_add(accepted.pointer_samples as u64, Ordering::Relaxed);
        self.events_dropped
            .fetch_add(report.telemetry.dropped.total() as u64, Ordering::Relaxed);

        match report.augmentation {
            AugmentationStatus::Applied { .. } => {
                self.augmentation_applied.fetch_add(1, Ordering::Relaxed);
            }
            AugmentationStatus::Skipped { .. } => {
                self.augmentation_skipped.fetch_add(1, Ordering::Relaxed);
            }
            AugmentationStatus::NotRequested => {}
        }

        if let Ok(mut last) = self.last_analysis.lock() {
            *last = Some(Utc::now());
        }
    }

    pub fn stats(&self) -> AnalysisStats {
        AnalysisStats {
            submissions_analyzed: self.submissions_analyzed.load(Ordering::Relaxed),
            keystrokes_processed: self.keystrokes_processed.load(Ordering::Relaxed),
            pointer_samples_processed: self.pointer_samples_processed.load(Ordering::Relaxed),
            events_dropped: self.events_dropped.load(Ordering::Relaxed),
            augmentation_applied: self.augmentation_applied.load(Ordering::Relaxed),
            augmentation_skipped: self.augmentation_skipped.load(Ordering::Relaxed),
            last_analysis: self.last_analysis.lock().ok().and_then(|last| *last),
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.stats();
        let last = stats
            .last_analysis
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "never".to_string());
        format!(
            "Analysis Statistics:\n\
             - Submissions analyzed: {}\n\
             - Keystrokes processed: {}\n\
             - Pointer samples processed: {}\n\
             - Malformed events dropped: {}\n\
             - Augmentation applied: {}\n\
             - Augmentation skipped: {}\n\
             - Last analysis: {}",
            stats.submissions_analyzed,
            stats.keystrokes_processed,
            stats.pointer_samples_processed,
            stats.events_dropped,
            stats.augmentation_applied,
            stats.augmentation_skipped,
            last
        )
    }

    /// Save stats to disk.
    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(ref path) = self.persist_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let json =
                serde_json::to_string_pretty(&self.stats()).map_err(std::io::Error::other)?;
            std::fs::write(path, json)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<(), std::io::Error> {
        let Some(ref path) = self.persist_path else {
            return Ok(());
        };
        if !path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(path)?;
        let persisted: AnalysisStats =
            serde_json::from_str(&content).map_err(std::io::Error::other)?;

        self.submissions_analyzed
            .store(persisted.submissions_analyzed, Ordering::Relaxed);
        self.keystrokes_processed
            .store(persisted.keystrokes_processed, Ordering::Relaxed);
        self.pointer_samples_processed
            .store(persisted.pointer_samples_processed, Ordering::Relaxed);
        self.events_dropped
            .store(persisted.events_dropped, Ordering::Relaxed);
        self.augmentation_applied
            .store(persisted.augmentation_applied, Ordering::Relaxed);
        self.augmentation_skipped
            .store(persisted.augmentation_skipped, Ordering::Relaxed);
        if let Ok(mut last) = self.last_analysis.lock() {
            *last = persisted.last_analysis;
        }
        Ok(())
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.submissions_analyzed.store(0, Ordering::Relaxed);
        self.keystrokes_processed.store(0, Ordering::Relaxed);
        self.pointer_samples_processed.store(0, Ordering::Relaxed);
        self.events_dropped.store(0, Ordering::Relaxed);
        self.augmentation_applied.store(0, Ordering::Relaxed);
        self.augmentation_skipped.store(0, Ordering::Relaxed);
        if let Ok(mut last) = self.last_analysis.lock() {
            *last = None;
        }
    }
}

/// Snapshot of analysis counters; also the persisted format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStats {
    pub submissions_analyzed: u64,
    pub keystrokes_processed: u64,
    pub pointer_samples_processed: u64,
    pub events_dropped: u64,
    pub augmentation_applied: u64,
    pub augmentation_skipped: u64,
    #[serde(default)]
    pub last_analysis: Option<DateTime<Utc>>,
}
