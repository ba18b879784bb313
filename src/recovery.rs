//! Renames recovered fragments after their detected format.
//!
//! Detection and timestamp extraction run in parallel; renames are applied
//! one at a time in candidate order so collision suffixes are deterministic.
//! A failure on one file is recorded and the batch carries on.

use crate::detection::detect_file;
use crate::metadata::document_timestamp;
use crate::types::{DocumentTimestamp, FileType};
use rayon::prelude::*;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

/// Extension given to lost fragments by CHKDSK / ScanDisk.
pub const DEFAULT_EXTENSION: &str = "chk";

pub type ProgressCallback<'a> = &'a (dyn Fn(usize, usize) + Sync);

#[derive(Debug, Error)]
pub enum RecoveryError {
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to write report: {0}")]
    Report(#[from] serde_json::Error),
}

/// Which directory entries are treated as fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateFilter {
    /// Files whose extension matches, ignoring ASCII case.
    Extension(String),
    /// Every regular file.
    All,
}

impl CandidateFilter {
    #[must_use]
    pub fn accepts(&self, path: &Path) -> bool {
        match self {
            Self::All => true,
            Self::Extension(wanted) => path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted.trim_start_matches('.'))),
        }
    }
}

impl Default for CandidateFilter {
    fn default() -> Self {
        Self::Extension(DEFAULT_EXTENSION.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecoveryOptions {
    pub filter: CandidateFilter,
}

impl RecoveryOptions {
    pub fn with_filter(mut self, filter: CandidateFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Regular files directly inside `dir` accepted by `filter`, sorted by name.
pub fn list_candidates(dir: &Path, filter: &CandidateFilter) -> Result<Vec<PathBuf>, RecoveryError> {
    if !dir.is_dir() {
        return Err(RecoveryError::NotADirectory(dir.to_path_buf()));
    }

    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if filter.accepts(&path) {
            candidates.push(path);
        }
    }
    candidates.sort();
    Ok(candidates)
}

/// What the detector and extractor decided for one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePlan {
    pub source: PathBuf,
    pub file_type: FileType,
    pub timestamp: Option<DocumentTimestamp>,
}

impl FilePlan {
    /// Stem of the new name: the document timestamp when one was recovered,
    /// else the original name without its last extension.
    #[must_use]
    pub fn stem(&self) -> String {
        match self.timestamp {
            Some(timestamp) => timestamp.file_stem(),
            None => original_stem(&self.source),
        }
    }
}

#[must_use]
pub fn original_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Runs detection, then timestamp extraction for document formats.
pub fn plan_file(path: &Path) -> FilePlan {
    let file_type = detect_file(path);
    let timestamp = if file_type.is_document() {
        document_timestamp(path, file_type)
    } else {
        None
    };

    FilePlan {
        source: path.to_path_buf(),
        file_type,
        timestamp,
    }
}

/// First free path among `<stem>.<ext>`, `<stem>_001.<ext>`, `<stem>_002.<ext>`, ...
///
/// `source` itself never counts as taken, so a file that already carries its
/// target name keeps it.
#[must_use]
pub fn resolve_collision(dir: &Path, stem: &str, extension: &str, source: &Path) -> PathBuf {
    let is_free = |candidate: &Path| candidate == source || !candidate.exists();

    let first = dir.join(format!("{stem}.{extension}"));
    if is_free(first.as_path()) {
        return first;
    }

    let mut counter = 1u32;
    loop {
        let candidate = dir.join(format!("{stem}_{counter:03}.{extension}"));
        if is_free(candidate.as_path()) {
            return candidate;
        }
        counter += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameRecord {
    pub renamed: String,
    pub extension: &'static str,
    pub format: &'static str,
    pub from_timestamp: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileOutcome {
    Renamed(RenameRecord),
    Unknown,
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    pub original: String,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RecoveryReport {
    pub folder: PathBuf,
    pub recovered: usize,
    pub unknown: usize,
    pub errors: usize,
    pub total: usize,
    pub entries: Vec<FileEntry>,
}

impl RecoveryReport {
    fn record(&mut self, original: String, outcome: FileOutcome) {
        match &outcome {
            FileOutcome::Renamed(_) => self.recovered += 1,
            FileOutcome::Unknown => self.unknown += 1,
            FileOutcome::Failed { .. } => self.errors += 1,
        }
        self.entries.push(FileEntry { original, outcome });
    }

    pub fn write_json(&self, path: &Path) -> Result<(), RecoveryError> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

/// Applies a plan: picks a free name next to the source and renames.
pub fn apply_plan(plan: &FilePlan) -> FileOutcome {
    if !plan.file_type.is_known() {
        return FileOutcome::Unknown;
    }

    let dir = plan.source.parent().unwrap_or_else(|| Path::new("."));
    let target = resolve_collision(dir, &plan.stem(), plan.file_type.extension(), &plan.source);

    if target != plan.source {
        if let Err(e) = fs::rename(&plan.source, &target) {
            tracing::warn!("rename {} failed: {}", plan.source.display(), e);
            return FileOutcome::Failed {
                error: e.to_string(),
            };
        }
    }

    FileOutcome::Renamed(RenameRecord {
        renamed: target
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        extension: plan.file_type.extension(),
        format: plan.file_type.name(),
        from_timestamp: plan.timestamp.is_some(),
    })
}

/// Detects, names and renames every candidate in `dir`.
///
/// `progress` receives `(done, total)` as planning completes.
pub fn recover_directory(
    dir: &Path,
    options: &RecoveryOptions,
    progress: Option<ProgressCallback<'_>>,
) -> Result<RecoveryReport, RecoveryError> {
    let candidates = list_candidates(dir, &options.filter)?;
    let total = candidates.len();

    tracing::info!("Starting recovery of {} candidate files in {}", total, dir.display());

    let done = AtomicUsize::new(0);
    let plans: Vec<FilePlan> = candidates
        .par_iter()
        .map(|path| {
            let plan = plan_file(path);
            let current = done.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(callback) = progress {
                callback(current, total);
            }
            plan
        })
        .collect();

    let mut report = RecoveryReport {
        folder: dir.to_path_buf(),
        total,
        ..Default::default()
    };

    for plan in &plans {
        let original = plan
            .source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let outcome = apply_plan(plan);
        tracing::debug!("{} -> {:?}", original, outcome);
        report.record(original, outcome);
    }

    tracing::info!(
        "Recovery finished: {} renamed, {} unknown, {} errors",
        report.recovered,
        report.unknown,
        report.errors
    );

    Ok(report)
}
