//! Upload pipeline: filter a batch of candidate files and submit the
//! survivors one at a time.
//!
//! A batch with no audio candidates is rejected up front with a single
//! user-visible message and no request. Individual upload failures are
//! recorded and the rest of the batch still runs; the caller refreshes the
//! playlist exactly once afterwards, whatever the per-file outcomes were.

use std::path::{Path, PathBuf};

use crate::api::{ApiError, UploadResponse};

/// Extensions the server accepts, matching its upload validation.
pub const AUDIO_EXTENSIONS: [&str; 4] = ["mp3", "wav", "ogg", "m4a"];

/// Whether a file looks like audio: a declared media type in the audio
/// category, or a recognized extension.
pub fn is_audio_candidate(name: &str, declared_type: Option<&str>) -> bool {
    if declared_type.is_some_and(|t| t.starts_with("audio/")) {
        return true;
    }

    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            AUDIO_EXTENSIONS.iter().any(|a| *a == ext)
        })
        .unwrap_or(false)
}

/// Keep only the paths that look like audio files.
pub fn filter_audio(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths
        .into_iter()
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map(|n| is_audio_candidate(n, None))
                .unwrap_or(false)
        })
        .collect()
}

/// Outcome of one batch.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub accepted: usize,
    pub uploaded: usize,
    /// One human-readable line per failed file.
    pub failures: Vec<String>,
}

/// Filter `files` and submit each survivor sequentially through `submit`.
///
/// Returns `None` when nothing in the batch is audio; no submission happens
/// then. Partial success is a supported outcome: a failed file is recorded
/// and the batch continues.
pub fn run_batch<F>(files: &[PathBuf], mut submit: F) -> Option<BatchReport>
where
    F: FnMut(&Path) -> Result<UploadResponse, ApiError>,
{
    let accepted = filter_audio(files.to_vec());
    if accepted.is_empty() {
        return None;
    }

    let mut report = BatchReport {
        accepted: accepted.len(),
        ..BatchReport::default()
    };

    for path in &accepted {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();

        match submit(path) {
            Ok(UploadResponse { success: true, .. }) => report.uploaded += 1,
            Ok(UploadResponse { error, .. }) => {
                let reason = error.unwrap_or_else(|| "rejected by server".to_string());
                report.failures.push(format!("{name}: {reason}"));
            }
            Err(e) => report.failures.push(format!("{name}: {e}")),
        }
    }

    Some(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(v: &[&str]) -> Vec<PathBuf> {
        v.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn candidate_filter_accepts_audio_extensions_and_types() {
        assert!(is_audio_candidate("a.mp3", None));
        assert!(is_audio_candidate("A.M4A", None));
        assert!(is_audio_candidate("b.ogg", None));
        assert!(is_audio_candidate("c.wav", None));
        assert!(is_audio_candidate("weird.bin", Some("audio/flac")));

        assert!(!is_audio_candidate("b.txt", None));
        assert!(!is_audio_candidate("noext", None));
        assert!(!is_audio_candidate("b.txt", Some("text/plain")));
    }

    #[test]
    fn mixed_batch_submits_only_the_audio_file() {
        let mut submitted: Vec<PathBuf> = Vec::new();
        let report = run_batch(&paths(&["a.mp3", "b.txt"]), |p| {
            submitted.push(p.to_path_buf());
            Ok(UploadResponse {
                success: true,
                error: None,
            })
        })
        .unwrap();

        assert_eq!(submitted, paths(&["a.mp3"]));
        assert_eq!(report.accepted, 1);
        assert_eq!(report.uploaded, 1);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn all_rejected_batch_issues_no_request() {
        let mut calls = 0;
        let report = run_batch(&paths(&["b.txt", "c.pdf"]), |_| {
            calls += 1;
            Ok(UploadResponse {
                success: true,
                error: None,
            })
        });

        assert!(report.is_none());
        assert_eq!(calls, 0);
    }

    #[test]
    fn one_failure_does_not_abort_the_rest() {
        let mut calls = 0;
        let report = run_batch(&paths(&["a.mp3", "b.ogg", "c.wav"]), |p| {
            calls += 1;
            if p.ends_with("b.ogg") {
                Ok(UploadResponse {
                    success: false,
                    error: Some("invalid file format".into()),
                })
            } else {
                Ok(UploadResponse {
                    success: true,
                    error: None,
                })
            }
        })
        .unwrap();

        assert_eq!(calls, 3);
        assert_eq!(report.uploaded, 2);
        assert_eq!(report.failures, vec!["b.ogg: invalid file format"]);
    }
}
