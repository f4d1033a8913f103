//! Reporting sinks for winning submissions.
//!
//! The terminal has no network access, so submissions either go to a JSONL outbox file
//! that another process forwards, or only to the log.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use shopbingo_engine::collaborators::{ReportingSink, WinningSubmission};
use shopbingo_engine::errors::ReportError;

use crate::io_utils::ensure_parent_dir;

/// Appends one JSON object per submission, stamped with an RFC3339 `ts`.
#[derive(Debug, Clone)]
pub struct JsonlReportSink {
    path: PathBuf,
    written: usize,
}

impl JsonlReportSink {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            written: 0,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    fn append(&mut self, submission: &WinningSubmission) -> Result<(), ReportError> {
        ensure_parent_dir(&self.path).map_err(ReportError::Unavailable)?;
        let mut value = serde_json::to_value(submission)
            .map_err(|e| ReportError::Rejected(e.to_string()))?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "ts".to_string(),
                serde_json::Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
            );
        }
        let line =
            serde_json::to_string(&value).map_err(|e| ReportError::Rejected(e.to_string()))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| ReportError::Unavailable(format!("{}: {}", self.path.display(), e)))?;
        writeln!(file, "{}", line)
            .map_err(|e| ReportError::Unavailable(format!("{}: {}", self.path.display(), e)))?;
        self.written += 1;
        Ok(())
    }
}

impl ReportingSink for JsonlReportSink {
    fn submit(&mut self, submission: &WinningSubmission) -> Result<(), ReportError> {
        self.append(submission)
    }
}

/// Records submissions in the log only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReportSink;

impl ReportingSink for LogReportSink {
    fn submit(&mut self, submission: &WinningSubmission) -> Result<(), ReportError> {
        tracing::info!(
            card_id = submission.card_id,
            round_id = %submission.round_id,
            shop_id = submission.shop_id.as_deref().unwrap_or("-"),
            prize = submission.prize,
            "winning submission (no outbox configured)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(card_id: u32) -> WinningSubmission {
        WinningSubmission {
            card_id,
            round_id: "20250101-000003".into(),
            shop_id: Some("adama".into()),
            prize: 24.0,
        }
    }

    #[test]
    fn outbox_appends_stamped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outbox").join("wins.jsonl");
        let mut sink = JsonlReportSink::new(&path);
        sink.submit(&submission(4)).unwrap();
        sink.submit(&submission(9)).unwrap();
        assert_eq!(sink.written(), 2);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["card_id"], 4);
        assert_eq!(lines[1]["shop_id"], "adama");
        assert_eq!(lines[1]["prize"], 24.0);
        let ts = lines[0]["ts"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[test]
    fn unwritable_outbox_reports_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be opened for appending
        let mut sink = JsonlReportSink::new(dir.path());
        assert!(matches!(
            sink.submit(&submission(1)),
            Err(ReportError::Unavailable(_))
        ));
        assert_eq!(sink.written(), 0);
    }
}
