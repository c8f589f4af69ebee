use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use sj_core::{EvaluationLog, EvaluationRecord, Result, Verdict, EMPTY_LOG_REPORT};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::{ensure_parent, storage_error};

/// Plain-text log, one formatted line per evaluation.
pub struct FsEvaluationLog {
    path: PathBuf,
    /// Single writer: timestamps are taken under the lock so file order
    /// matches timestamp order.
    append_lock: Mutex<()>,
}

impl FsEvaluationLog {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            append_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl EvaluationLog for FsEvaluationLog {
    async fn append(&self, text: &str, verdict: &Verdict) -> Result<EvaluationRecord> {
        let _guard = self.append_lock.lock().await;

        let record = EvaluationRecord::new(text, verdict.clone());
        let line = record.to_log_line();

        ensure_parent(&self.path).await?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| storage_error("opening", &self.path, e))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| storage_error("appending to", &self.path, e))?;
        file.sync_data()
            .await
            .map_err(|e| storage_error("syncing", &self.path, e))?;

        Ok(record)
    }

    async fn read_all(&self) -> Result<String> {
        match fs::read_to_string(&self.path).await {
            Ok(report) if report.is_empty() => Ok(EMPTY_LOG_REPORT.to_string()),
            Ok(report) => Ok(report),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(EMPTY_LOG_REPORT.to_string()),
            Err(e) => Err(storage_error("reading", &self.path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{break_medium, restore_medium};
    use crate::FsListStore;
    use chrono::{DateTime, Utc};
    use sj_core::{AppError, ListStore, WordLists};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn verdict(score: u8, censored: &str) -> Verdict {
        Verdict {
            is_valid: score < 4,
            profanity_score: score,
            censored_text: censored.to_string(),
        }
    }

    fn line_timestamp(line: &str) -> DateTime<Utc> {
        let end = line.find(']').unwrap();
        DateTime::parse_from_rfc3339(&line[1..end])
            .unwrap()
            .with_timezone(&Utc)
    }

    #[tokio::test]
    async fn fresh_log_reports_sentinel() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("evaluations.log");
        let log = FsEvaluationLog::new(path.clone());
        assert_eq!(log.read_all().await.unwrap(), EMPTY_LOG_REPORT);

        fs::write(&path, "").await.unwrap();
        assert_eq!(log.read_all().await.unwrap(), EMPTY_LOG_REPORT);
    }

    #[tokio::test]
    async fn sequential_appends_read_back_in_call_order() {
        let tmp = TempDir::new().unwrap();
        let log = FsEvaluationLog::new(tmp.path().join("evaluations.log"));

        let texts = ["first", "second", "third", "fourth"];
        let mut completed = Vec::new();
        for (i, text) in texts.iter().enumerate() {
            let record = log.append(text, &verdict(i as u8, text)).await.unwrap();
            assert_eq!(record.text, *text);
            completed.push(Utc::now());
        }

        let report = log.read_all().await.unwrap();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), texts.len());
        for (i, line) in lines.iter().enumerate() {
            assert!(line.contains(&format!("| TEXT: \"{}\" |", texts[i])), "{line}");
            assert!(line.contains(&format!("| SCORE: {i} |")), "{line}");
            assert!(line.ends_with(&format!("CENSORED: \"{}\"", texts[i])), "{line}");
            assert!(line_timestamp(line) <= completed[i]);
        }
    }

    #[tokio::test]
    async fn multi_line_text_stays_one_record() {
        let tmp = TempDir::new().unwrap();
        let log = FsEvaluationLog::new(tmp.path().join("evaluations.log"));

        log.append("line one\nline two", &verdict(1, "a\nb")).await.unwrap();
        log.append("carriage\r\nreturn", &verdict(0, "ok")).await.unwrap();

        let report = log.read_all().await.unwrap();
        assert_eq!(report.lines().count(), 2);
        let first = report.lines().next().unwrap();
        assert!(first.contains(r#"TEXT: "line one\nline two""#), "{first}");
        assert!(first.ends_with(r#"CENSORED: "a\nb""#), "{first}");
    }

    #[tokio::test]
    async fn concurrent_appends_never_interleave() {
        let tmp = TempDir::new().unwrap();
        let log = Arc::new(FsEvaluationLog::new(tmp.path().join("evaluations.log")));

        let mut handles = Vec::new();
        for i in 0..32 {
            let log = log.clone();
            handles.push(tokio::spawn(async move {
                log.append(&format!("message {i}"), &verdict(1, "x")).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let report = log.read_all().await.unwrap();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 32);
        for line in &lines {
            assert!(line.starts_with('['));
            assert!(line.contains("| IS_VALID: true | SCORE: 1 | CENSORED: \"x\""));
        }
        let stamps: Vec<_> = lines.iter().map(|l| line_timestamp(l)).collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn failed_append_keeps_previous_records() {
        let tmp = TempDir::new().unwrap();
        let data = tmp.path().join("data");
        let log = FsEvaluationLog::new(data.join("evaluations.log"));
        log.append("kept", &verdict(0, "kept")).await.unwrap();
        let before = log.read_all().await.unwrap();

        let parked = break_medium(&data).await;
        let err = log.append("lost", &verdict(0, "lost")).await.unwrap_err();
        assert!(matches!(err, AppError::StorageUnavailable(_)));
        restore_medium(&data, &parked).await;

        assert_eq!(log.read_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn log_and_lists_do_not_touch_each_other() {
        let tmp = TempDir::new().unwrap();
        let (lists, log) = crate::open(tmp.path());

        let snapshot = WordLists {
            blacklist: vec!["badword".into()],
            whitelist: vec![],
        };
        lists.write(&snapshot).await.unwrap();
        log.append("hello", &verdict(0, "hello")).await.unwrap();
        assert_eq!(lists.read().await.unwrap(), snapshot);

        let report = log.read_all().await.unwrap();
        lists.write(&WordLists::default()).await.unwrap();
        assert_eq!(log.read_all().await.unwrap(), report);
        assert!(FsListStore::new(tmp.path().join(crate::LISTS_FILE))
            .read()
            .await
            .unwrap()
            .blacklist
            .is_empty());
    }
}
