use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;
use tracing::{info, warn};

use crate::errors::SyncError;
use crate::models::{PromptRecord, PromptSource};

/// Loads the bundled dataset and tags every entry as native.
/// A missing file is not an error; the sync proceeds with remote records only.
pub async fn load_local(path: &Path) -> Result<Vec<PromptRecord>, SyncError> {
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Local prompts file not found at {}", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(SyncError::io(path, e)),
    };

    let mut records: Vec<PromptRecord> = serde_json::from_str(&raw)
        .map_err(|e| SyncError::parse(format!("local prompts {}", path.display()), e))?;
    for record in &mut records {
        record.source = PromptSource::Native;
    }

    info!("Loaded {} local prompts", records.len());
    Ok(records)
}

/// Replaces `path` with the pretty-printed dataset, creating parent directories.
pub async fn write_records(path: &Path, records: &[PromptRecord]) -> Result<(), SyncError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .await
            .map_err(|e| SyncError::io(dir, e))?;
    }

    let json = serde_json::to_string_pretty(records)
        .map_err(|e| SyncError::parse("generated dataset", e))?;
    fs::write(path, json)
        .await
        .map_err(|e| SyncError::io(path, e))?;

    info!("Wrote {} prompts to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PromptRecord {
        PromptRecord {
            id: "1".into(),
            title: "Explain Code".into(),
            tool: "Claude".into(),
            category: "Learning".into(),
            tags: vec!["explain".into(), "onboarding".into()],
            source: PromptSource::Native,
            description: None,
            content: "Explain this code step by step.".into(),
            original_url: None,
            extra: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_missing_local_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let records = load_local(&dir.path().join("absent.json")).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_local_records_tagged_native() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "title": "A", "tool": "Cursor", "category": "Dev",
                 "tags": ["x"], "source": "awesome-copilot", "content": "a"}]"#,
        )
        .unwrap();

        let records = load_local(&path).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "1");
        assert_eq!(records[0].source, PromptSource::Native);
    }

    #[tokio::test]
    async fn test_local_entries_pass_through_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("local.json");
        let output = dir.path().join("out/prompts.json");
        std::fs::write(
            &local,
            r#"[{"id": "4", "title": "Commit Message", "tool": "Claude", "category": "Git",
                 "tags": ["git"], "source": "community", "author": "alice",
                 "content": "Write a commit message."}]"#,
        )
        .unwrap();

        let records = load_local(&local).await.unwrap();
        assert_eq!(records[0].source, PromptSource::Native);
        write_records(&output, &records).await.unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written[0]["author"], "alice");
        assert_eq!(written[0]["source"], "native");
        assert_eq!(written[0]["content"], "Write a commit message.");
    }

    #[tokio::test]
    async fn test_invalid_local_json_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load_local(&path).await.unwrap_err();
        assert!(matches!(err, SyncError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_write_creates_dirs_and_pretty_prints() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/data/prompts.json");

        write_records(&path, &[sample()]).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("[\n  {\n    \"id\": \"1\""));
        let back: Vec<PromptRecord> = serde_json::from_str(&written).unwrap();
        assert_eq!(back, vec![sample()]);
    }

    #[tokio::test]
    async fn test_write_overwrites_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompts.json");
        std::fs::write(&path, "stale contents that are much longer than the new file").unwrap();

        write_records(&path, &[]).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }
}
