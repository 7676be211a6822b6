//! JSON file storage implementation.
//!
//! Catalog pools live under `diagnostics/` and `worksheets/` exactly as
//! [`CatalogKey::relative_path`] lays them out. Session snapshots are stored
//! as `sessions/<id>.json` and the score ledger as `scores.csv`.

use std::path::{Path, PathBuf};
use gamechanger_core::{CatalogKey, Question, SessionId, SessionState, DIAGNOSTIC_DIR, WORKSHEET_DIR};
use super::{Storage, Result};
use crate::ledger::{ScoreLedger, ScoreRecord};
use tokio::fs;
use tracing::debug;

/// Ledger file name under the storage root.
pub const LEDGER_FILE: &str = "scores.csv";

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
    ledger: ScoreLedger,
}

impl JsonStorage {
    /// Create storage rooted at `root`, creating the catalog and session
    /// directories if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join(DIAGNOSTIC_DIR)).await?;
        fs::create_dir_all(root.join(WORKSHEET_DIR)).await?;
        fs::create_dir_all(root.join("sessions")).await?;

        let ledger = ScoreLedger::new(root.join(LEDGER_FILE));
        Ok(Self { root, ledger })
    }

    /// Storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The score ledger.
    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    fn catalog_path(&self, key: &CatalogKey) -> PathBuf {
        self.root.join(key.relative_path())
    }

    fn session_path(&self, id: SessionId) -> PathBuf {
        self.root.join("sessions").join(format!("{}.json", id))
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn load_catalog(&self, key: &CatalogKey) -> Result<Option<Vec<Question>>> {
        let path = self.catalog_path(key);
        debug!("Loading catalog {} from {}", key, path.display());
        read_json(&path).await
    }

    async fn save_catalog(&mut self, key: &CatalogKey, questions: &[Question]) -> Result<()> {
        let path = self.catalog_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(questions)?;
        fs::write(&path, json.as_bytes()).await?;
        Ok(())
    }

    async fn save_session(&mut self, session: &SessionState) -> Result<()> {
        let path = self.session_path(session.id);
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&path, json.as_bytes()).await?;
        debug!("Saved session {}", session.id);
        Ok(())
    }

    async fn load_session(&self, id: SessionId) -> Result<Option<SessionState>> {
        read_json(&self.session_path(id)).await
    }

    async fn list_sessions(&self) -> Result<Vec<SessionState>> {
        let mut sessions = list_dir(&self.root.join("sessions")).await?;
        sessions.sort_by(|a: &SessionState, b| a.created_at.cmp(&b.created_at));
        Ok(sessions)
    }

    async fn delete_session(&mut self, id: SessionId) -> Result<()> {
        fs::remove_file(self.session_path(id)).await.or_else(|e| {
            if e.kind() == std::io::ErrorKind::NotFound { Ok(()) } else { Err(e) }
        })?;
        Ok(())
    }

    async fn append_scores(&mut self, record: &ScoreRecord) -> Result<()> {
        self.ledger.append(record).await
    }

    async fn list_scores(&self) -> Result<Vec<ScoreRecord>> {
        self.ledger.read_all().await
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        if let Ok(Some(item)) = read_json(&entry.path()).await {
            items.push(item);
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageError;
    use chrono::NaiveDate;
    use gamechanger_core::{Difficulty, GradeLevel, StudentId, TraitScores};

    #[tokio::test]
    async fn test_catalog_absent_is_none() {
        let temp = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(temp.path()).await.unwrap();

        let pool = storage
            .load_catalog(&CatalogKey::Diagnostic(GradeLevel::Grade4))
            .await
            .unwrap();
        assert!(pool.is_none());
    }

    #[tokio::test]
    async fn test_catalog_save_and_load() {
        let temp = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(temp.path()).await.unwrap();
        let key = CatalogKey::worksheet("Grammar", "Verbs", "Present Tense");
        let questions = vec![Question::new("Grammar", "Present Tense", Difficulty::Easy, "She ___ (run)", "runs")];

        storage.save_catalog(&key, &questions).await.unwrap();
        assert!(temp.path().join("worksheets/Grammar/Verbs/Present_Tense.json").exists());

        let loaded = storage.load_catalog(&key).await.unwrap().unwrap();
        assert_eq!(loaded, questions);
    }

    #[tokio::test]
    async fn test_malformed_catalog_is_json_error() {
        let temp = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(temp.path()).await.unwrap();
        std::fs::write(temp.path().join("diagnostics/grade2_diagnostic.json"), "[{ not json").unwrap();

        let err = storage
            .load_catalog(&CatalogKey::Diagnostic(GradeLevel::Grade2))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let temp = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(temp.path()).await.unwrap();
        let session = SessionState::new().with_student(StudentId::new("Masaki"));

        storage.save_session(&session).await.unwrap();
        let loaded = storage.load_session(session.id).await.unwrap().unwrap();
        assert_eq!(loaded.student, Some(StudentId::new("Masaki")));
        assert_eq!(storage.list_sessions().await.unwrap().len(), 1);

        storage.delete_session(session.id).await.unwrap();
        assert!(storage.load_session(session.id).await.unwrap().is_none());
        // Deleting twice is fine
        storage.delete_session(session.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_scores_go_to_ledger() {
        let temp = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(temp.path()).await.unwrap();
        let record = ScoreRecord::new(
            StudentId::new("Jake"),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            TraitScores::default(),
        );

        storage.append_scores(&record).await.unwrap();
        storage.append_scores(&record).await.unwrap();

        assert!(temp.path().join(LEDGER_FILE).exists());
        assert_eq!(storage.list_scores().await.unwrap(), vec![record.clone(), record]);
    }
}
