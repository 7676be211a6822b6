//! Question pool loading with fallback content.

use gamechanger_core::{builtin, CatalogKey, Question};
use gamechanger_storage::{Storage, StorageError};
use tracing::{info, warn};

use crate::error::ProgressError;

/// A loaded pool plus any advisory raised while loading it.
#[derive(Debug)]
pub struct LoadedPool {
    /// Questions ready for use (may be empty)
    pub questions: Vec<Question>,

    /// Recoverable problem the host may show the user
    pub advisory: Option<ProgressError>,
}

/// Load a pool from storage without ever failing.
///
/// - absent file: built-in samples, `MissingResource` advisory
/// - empty file: empty pool, `EmptyPool` advisory
/// - parse failure: empty pool, `MalformedResource` advisory
/// - other storage failure: empty pool, `Storage` advisory
pub async fn load_pool<S: Storage + ?Sized>(storage: &S, key: &CatalogKey) -> LoadedPool {
    match storage.load_catalog(key).await {
        Ok(Some(mut questions)) => {
            fill_worksheet_defaults(key, &mut questions);
            info!("Loaded {} questions from {}", questions.len(), key);
            let advisory = questions.is_empty().then_some(ProgressError::EmptyPool);
            LoadedPool { questions, advisory }
        }
        Ok(None) => {
            let questions = fallback_for(key);
            warn!("{} not found, using {} built-in question(s)", key, questions.len());
            LoadedPool {
                questions,
                advisory: Some(ProgressError::MissingResource(key.to_string())),
            }
        }
        Err(StorageError::Json(e)) => {
            warn!("{} is malformed: {}", key, e);
            LoadedPool {
                questions: Vec::new(),
                advisory: Some(ProgressError::MalformedResource {
                    resource: key.to_string(),
                    reason: e.to_string(),
                }),
            }
        }
        Err(e) => {
            warn!("Failed to load {}: {}", key, e);
            LoadedPool {
                questions: Vec::new(),
                advisory: Some(ProgressError::Storage(e)),
            }
        }
    }
}

fn fallback_for(key: &CatalogKey) -> Vec<Question> {
    match key {
        CatalogKey::Worksheet { category, worksheet, .. } => {
            builtin::worksheet_samples(category, worksheet).unwrap_or_else(|| vec![builtin::sample_question()])
        }
        CatalogKey::Diagnostic(_) => vec![builtin::sample_question()],
    }
}

// Worksheet files carry no subject/topic; the worksheet itself is the topic.
fn fill_worksheet_defaults(key: &CatalogKey, questions: &mut [Question]) {
    if let CatalogKey::Worksheet { category, worksheet, .. } = key {
        for q in questions.iter_mut() {
            if q.subject.is_empty() {
                q.subject = category.clone();
            }
            if q.topic.is_empty() {
                q.topic = worksheet.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamechanger_core::{GradeLevel, DIAGNOSTIC_DIR};
    use gamechanger_storage::JsonStorage;

    #[tokio::test]
    async fn test_absent_diagnostic_falls_back_to_sample() {
        let temp = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(temp.path()).await.unwrap();

        let loaded = load_pool(&storage, &CatalogKey::Diagnostic(GradeLevel::Grade5)).await;
        assert_eq!(loaded.questions, vec![builtin::sample_question()]);
        assert!(matches!(loaded.advisory, Some(ProgressError::MissingResource(_))));
    }

    #[tokio::test]
    async fn test_absent_worksheet_uses_known_samples() {
        let temp = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(temp.path()).await.unwrap();

        let key = CatalogKey::worksheet("Grammar", "Pronouns", "Subject Pronouns");
        let loaded = load_pool(&storage, &key).await;
        assert_eq!(loaded.questions.len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_pool_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(temp.path()).await.unwrap();
        std::fs::write(
            temp.path().join(DIAGNOSTIC_DIR).join("ged_diagnostic.json"),
            r#"{"question": "not a list"}"#,
        )
        .unwrap();

        let loaded = load_pool(&storage, &CatalogKey::Diagnostic(GradeLevel::Ged)).await;
        assert!(loaded.questions.is_empty());
        assert!(matches!(loaded.advisory, Some(ProgressError::MalformedResource { .. })));
    }

    #[tokio::test]
    async fn test_empty_catalog_is_reported() {
        let temp = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(temp.path()).await.unwrap();
        std::fs::write(temp.path().join(DIAGNOSTIC_DIR).join("grade1_diagnostic.json"), "[]").unwrap();

        let loaded = load_pool(&storage, &CatalogKey::Diagnostic(GradeLevel::Grade1)).await;
        assert!(loaded.questions.is_empty());
        assert!(matches!(loaded.advisory, Some(ProgressError::EmptyPool)));
    }

    #[tokio::test]
    async fn test_worksheet_topics_filled_in() {
        let temp = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(temp.path()).await.unwrap();
        let dir = temp.path().join("worksheets/Writing/Alphabetical Order");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("ABC_Practice.json"),
            r#"[{"question": "Which comes first: cat or bat?", "answer": "bat", "difficulty": "Easy"}]"#,
        )
        .unwrap();

        let key = CatalogKey::worksheet("Writing", "Alphabetical Order", "ABC Practice");
        let loaded = load_pool(&storage, &key).await;
        assert!(loaded.advisory.is_none());
        assert_eq!(loaded.questions[0].subject, "Writing");
        assert_eq!(loaded.questions[0].topic, "ABC Practice");
    }
}
