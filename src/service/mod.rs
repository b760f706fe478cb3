use std::{sync::Arc, time::Duration};

use tokio::time::timeout;

use crate::{
    dto::{CreateNoteRequest, NoteResponse, UpdateNoteRequest},
    error::ApiError,
    repository::Repository,
};

/// Trims both fields, treating an absent field as empty. Rejects before any
/// store interaction, so a validation failure has no side effects.
fn validated_fields(
    title: Option<String>,
    content: Option<String>,
) -> Result<(String, String), ApiError> {
    let title = title.unwrap_or_default().trim().to_string();
    let content = content.unwrap_or_default().trim().to_string();

    if title.is_empty() || content.is_empty() {
        return Err(ApiError::MissingFields);
    }

    Ok((title, content))
}

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<tokio::sync::Mutex<Repository>>,
    query_timeout: Duration,
}

impl NoteService {
    pub const fn new(repo: Arc<tokio::sync::Mutex<Repository>>, query_timeout: Duration) -> Self {
        Self {
            repo,
            query_timeout,
        }
    }

    pub async fn create_note(&self, request: CreateNoteRequest) -> Result<i64, ApiError> {
        let (title, content) = validated_fields(request.title, request.content)?;

        let id = timeout(self.query_timeout, async {
            self.repo.lock().await.create_note(title, content).await
        })
        .await??;

        Ok(id)
    }

    pub async fn update_note(&self, id: i64, request: UpdateNoteRequest) -> Result<(), ApiError> {
        let (title, content) = validated_fields(request.title, request.content)?;

        let updated = timeout(self.query_timeout, async {
            self.repo.lock().await.update_note(id, title, content).await
        })
        .await??;

        if updated { Ok(()) } else { Err(ApiError::NoteNotFound) }
    }

    pub async fn delete_note(&self, id: i64) -> Result<(), ApiError> {
        let deleted = timeout(self.query_timeout, async {
            self.repo.lock().await.delete_note(id).await
        })
        .await??;

        if deleted { Ok(()) } else { Err(ApiError::NoteNotFound) }
    }

    pub async fn get_one_note(&self, id: i64) -> Result<NoteResponse, ApiError> {
        let note = timeout(self.query_timeout, async {
            self.repo.lock().await.get_one_note(id).await
        })
        .await??;

        note.map(NoteResponse::from).ok_or(ApiError::NoteNotFound)
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, ApiError> {
        let notes = timeout(self.query_timeout, async {
            self.repo.lock().await.get_all_notes().await
        })
        .await??;

        Ok(notes.into_iter().map(NoteResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_fields_present_pass_trimmed() {
        let result = validated_fields(
            Some("  Groceries  ".to_string()),
            Some("Milk, eggs\n".to_string()),
        );
        assert!(matches!(
            result,
            Ok((title, content)) if title == "Groceries" && content == "Milk, eggs"
        ));
    }

    #[test]
    fn absent_title_is_rejected() {
        let result = validated_fields(None, Some("content".to_string()));
        assert!(matches!(result, Err(ApiError::MissingFields)));
    }

    #[test]
    fn whitespace_only_content_is_rejected() {
        let result = validated_fields(Some("title".to_string()), Some("   \t".to_string()));
        assert!(matches!(result, Err(ApiError::MissingFields)));
    }

    #[test]
    fn empty_strings_are_rejected() {
        let result = validated_fields(Some(String::new()), Some(String::new()));
        assert!(matches!(result, Err(ApiError::MissingFields)));
    }
}
