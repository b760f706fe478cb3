use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request, State},
    http::{StatusCode, request::Parts},
    response::IntoResponse,
};
use axum_macros::debug_handler;
use serde::de::DeserializeOwned;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{
        CreateNoteRequest, ErrorResponse, MessageResponse, NoteCreatedResponse, NoteResponse,
        UpdateNoteRequest,
    },
    error::ApiError,
    service::NoteService,
};

fn parse_note_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::NoteNotFound)
}

/// Path extractor for the `{id}` segment. A segment that does not parse as
/// an integer matches no note, so it is rejected as a 404 the same way a
/// route-level mismatch would be, before validation and before the store.
pub struct NoteId(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for NoteId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NoteNotFound)?;

        parse_note_id(&raw).map(Self)
    }
}

/// JSON body extractor whose rejection stays on the API's error contract: a
/// body that cannot be parsed carries no usable title or content, so it
/// fails the same required-fields rule as an empty one.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(_) => Err(ApiError::MissingFields),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(create_note, update_note, delete_note, get_one_note, get_all_notes),
    components(schemas(
        NoteResponse,
        CreateNoteRequest,
        UpdateNoteRequest,
        NoteCreatedResponse,
        MessageResponse,
        ErrorResponse
    )),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    post,
    path = "/api/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = NoteCreatedResponse),
        (status = 400, description = "Title or content missing or empty", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    ApiJson(payload): ApiJson<CreateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = service.create_note(payload).await?;

    let body = NoteCreatedResponse {
        id,
        message: "Note created successfully".to_string(),
    };

    Ok((StatusCode::CREATED, Json(body)))
}

#[utoipa::path(
    put,
    path = "/api/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = MessageResponse),
        (status = 400, description = "Title or content missing or empty", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    NoteId(id): NoteId,
    ApiJson(payload): ApiJson<UpdateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    service.update_note(id, payload).await?;

    let body = MessageResponse {
        message: "Note updated successfully".to_string(),
    };

    Ok((StatusCode::OK, Json(body)))
}

#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted successfully", body = MessageResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(service): State<Arc<NoteService>>,
    NoteId(id): NoteId,
) -> Result<impl IntoResponse, ApiError> {
    service.delete_note(id).await?;

    let body = MessageResponse {
        message: "Note deleted successfully".to_string(),
    };

    Ok((StatusCode::OK, Json(body)))
}

#[utoipa::path(
    get,
    path = "/api/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_one_note(
    State(service): State<Arc<NoteService>>,
    NoteId(id): NoteId,
) -> Result<impl IntoResponse, ApiError> {
    let note = service.get_one_note(id).await?;

    Ok((StatusCode::OK, Json(note)))
}

#[utoipa::path(
    get,
    path = "/api/notes",
    responses(
        (status = 200, description = "All notes, most recently updated first", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(
    State(service): State<Arc<NoteService>>,
) -> Result<impl IntoResponse, ApiError> {
    let notes = service.get_all_notes().await?;

    Ok((StatusCode::OK, Json(notes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn non_integer_id_segment_is_not_found() {
        assert!(matches!(parse_note_id("abc"), Err(ApiError::NoteNotFound)));
        assert!(matches!(parse_note_id("12.5"), Err(ApiError::NoteNotFound)));
        assert!(matches!(parse_note_id("1x"), Err(ApiError::NoteNotFound)));
        assert!(matches!(parse_note_id(""), Err(ApiError::NoteNotFound)));
    }

    #[test]
    fn integer_id_segment_parses() {
        assert!(matches!(parse_note_id("42"), Ok(42)));
        assert!(matches!(parse_note_id("-1"), Ok(-1)));
    }

    #[tokio::test]
    async fn unparseable_body_fails_required_fields_rule() {
        let req = Request::builder()
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let result = ApiJson::<CreateNoteRequest>::from_request(req, &()).await;
        assert!(matches!(result, Err(ApiError::MissingFields)));
    }

    #[tokio::test]
    async fn missing_content_type_fails_required_fields_rule() {
        let req = Request::builder()
            .body(Body::from(r#"{"title": "a", "content": "b"}"#))
            .unwrap();

        let result = ApiJson::<CreateNoteRequest>::from_request(req, &()).await;
        assert!(matches!(result, Err(ApiError::MissingFields)));
    }

    #[tokio::test]
    async fn well_formed_body_passes_through() {
        let req = Request::builder()
            .header("content-type", "application/json")
            .body(Body::from(r#"{"title": "a", "content": "b"}"#))
            .unwrap();

        let result = ApiJson::<CreateNoteRequest>::from_request(req, &()).await;
        let ApiJson(payload) = result.expect("body must parse");
        assert_eq!(payload.title.as_deref(), Some("a"));
        assert_eq!(payload.content.as_deref(), Some("b"));
    }
}
