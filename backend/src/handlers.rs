use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap};
use axum::Json;
use serde_json::{json, Value};
use todo_shared::{CreateTodoTask, EditTodoTask, TodoTask, ValidationError};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::store::SharedStore;

pub const DELETED_MESSAGE: &str = "Todo Item successfully deleted";

pub async fn list_todos(State(store): State<SharedStore>) -> Result<Json<Vec<TodoTask>>, ApiError> {
    let todos = store.find_all().await?;
    Ok(Json(todos))
}

/// Answers `null` rather than 404 when the id is unknown.
pub async fn get_todo(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Option<TodoTask>>, ApiError> {
    let todo = store.find_one(&id).await?;
    Ok(Json(todo))
}

pub async fn create_todo(
    State(store): State<SharedStore>,
    payload: Result<Json<CreateTodoTask>, JsonRejection>,
) -> Result<Json<Option<TodoTask>>, ApiError> {
    // An unreadable body is validated as an empty payload.
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            debug!(%rejection, "create payload unreadable");
            CreateTodoTask::default()
        }
    };

    let task = TodoTask::create(payload.validate()?);
    store.insert_one(&task).await?;
    info!(id = %task.id, priority = %task.priority, "todo created");

    // Answer with what the store holds, not the local copy.
    let stored = store.find_one(&task.id).await?;
    Ok(Json(stored))
}

pub async fn edit_todo(
    State(store): State<SharedStore>,
    id: Option<Path<String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Option<TodoTask>>, ApiError> {
    let id = ValidationError::check_id(id.as_ref().map(|Path(id)| id.as_str()))?;
    let edit = edit_from_body(&headers, &body)?;

    let existing = store.find_one(id).await?;
    let changes = edit.merge(existing.as_ref());
    if store.update_one(id, changes).await? {
        info!(%id, "todo edited");
    } else {
        debug!(%id, "edit matched no todo");
    }

    let updated = store.find_one(id).await?;
    Ok(Json(updated))
}

pub async fn delete_todo(
    State(store): State<SharedStore>,
    id: Option<Path<String>>,
) -> Result<Json<Value>, ApiError> {
    let id = ValidationError::check_id(id.as_ref().map(|Path(id)| id.as_str()))?;

    let removed = store.delete_one(id).await?;
    debug!(%id, removed, "delete handled");

    Ok(Json(json!({ "message": DELETED_MESSAGE })))
}

/// Decodes an edit body. A body that is blank or not declared as JSON carries
/// no changes; a JSON body that does not fit [`EditTodoTask`] is rejected.
fn edit_from_body(headers: &HeaderMap, body: &Bytes) -> Result<EditTodoTask, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) || !has_json_content_type(headers) {
        return Ok(EditTodoTask::default());
    }
    let Json(edit) = Json::<EditTodoTask>::from_bytes(body).map_err(ApiError::InvalidPayload)?;
    Ok(edit)
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(essence) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
    else {
        return false;
    };

    let essence = essence.trim().to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}
