//! AJAX echo endpoint used by the spinner widget.

use axum::extract::Path;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::error::{ErrorResponse, RelayError};

/// Echo of a task measurement.
#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct TaskSuccesses {
    /// Task name as given in the path.
    pub task: String,
    /// Success count.
    pub successes: u64,
}

/// `GET /task/{task}/successes/{n}` — Echo a task measurement as JSON.
///
/// # Errors
///
/// Returns [`RelayError::InvalidRequest`] if `n` is not a non-negative
/// integer.
#[utoipa::path(
    get,
    path = "/task/{task}/successes/{n}",
    tag = "Pages",
    summary = "Echo task successes",
    description = "Returns the task name and success count unchanged.",
    params(
        ("task" = String, Path, description = "Task name"),
        ("n" = u64, Path, description = "Number of successes"),
    ),
    responses(
        (status = 200, description = "Echoed measurement", body = TaskSuccesses),
        (status = 400, description = "Count is not an integer", body = ErrorResponse),
    )
)]
pub async fn task_successes_handler(
    Path((task, n)): Path<(String, String)>,
) -> Result<Json<TaskSuccesses>, RelayError> {
    let successes = n.parse::<u64>().map_err(|_| {
        RelayError::InvalidRequest(format!("successes must be an integer, got {n}"))
    })?;
    Ok(Json(TaskSuccesses { task, successes }))
}

/// Task routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new().route("/task/{task}/successes/{n}", get(task_successes_handler))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echoes_task_and_count() {
        let result =
            task_successes_handler(Path(("upperHub".to_string(), "3".to_string()))).await;
        assert!(matches!(
            result,
            Ok(Json(TaskSuccesses { ref task, successes: 3 })) if task == "upperHub"
        ));
    }

    #[tokio::test]
    async fn rejects_non_integer_count() {
        let result =
            task_successes_handler(Path(("lowerHub".to_string(), "-1".to_string()))).await;
        assert!(matches!(result, Err(RelayError::InvalidRequest(_))));
    }
}
