use crate::{
    auth::AuthenticatedUserId,
    error::AppError,
    models::{todo::provided_title, ApiResponse, CreateTodoRequest, EditTodoRequest, Todo},
    store::Store,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

fn todo_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("There is no todo with id: {}", id))
}

/// Parses a path id. Malformed ids are reported exactly like missing todos.
fn parse_todo_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| todo_not_found(raw))
}

/// Creates a new todo for the authenticated user.
///
/// ## Request Body:
/// - `title`: required, at most 200 characters.
///
/// ## Responses:
/// - `201 Created`: `{ "data": Todo }` with `userId` set to the caller.
/// - `400 Bad Request`: `title` missing or blank.
/// - `401 Unauthorized`: bad token, or the token's user no longer exists.
/// - `422 Unprocessable Entity`: title too long.
#[post("")]
pub async fn create_todo(
    store: web::Data<dyn Store>,
    user_id: AuthenticatedUserId,
    todo_data: Option<web::Json<CreateTodoRequest>>,
) -> Result<impl Responder, AppError> {
    let todo_data = todo_data.map(web::Json::into_inner).unwrap_or_default();
    let title = provided_title(todo_data.title.as_deref())
        .ok_or_else(|| AppError::BadRequest("must provide title to create todo".into()))?
        .to_string();
    todo_data.validate()?;

    if store.find_user_by_id(user_id.0).await?.is_none() {
        return Err(AppError::Unauthorized("Token user no longer exists".into()));
    }

    let todo = store.insert_todo(Todo::new(title, user_id.0)).await?;
    log::debug!("User {} created todo {}", user_id.0, todo.id);
    Ok(HttpResponse::Created().json(ApiResponse::data(todo)))
}

/// Lists every todo owned by the authenticated user, oldest first.
///
/// A user without todos gets `200 OK` with only a `message`, never a `data` key.
#[get("/user")]
pub async fn get_user_todos(
    store: web::Data<dyn Store>,
    user_id: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let todos = store.todos_for_user(user_id.0).await?;

    if todos.is_empty() {
        return Ok(HttpResponse::Ok().json(ApiResponse::<Vec<Todo>>::message(format!(
            "Couldn't find any todos for {}",
            user_id.0
        ))));
    }
    Ok(HttpResponse::Ok().json(ApiResponse::data(todos)))
}

/// Retrieves one of the caller's todos.
///
/// Todos owned by someone else are reported as `404 Not Found`.
#[get("/{id}")]
pub async fn get_todo(
    store: web::Data<dyn Store>,
    user_id: AuthenticatedUserId,
    todo_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = parse_todo_id(&todo_id)?;

    match store.find_todo(id).await? {
        Some(todo) if todo.user_id == user_id.0 => Ok(HttpResponse::Ok().json(ApiResponse::data(todo))),
        _ => Err(todo_not_found(&todo_id)),
    }
}

/// Changes the title of one of the caller's todos.
///
/// ## Responses:
/// - `200 OK`: `{ "data": Todo }` with the new title.
/// - `400 Bad Request`: body missing or without a non-blank `title`.
/// - `404 Not Found`: malformed id, unknown todo, or a todo owned by another user.
/// - `422 Unprocessable Entity`: title too long.
#[patch("/{id}")]
pub async fn edit_todo(
    store: web::Data<dyn Store>,
    user_id: AuthenticatedUserId,
    todo_id: web::Path<String>,
    todo_data: Option<web::Json<EditTodoRequest>>,
) -> Result<impl Responder, AppError> {
    let todo_data = todo_data.map(web::Json::into_inner).unwrap_or_default();
    let title = provided_title(todo_data.title.as_deref())
        .ok_or_else(|| AppError::BadRequest("must provide title and id to edit todo".into()))?;
    todo_data.validate()?;

    let id = parse_todo_id(&todo_id)?;
    match store.update_todo_title(id, user_id.0, title).await? {
        Some(todo) => Ok(HttpResponse::Ok().json(ApiResponse::data(todo))),
        None => Err(todo_not_found(&todo_id)),
    }
}

/// Deletes one of the caller's todos and returns it.
#[delete("/{id}")]
pub async fn delete_todo(
    store: web::Data<dyn Store>,
    user_id: AuthenticatedUserId,
    todo_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = parse_todo_id(&todo_id)?;

    match store.delete_todo(id, user_id.0).await? {
        Some(todo) => {
            log::debug!("User {} deleted todo {}", user_id.0, todo.id);
            Ok(HttpResponse::Ok().json(ApiResponse::data(todo)))
        }
        None => Err(todo_not_found(&todo_id)),
    }
}
