use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A todo item owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier for the todo (UUID v4).
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    /// Owner of the todo. Set on creation and never changed.
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    pub fn new(title: String, user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of `POST /todo`.
///
/// `title` is optional at the serde level so that a missing title is reported with the
/// service's own message instead of a deserializer error.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateTodoRequest {
    #[validate(length(max = 200))]
    pub title: Option<String>,
}

/// Body of `PATCH /todo/{id}`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditTodoRequest {
    #[validate(length(max = 200))]
    pub title: Option<String>,
}

/// Returns the title if it is present and not blank.
pub fn provided_title(title: Option<&str>) -> Option<&str> {
    title.filter(|t| !t.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_creation() {
        let user_id = Uuid::new_v4();
        let todo = Todo::new("Test Todo".to_string(), user_id);

        assert_eq!(todo.title, "Test Todo");
        assert_eq!(todo.user_id, user_id);
        assert_eq!(todo.created_at, todo.updated_at);
    }

    #[test]
    fn test_todo_serializes_mongo_style_keys() {
        let todo = Todo::new("Test Todo".to_string(), Uuid::new_v4());
        let json = serde_json::to_value(&todo).unwrap();

        assert_eq!(json["_id"], todo.id.to_string());
        assert_eq!(json["userId"], todo.user_id.to_string());
        assert_eq!(json["title"], "Test Todo");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_edit_request_accepts_empty_body() {
        let req: EditTodoRequest = serde_json::from_str("{}").unwrap();
        assert!(req.title.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_title_length_validation() {
        let long = CreateTodoRequest {
            title: Some("a".repeat(201)),
        };
        assert!(long.validate().is_err());

        let ok = EditTodoRequest {
            title: Some("a".repeat(200)),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_provided_title() {
        assert_eq!(provided_title(Some("Updated Todo")), Some("Updated Todo"));
        assert_eq!(provided_title(Some("   ")), None);
        assert_eq!(provided_title(None), None);
    }
}
