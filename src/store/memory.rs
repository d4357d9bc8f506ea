use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{email_taken, Store};
use crate::error::AppError;
use crate::models::{Todo, User};

/// In-process store. Rows are kept in insertion order, which doubles as creation order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    todos: RwLock<Vec<Todo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: User) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(email_taken());
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_name(&self, name: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.name == name).cloned())
    }

    async fn insert_todo(&self, todo: Todo) -> Result<Todo, AppError> {
        self.todos.write().await.push(todo.clone());
        Ok(todo)
    }

    async fn find_todo(&self, id: Uuid) -> Result<Option<Todo>, AppError> {
        let todos = self.todos.read().await;
        Ok(todos.iter().find(|t| t.id == id).cloned())
    }

    async fn update_todo_title(
        &self,
        id: Uuid,
        user_id: Uuid,
        title: &str,
    ) -> Result<Option<Todo>, AppError> {
        let mut todos = self.todos.write().await;
        Ok(todos
            .iter_mut()
            .find(|t| t.id == id && t.user_id == user_id)
            .map(|todo| {
                todo.title = title.to_string();
                todo.updated_at = Utc::now();
                todo.clone()
            }))
    }

    async fn todos_for_user(&self, user_id: Uuid) -> Result<Vec<Todo>, AppError> {
        let todos = self.todos.read().await;
        Ok(todos
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_todo(&self, id: Uuid, user_id: Uuid) -> Result<Option<Todo>, AppError> {
        let mut todos = self.todos.write().await;
        let position = todos
            .iter()
            .position(|t| t.id == id && t.user_id == user_id);
        Ok(position.map(|idx| todos.remove(idx)))
    }
}
