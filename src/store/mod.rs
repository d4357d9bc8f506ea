//! Persistence seam for users and todos.
//!
//! Handlers only see `web::Data<dyn Store>`. `PgStore` backs production deployments and
//! `MemoryStore` is used when no database is configured and by the test suites.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Todo, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    /// Persists a new user. Fails with `AppError::BadRequest` if the email is taken.
    async fn insert_user(&self, user: User) -> Result<User, AppError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Exact match on `name`. The oldest user wins when several share a name.
    async fn find_user_by_name(&self, name: &str) -> Result<Option<User>, AppError>;

    async fn insert_todo(&self, todo: Todo) -> Result<Todo, AppError>;

    async fn find_todo(&self, id: Uuid) -> Result<Option<Todo>, AppError>;

    /// Sets the title of a todo owned by `user_id`. `None` if there is no such todo.
    async fn update_todo_title(
        &self,
        id: Uuid,
        user_id: Uuid,
        title: &str,
    ) -> Result<Option<Todo>, AppError>;

    /// All todos owned by `user_id`, oldest first.
    async fn todos_for_user(&self, user_id: Uuid) -> Result<Vec<Todo>, AppError>;

    /// Removes a todo owned by `user_id` and returns it.
    async fn delete_todo(&self, id: Uuid, user_id: Uuid) -> Result<Option<Todo>, AppError>;
}

pub(crate) fn email_taken() -> AppError {
    AppError::BadRequest("Email already registered".into())
}
