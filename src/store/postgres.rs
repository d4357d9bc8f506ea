use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::Store;
use crate::error::AppError;
use crate::models::{Todo, User};

const USER_COLUMNS: &str = "id, name, email, password_hash, created_at";
const TODO_COLUMNS: &str = "id, title, user_id, created_at, updated_at";

/// PostgreSQL-backed store. The schema lives in `migrations/`.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` and applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: User) -> Result<User, AppError> {
        // The UNIQUE index on email turns a duplicate into AppError::BadRequest.
        let sql = format!(
            "INSERT INTO users (id, name, email, password_hash, created_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            USER_COLUMNS
        );
        let inserted = sqlx::query_as::<_, User>(&sql)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(inserted)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_user_by_name(&self, name: &str) -> Result<Option<User>, AppError> {
        let sql = format!(
            "SELECT {} FROM users WHERE name = $1 ORDER BY created_at, id LIMIT 1",
            USER_COLUMNS
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_todo(&self, todo: Todo) -> Result<Todo, AppError> {
        let sql = format!(
            "INSERT INTO todos (id, title, user_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            TODO_COLUMNS
        );
        Ok(sqlx::query_as::<_, Todo>(&sql)
            .bind(todo.id)
            .bind(&todo.title)
            .bind(todo.user_id)
            .bind(todo.created_at)
            .bind(todo.updated_at)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn find_todo(&self, id: Uuid) -> Result<Option<Todo>, AppError> {
        let sql = format!("SELECT {} FROM todos WHERE id = $1", TODO_COLUMNS);
        Ok(sqlx::query_as::<_, Todo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn update_todo_title(
        &self,
        id: Uuid,
        user_id: Uuid,
        title: &str,
    ) -> Result<Option<Todo>, AppError> {
        let sql = format!(
            "UPDATE todos SET title = $1, updated_at = NOW() \
             WHERE id = $2 AND user_id = $3 RETURNING {}",
            TODO_COLUMNS
        );
        Ok(sqlx::query_as::<_, Todo>(&sql)
            .bind(title)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn todos_for_user(&self, user_id: Uuid) -> Result<Vec<Todo>, AppError> {
        let sql = format!(
            "SELECT {} FROM todos WHERE user_id = $1 ORDER BY created_at, id",
            TODO_COLUMNS
        );
        Ok(sqlx::query_as::<_, Todo>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn delete_todo(&self, id: Uuid, user_id: Uuid) -> Result<Option<Todo>, AppError> {
        let sql = format!(
            "DELETE FROM todos WHERE id = $1 AND user_id = $2 RETURNING {}",
            TODO_COLUMNS
        );
        Ok(sqlx::query_as::<_, Todo>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn connect() -> PgStore {
        dotenv::dotenv().ok();
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set");
        PgStore::connect(&url).await.expect("Failed to connect to test DB")
    }

    async fn cleanup(store: &PgStore, email: &str) {
        let _ = sqlx::query("DELETE FROM users WHERE email = $1")
            .bind(email)
            .execute(store.pool())
            .await;
    }

    #[ignore]
    #[actix_rt::test]
    async fn test_pg_user_and_todo_lifecycle() {
        let store = connect().await;
        let email = "pg_store_lifecycle@example.com";
        cleanup(&store, email).await;

        let user = store
            .insert_user(User::new("PgAli".into(), email.into(), "hash".into()))
            .await
            .unwrap();
        let dup = store
            .insert_user(User::new("PgAli".into(), email.into(), "hash".into()))
            .await
            .unwrap_err();
        assert!(matches!(dup, AppError::BadRequest(_)));

        let todo = store
            .insert_todo(Todo::new("Test Todo".into(), user.id))
            .await
            .unwrap();
        let updated = store
            .update_todo_title(todo.id, user.id, "Updated Todo")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Updated Todo");

        let todos = store.todos_for_user(user.id).await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, todo.id);

        assert!(store.delete_todo(todo.id, user.id).await.unwrap().is_some());
        cleanup(&store, email).await;
    }
}
