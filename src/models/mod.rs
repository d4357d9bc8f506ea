pub mod response;
pub mod todo;
pub mod user;

pub use response::ApiResponse;
pub use todo::{CreateTodoRequest, EditTodoRequest, Todo};
pub use user::{SearchQuery, User};
