//! Service layer: validated input in, one SQL statement per operation,
//! domain models out. Each service borrows the connection of the current
//! unit of work and holds nothing else.

pub mod comments;
pub mod posts;
pub mod users;

pub use comments::CommentService;
pub use posts::PostService;
pub use users::UserService;

use uuid::Uuid;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}
