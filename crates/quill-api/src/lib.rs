pub mod auth;
pub mod comments;
pub mod config;
pub mod error;
pub mod extract;
pub mod health;
pub mod posts;
pub mod router;
pub mod services;
pub mod state;
pub mod users;
pub mod validation;

pub use config::Config;
pub use error::{ApiError, ServiceError};
pub use router::router;
pub use state::{AppState, AppStateInner};
