pub mod backend;
pub mod booking;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod feedback;
pub mod retry;
pub mod session;
pub mod token;
pub mod user;

pub use backend::{BookingBackend, IdentityBackend};
pub use client::ApiClient;
pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use feedback::{classify, Feedback};
pub use retry::RetryPolicy;
pub use session::{Session, SessionProvider};
pub use token::{FileTokenStore, MemoryTokenStore, StorageError, TokenStore};
pub use user::RegisterRequest;
