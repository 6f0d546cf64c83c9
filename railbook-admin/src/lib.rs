pub mod error;
pub mod gate;
pub mod resource;
pub mod screen;
pub mod validate;

pub use error::AdminError;
pub use gate::{AdminAccess, AdminGate};
pub use resource::{AdminResource, RestCollection};
pub use screen::AdminScreen;
pub use validate::Validate;
