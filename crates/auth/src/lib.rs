//! Mock session handling for the MedAI portal
//!
//! There is no identity provider: login and signup validate their input and
//! then fabricate a session. The `SessionStore` is the only holder of the
//! current user and is passed explicitly to whoever needs it.

mod requests;
mod store;
mod types;

pub use requests::{login, logout, signup, LoginRequest, SignupRequest};
pub use store::SessionStore;
pub use types::{Session, SessionUser};
