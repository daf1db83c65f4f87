//! Authentication
//!
//! Password/token primitives and the session middleware.

pub mod credentials;
pub mod session;

pub use credentials::{generate_session_token, hash_password, hash_session_token, verify_password};
pub use session::{
    clear_session_cookie, optional_session, require_session, session_cookie, CurrentUser,
    LOGIN_PATH,
};
