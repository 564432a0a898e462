//! Authentication and authorization
//!
//! Sessions are issued elsewhere; this server only validates bearer JWTs and
//! answers permission questions:
//! - [`JwtService`] - token validation (and issuance, for tooling and tests)
//! - [`CurrentUser`] - authenticated user context
//! - [`require_auth`] - authentication middleware
//! - [`require_permission`] - permission middleware

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod permissions;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_permission};
