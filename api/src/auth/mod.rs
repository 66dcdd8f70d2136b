//! Authentication
//!
//! Bearer JWT verification and the middleware guarding `/api` routes.

pub mod jwt;

pub use jwt::{auth_middleware, JwtVerifier};
