//! Authentication: register, login, logout, token verification.

mod handlers;
mod jwt;
mod password;
mod service;

pub use handlers::{login, logout, register};
pub use jwt::{Claims, JwtCodec};
pub use service::AuthService;
