//! Session token infrastructure

pub mod jwt;

pub use jwt::{JwtClaims, JwtConfig, JwtService, TokenIssuer};
