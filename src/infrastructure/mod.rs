//! Infrastructure layer: hashing, tokens, storage backends and services

pub mod auth;
pub mod item;
pub mod logging;
pub mod user;
