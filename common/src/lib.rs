pub mod access_rules;
pub mod auth;
pub mod constants;
pub mod context;
pub mod entities;
pub mod error;
pub mod repository;
