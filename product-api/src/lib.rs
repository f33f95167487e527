//! Product CRUD REST API.
//!
//! Exposes `/api/products` (list/get/create/update/toggle/delete) backed by a
//! relational store, with declarative request validation and a generated
//! OpenAPI document served at `/docs`.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod server;
pub mod store;
pub mod validation;
