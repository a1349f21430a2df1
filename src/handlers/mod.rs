// src/handlers/mod.rs

pub mod auth;
pub mod categories;
pub mod questions;
