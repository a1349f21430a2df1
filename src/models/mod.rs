// src/models/mod.rs

pub mod admin;
pub mod category;
pub mod filter;
pub mod question;
