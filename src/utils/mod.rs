// src/utils/mod.rs

pub mod gate;
pub mod hash;
pub mod json;
pub mod jwt;
