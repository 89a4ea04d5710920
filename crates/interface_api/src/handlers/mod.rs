//! HTTP request handlers

pub mod health;
pub mod category;
pub mod product;
