// src/market/mod.rs

//! Peer exchange marketplace.
//!
//! CRUD over a single SQLite table of listings (items, skills and services)
//! with a request/approve rental workflow, plus user registration and login.

mod db;
mod repo;

pub use db::{DB_FILE, connect};
pub use repo::MarketRepo;
