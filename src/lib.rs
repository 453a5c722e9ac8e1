// src/lib.rs

//! campus-sync Library

pub mod error;
pub mod geo;
pub mod market;
pub mod models;
pub mod schedule;
pub mod services;
pub mod storage;
pub mod utils;
