// src/lib.rs

pub mod coil;
pub mod config;
pub mod error;
pub mod field;
pub mod field_map;
pub mod filter;
pub mod grid;
pub mod visualisation;
