// src/search/mod.rs

pub mod cancellation;
pub mod controller;
pub mod params;
