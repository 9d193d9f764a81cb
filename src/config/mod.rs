// src/config/mod.rs

pub mod scan_config;
