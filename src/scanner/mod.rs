// src/scanner/mod.rs

pub mod cert;
pub mod report;
