// src/lib.rs

pub mod config;
pub mod error;
pub mod factor;
pub mod integer_math;
pub mod phase_math;
pub mod scanner;
pub mod search;
