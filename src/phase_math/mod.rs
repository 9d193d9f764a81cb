// src/phase_math/mod.rs

pub mod precision;
pub mod theta;
