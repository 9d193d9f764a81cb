// src/factor/mod.rs

pub mod factor_pair;
