// src/integer_math/mod.rs

pub mod primality;
pub mod prime_gen;
