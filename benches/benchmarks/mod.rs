#![allow(clippy::explicit_counter_loop)]

pub mod common;
pub mod get;
pub mod lru_put;
pub mod stampede;
