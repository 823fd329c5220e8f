// src/types/mod.rs

pub mod good;
pub mod offer;

pub use good::{Good, GoodMap};
pub use offer::Offer;
