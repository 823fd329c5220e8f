// src/pricing/mod.rs

// End-of-round price updates driven by what each agent managed to sell.
pub mod adaptation;

pub use adaptation::PriceAdaptation;
