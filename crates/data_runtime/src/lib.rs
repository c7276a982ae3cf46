//! data_runtime: config schemas and loaders.
//!
//! Loaders read from the workspace `data/` directory and fall back to
//! hardcoded defaults so tests and tools run without a data checkout.

#![forbid(unsafe_code)]

pub mod configs {
    pub mod bombs;
    pub mod combat;
    pub mod telemetry;
}
