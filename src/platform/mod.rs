//! Platform abstraction layer
//!
//! Hosts for the particle lifecycle:
//! - `headless`: in-memory sink used by the native run and the tests
//! - `dom`: browser containers, reveal observers, parallax (wasm only)

pub mod headless;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use headless::HeadlessSink;
