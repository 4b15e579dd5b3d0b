//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `moviecat_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // A tiny probe keeps core crate wiring verifiable without standing up
    // any transport layer.
    println!("moviecat_core ping={}", moviecat_core::ping());
    println!("moviecat_core version={}", moviecat_core::core_version());
}
