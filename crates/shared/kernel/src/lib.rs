//! Kernel utilities shared across slices.
//! Keep this crate lightweight; today it owns layered configuration loading.
//!
//! ## Config loading (non-wasm)
//! ```rust,no_run
//! use hustler_kernel::config::load_config;
//! use hustler_kernel::domain::config::ClientConfig;
//!
//! let cfg: ClientConfig = load_config(None::<&str>).unwrap_or_default();
//! ```
#[cfg(not(target_arch = "wasm32"))]
pub mod config;

pub use hustler_domain as domain;
