// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Logging helpers.
//!
//! The crate logs through the [`log`] facade; messages carry a bracketed
//! component tag (`[manager]`, `[xml]`, ...). Install any `log` backend
//! (e.g. `env_logger`) to see them.
//!
//! [`trace_fn!`](crate::trace_fn) marks entry into the expensive walks
//! (structure building, document decode). It compiles to nothing unless the
//! `trace` feature is enabled.

/// Function entry trace marker.
///
/// Logs `[ENTER:FNC] function_name` at trace level.
/// Only active when the `trace` feature is enabled.
///
/// # Example
/// ```ignore
/// fn build_structure(manager: &ElementManager, ty: &TypeHandle) -> Result<...> {
///     trace_fn!("build_structure");
///     // ...
/// }
/// ```
#[macro_export]
#[cfg(feature = "trace")]
macro_rules! trace_fn {
    ($fn_name:expr) => {
        log::trace!("[ENTER:FNC] {}", $fn_name);
    };
}

/// No-op trace macro (when trace feature disabled).
#[macro_export]
#[cfg(not(feature = "trace"))]
macro_rules! trace_fn {
    ($fn_name:expr) => {};
}
