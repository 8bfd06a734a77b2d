//! # Domain Models
//!
//! Pure data types shared by every crate in the workspace: the academic hierarchy served by
//! `/api/options`, the request/response bodies of the registration API and the client
//! configuration tree. Keep it lean: no I/O, networking, or heavy logic, just data and
//! simple lookups.

pub mod api;
pub mod config;
pub mod constants;
pub mod hierarchy;
