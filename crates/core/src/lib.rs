//! Core cart model for cartbox
//!
//! This crate defines the shared vocabulary of the workspace:
//! - CartItem: one product line with a structurally non-zero quantity
//! - CartState: an immutable collection of cart items with pure update ops
//! - Error/Result: the canonical error type used across all crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod item;

pub use error::{Error, Result};
pub use item::{CartItem, CartState};
