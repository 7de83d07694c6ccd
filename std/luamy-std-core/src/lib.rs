//!
//! luamy-std-core - Core Host-Facing Types
//!
//! This crate provides the fundamental types shared across all luamy standard library crates:
//!
//! - `DynamicValue`, the tagged union (integer | float | bytes | absent)
//!   every native value is converted into before it reaches Lua
//! - `Row`, an ordered composite that exposes each column under both its
//!   name and its 1-based ordinal position
//! - `parse_int_prefix` / `parse_float_prefix`, lenient numeric parsing with
//!   the semantics of C's `strtoll` / `strtod`
//! - `BindingError` and the exception type IDs surfaced to scripts
//!

pub mod value;
pub mod numeric;
pub mod exception;

pub use value::*;
pub use numeric::*;
pub use exception::*;
