#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

cfg_if::cfg_if! {
    if #[cfg(feature = "tracing")] {
        macro_rules! rebuild_event {
            ($($arg:tt)*) => {
                tracing::debug!(target: "quad_hash", $($arg)*)
            };
        }

        macro_rules! exhaustion_event {
            ($($arg:tt)*) => {
                tracing::warn!(target: "quad_hash", $($arg)*)
            };
        }
    } else {
        macro_rules! rebuild_event {
            ($($arg:tt)*) => {};
        }

        macro_rules! exhaustion_event {
            ($($arg:tt)*) => {};
        }
    }
}

pub mod digest;

mod error;

/// A key-value map over the quadratic-probing table.
///
/// This module provides a `HashMap` that wraps the `HashTable` and provides
/// a standard key-value map interface with pluggable digest providers.
pub mod hash_map;

pub mod hash_table;

pub use digest::DefaultHashProvider;
pub use digest::HashProvider;
pub use digest::Hashable;
pub use error::CursorError;
pub use hash_map::Entry;
pub use hash_map::HashMap;
pub use hash_table::HashTable;
pub use hash_table::Position;
