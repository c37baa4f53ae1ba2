#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Per-bucket collision chains.
///
/// This module provides the `Chain` contract the table relies on, along with
/// a vector-backed and a singly-linked implementation.
pub mod chain;

/// Table construction parameters and their validation errors.
pub mod config;

/// The chained-bucket hash table.
pub mod hash_table;

/// Key hashing strategies.
pub mod hasher;

pub use chain::Chain;
pub use chain::LinkedChain;
pub use chain::VecChain;
pub use config::ConfigError;
pub use config::TableConfig;
pub use hash_table::HashTable;
pub use hasher::CharCodeSum;
pub use hasher::KeyHasher;
