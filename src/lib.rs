//! An arena-backed red-black tree ordered set for Rust.
//!
//! This crate provides [`OrderedSet`], a sorted collection of unique keys with O(log n) search,
//! insertion and removal. The ordering comes from a [`Comparator`] chosen when the set is built,
//! so keys do not need to implement [`Ord`].
//!
//! # Example
//!
//! ```
//! use rbtree_set::OrderedSet;
//!
//! let mut set = OrderedSet::new();
//! assert_eq!(set.insert("pear"), Ok(true));
//! assert_eq!(set.insert("apple"), Ok(true));
//! assert_eq!(set.insert("pear"), Ok(false)); // duplicates are not inserted
//!
//! assert_eq!(set.len(), 2);
//! assert_eq!(set.min(), Some(&"apple"));
//! assert!(set.contains(&"pear"));
//!
//! assert!(set.remove(&"apple"));
//! assert_eq!(set.iter().collect::<Vec<_>>(), [&"pear"]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Custom ordering** - Any `Fn(&K, &K) -> Ordering` closure can order the set
//! - **Teardown hook** - An optional [`Cleanup`] sees every remaining key when the set is dropped
//! - **Fallible growth** - Allocation failures are reported as [`Error`] instead of aborting
//! - **`tracing`** (Cargo feature) - Emits events when node storage grows
//!
//! # Implementation
//!
//! Nodes are stored in a contiguous arena of slots and refer to their parent and children by
//! slot index rather than by address. Growing the arena therefore never invalidates a link.
//! Removed nodes return to a free list and are reused by later insertions. The arena grows by
//! doubling, and the free list is a [`Stack`], which is also exported for general use.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod compare;
mod error;
mod raw;

pub mod ordered_set;
pub mod stack;

pub use compare::{Cleanup, Comparator, NoCleanup, OrdComparator};
pub use error::{Error, Result};
pub use ordered_set::OrderedSet;
pub use stack::Stack;
