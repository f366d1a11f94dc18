//! Red-black tree ordered collection for Rust.
//!
//! This crate provides [`RBTree`], an ordered collection backed by a classic
//! red-black tree with a shared sentinel node. Unlike `BTreeSet`, duplicate
//! keys are accepted and kept; the ordering can be the natural [`Ord`] order
//! or a comparator supplied at construction.
//!
//! # Example
//!
//! ```
//! use garnet_tree::RBTree;
//!
//! let mut tree = RBTree::new();
//! tree.insert(34);
//! tree.insert(51);
//! tree.insert(23);
//!
//! assert!(tree.contains(&51));
//! assert_eq!(tree.len(), 3);
//!
//! // Keys come back in ascending order.
//! let sorted: Vec<_> = tree.iter().copied().collect();
//! assert_eq!(sorted, [23, 34, 51]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **O(log n) worst case** - Search, insert and remove are bounded by the
//!   red-black height guarantee, not amortized
//! - **Duplicates allowed** - `insert` always succeeds; equal keys are kept
//!   and yielded in insertion-path order
//! - **Custom orderings** - [`RBTree::with_comparator`] orders keys by any
//!   comparison function
//!
//! # Implementation
//!
//! Nodes live in an index-addressed arena and reference each other through
//! copyable handles, so rotations and splices are plain index reassignments.
//! A single keyless Black sentinel occupies the first arena slot and stands in
//! for every missing child and the root's parent, which lets the fix-up
//! routines read `color` and `parent` unconditionally.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod raw;

pub mod rbtree;

pub use rbtree::RBTree;
