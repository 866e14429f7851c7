//! `hyperminhash` implements the [HyperMinHash][paper] sketch: approximate
//! distinct counting in 32 KiB of fixed state, with union, intersection
//! and Jaccard similarity estimation between sketches.
//!
//! ```
//! use hyperminhash::Sketch;
//!
//! let mut a = Sketch::new();
//! let mut b = Sketch::new();
//! for i in 0..1000u64 {
//!     a.add_bytes(format!("item-{}", i).as_bytes());
//!     b.add_bytes(format!("item-{}", i + 500).as_bytes());
//! }
//! assert!((a.cardinality() - 1000.0).abs() < 50.0);
//! let common = a.intersection(&b);
//! assert!(common > 400.0 && common < 600.0);
//! ```
//!
//! [paper]: https://arxiv.org/abs/1710.08436

mod codec;
mod entry;
mod error;
mod estimator;
mod hash;
mod registers;
mod sketch;
mod stream;
mod value;

pub use entry::{Entry, EMPTY_DIGEST};
pub use error::HyperMinHashError;
pub use sketch::Sketch;
pub use stream::DEFAULT_CHUNK_SIZE;
pub use value::Value;
