//! # jsonbranch_path
//!
//! N-gram key paths for jsonbranch.
//!
//! A path lists object keys from the root down, joined by a delimiter:
//! `K0[.K1[.K2[...]]]`. A key to the right of the delimiter is a direct child
//! of the key to its left. Keys that contain the delimiter cannot be
//! expressed, and no escaping is supported.
//!
//! ## Example
//!
//! ```rust
//! use jsonbranch_path::{PathDelimiter, PathSpec};
//!
//! let path = PathSpec::parse("user.profile.name").unwrap();
//! assert_eq!(path.segments(), ["user", "profile", "name"]);
//!
//! let slashed = PathSpec::parse_with("user/profile", PathDelimiter::Slash).unwrap();
//! assert_eq!(slashed.len(), 2);
//! ```

mod delimiter;
mod error;
mod spec;

pub use delimiter::PathDelimiter;
pub use error::PathError;
pub use spec::PathSpec;
