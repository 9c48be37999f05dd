//! imageflow build planning
//!
//! This crate decides whether an image needs a new build and generates the
//! next Build resource for it. Persisting the generated build and bumping the
//! image's build counter is left to the caller.

pub mod decision;
pub mod generator;

pub use decision::{BuildReason, build_needed, build_reason};
pub use generator::{MAX_GENERATE_NAME_LEN, create_build, generate_build_name, next_build_number};
