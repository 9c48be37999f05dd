//! imageflow core
//!
//! イメージビルドを管理するためのリソースモデル（Image / Builder / Build）と、
//! それらを記述する `imageflow.kdl` のパーサーを提供します。

pub mod discovery;
pub mod error;
pub mod model;
pub mod parser;

pub use discovery::*;
pub use error::{FlowError, Result};
pub use model::*;
pub use parser::*;
