//! CLI command implementations.
//!
//! Each command is implemented in its own submodule and drives a
//! GridSession for all grid operations.

mod defaults;
mod generate;
pub mod replay;
pub mod shared;

pub use defaults::defaults;
pub use generate::generate;
pub use replay::{replay, ReplayOptions};
pub use shared::CodeOutput;
