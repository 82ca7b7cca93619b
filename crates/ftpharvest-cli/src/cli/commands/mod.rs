//! CLI command handlers, one file per command.

mod completions;
mod index;
mod plan;
mod run;

pub use completions::run_completions;
pub use index::run_index;
pub use plan::run_plan;
pub use run::run_harvest;
