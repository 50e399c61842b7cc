// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod model;
pub mod storage;

pub use model::{ParsedTask, Priority, parse_task, parse_task_on};
