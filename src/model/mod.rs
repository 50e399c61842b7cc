// File: ./src/model/mod.rs
pub mod dates;
pub mod display;
pub mod item;
pub mod keywords;
pub mod parser;
pub mod roles;

pub use display::TaskDisplay;
pub use item::{ParsedTask, Priority, SELF_OWNER};
pub use parser::{parse_batch, parse_task, parse_task_on, parse_task_with};
pub use roles::NameMatchers;
