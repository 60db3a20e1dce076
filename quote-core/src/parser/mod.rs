//! Project file parser module.

mod project;

pub use project::{load_project_file, parse_project_str};
