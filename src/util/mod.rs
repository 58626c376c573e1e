//! Utility modules

pub mod names;
pub mod paths;

pub use names::{initials, pluralize, truncate_display};
pub use paths::{data_paths, init_data_dir, DataPaths};
