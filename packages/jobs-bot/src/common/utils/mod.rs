pub mod json_file;

pub use json_file::{read_json, write_json_atomic};
