pub mod codepoint;
pub mod file_utils;
pub mod hash_utils;
