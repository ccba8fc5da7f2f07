pub mod domain;
pub mod error;
pub mod format;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
