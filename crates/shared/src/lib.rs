pub mod domain;
pub mod protocol;
pub mod schema;

#[cfg(test)]
#[path = "tests/shared_tests.rs"]
mod tests;
