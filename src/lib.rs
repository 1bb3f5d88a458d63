pub mod acquisition;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod models;
pub mod session;
pub mod storage;

#[cfg(test)]
pub mod test_utils;
