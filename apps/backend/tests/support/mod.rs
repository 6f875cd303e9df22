#![allow(dead_code)]

pub mod app_builder;
pub mod state;

pub use app_builder::create_test_app;
pub use state::{count_of, participant_row, sqlite_state};
