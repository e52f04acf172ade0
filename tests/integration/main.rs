#[path = "../common/mod.rs"]
mod common;

mod coefficient_tests;
