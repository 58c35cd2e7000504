//! Integration tests for annot

mod cli_test;
mod helpers;
mod session_test;
