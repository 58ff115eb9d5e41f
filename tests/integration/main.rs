//! Integration tests for castsvg

mod cli_test;
mod helpers;
mod template_test;
mod validate_test;
