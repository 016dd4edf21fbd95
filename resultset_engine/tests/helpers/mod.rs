pub mod env;
pub mod fixtures;

#[allow(unused_imports)]
pub use env::{get_test_dsn, init_test_logging, should_run_e2e_tests};
#[allow(unused_imports)]
pub use fixtures::{people_batch, text_batch, MockDriver};
