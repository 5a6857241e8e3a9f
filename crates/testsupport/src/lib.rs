pub mod requests;

pub use requests::*;

/// Install a fmt subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
