//! spritemask-test - Regression test framework for spritemask
//!
//! Golden-file regression harness supporting three modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison (visual inspection)
//!
//! Synthetic image builders ([`make_disk_image`], [`add_salt_and_pepper`],
//! [`make_random_blob`]) provide deterministic inputs; the only shipped
//! fixture is `tests/data/images/sprite.png`.
//!
//! # Usage
//!
//! ```ignore
//! use spritemask_test::RegParams;
//!
//! let mut rp = RegParams::new("binmorph");
//! rp.compare_values(1260.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;
mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
pub use synth::{SimpleRng, add_salt_and_pepper, make_disk_image, make_random_blob};

/// Load a test image from the test data directory
pub fn load_test_image(name: &str) -> TestResult<spritemask_core::Pix> {
    let path = test_data_path(name);
    spritemask_io::read_image(&path).map_err(|e| TestError::ImageLoad {
        path: path.clone(),
        message: e.to_string(),
    })
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // spritemask-test is at crates/spritemask-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to a test data file
pub fn test_data_path(name: &str) -> String {
    format!("{}/tests/data/images/{}", workspace_root(), name)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
