//! `cel-filter` command-line entry point.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use cel_filter_lib::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Writes to the process stdout/stderr and exits the process for real.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args())
}
