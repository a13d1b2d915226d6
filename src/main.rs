//Enable more cargo lint tests
#![warn(rust_2018_idioms)]

use std::process::ExitCode;

use huff::tools::cli::{huffopts_init, run_jobs};

use log::{error, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> ExitCode {
    let options = huffopts_init();

    // Available log levels are Error, Warn, Info, Debug, Trace
    if let Err(e) = TermLogger::init(
        options.verbose.level_filter(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Could not start the logger: {}", e);
    }
    info!("huff, a huffman file compressor. Rust version {}", VERSION);

    //----- Run every job, even after one fails
    let failures = run_jobs(&options);
    if failures > 0 {
        error!("{} of {} jobs failed", failures, options.jobs.len());
    }

    info!("Done.");
    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
