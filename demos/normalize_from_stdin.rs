//! Reads one URI per line from stdin and prints its normalized form.
//!
//! An optional argument selects the mode (`standard` or `safe-browsing`).
//! Set `RUST_LOG=uri_canon=trace` to see each normalization.

use std::{env, io};
use tracing_subscriber::EnvFilter;
use uri_canon::{Mode, NormalizationConfig, Normalizer};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mode = match env::args().nth(1).map(|arg| arg.parse::<Mode>()) {
        Some(Ok(mode)) => mode,
        Some(Err(e)) => {
            eprintln!("Error: {e}");
            return;
        }
        None => Mode::Standard,
    };

    let mut normalizer = Normalizer::new(None, NormalizationConfig::new().mode(mode));
    for line in io::stdin().lines() {
        let line = line.expect("failed to read line");
        match normalizer.try_set_url(&line) {
            Ok(()) => println!("{}", normalizer.normalize()),
            Err(e) => println!("Error: {e}"),
        }
    }
}
