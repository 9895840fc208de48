use std::error::Error;
use std::fs;

use overlap::{Aligner, OverlapConfig, Side};
use tracing_subscriber::EnvFilter;

const SOURCE: &str = "The committee met on Tuesday to review the budget.\n\n\
The proposal to expand the library was approved after a long debate.";
const SUMMARY: &str = "On Tuesday the committee met. The proposal to expand the library was approved.";

/// `overlap [A.txt B.txt [config.yaml]]`: print the alignment of two files as
/// JSON, or of a built-in sample when no files are given.
fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (a, b) = match args.as_slice() {
        [] => (SOURCE.to_string(), SUMMARY.to_string()),
        [a, b, ..] => (fs::read_to_string(a)?, fs::read_to_string(b)?),
        [_] => return Err("expected two input files".into()),
    };
    let config = match args.get(2) {
        Some(path) => OverlapConfig::from_file(path)?,
        None => OverlapConfig::default(),
    };

    let aligner = Aligner::new(config.to_options())?;
    let result = aligner.align(&a, &b)?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    for side in [Side::A, Side::B] {
        let stats = result.stats(side);
        eprintln!(
            "side {side:?}: {}/{} words matched ({:.1}%)",
            stats.matched_words,
            stats.num_words,
            stats.percent_overlap * 100.0
        );
    }
    eprintln!("length ratio B/A: {:.2}", result.length_ratio());
    Ok(())
}
