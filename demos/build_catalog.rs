use std::env;
use std::process::ExitCode;

use camino::Utf8Path;
use eclipse_predictor::catalog::merge::build_catalog;

/// Build the JSON eclipsing catalog from the GCVS catalogue and the Krakow ephemerides.
///
/// Usage
/// -----------------
/// `cargo run --example build_catalog -- <gcvs5.txt> <krakow.txt> <output.json>`
fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let [gcvs, krakow, output] = args.as_slice() else {
        eprintln!("usage: build_catalog <gcvs file> <krakow file> <output json>");
        return ExitCode::FAILURE;
    };

    match build_catalog(
        Utf8Path::new(gcvs),
        Utf8Path::new(krakow),
        Utf8Path::new(output),
    ) {
        Ok(count) => {
            println!("wrote {count} entries to {output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("catalog build failed: {err}");
            ExitCode::FAILURE
        }
    }
}
