use camino::{Utf8Path, Utf8PathBuf};
use eclipse_predictor::catalog::merge::build_catalog;
use tempfile::TempDir;

pub const GCVS_SAMPLE: &str = "tests/data/gcvs_sample.txt";
pub const KRAKOW_SAMPLE: &str = "tests/data/krakow_sample.txt";

/// Build the sample eclipsing catalog inside `dir` and return its path.
pub fn build_sample_catalog(dir: &TempDir) -> Utf8PathBuf {
    let data_dir = Utf8Path::from_path(dir.path()).unwrap();
    let output = data_dir.join("eclipsingVariableStarData.json");
    build_catalog(
        Utf8Path::new(GCVS_SAMPLE),
        Utf8Path::new(KRAKOW_SAMPLE),
        &output,
    )
    .unwrap();
    output
}
