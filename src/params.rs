use std::path::PathBuf;

use clap::Parser;

use crate::error::Error;

// ---------------------------------------------------------------------------
// Parameters struct
// ---------------------------------------------------------------------------

/// vcf2cytosure command-line parameters.
///
/// Flag names follow the original converter so existing pipelines keep working.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "vcf2cytosure",
    about = "VCF2cytosure - convert SV vcf files to cytosure",
    version
)]
pub struct Parameters {
    // ── Filtering ───────────────────────────────────────────────────────
    /// Minimum variant size
    #[arg(long = "size", default_value_t = 5000, help_heading = "Filtering")]
    pub size: u64,

    /// Maximum frequency
    #[arg(long = "frequency", default_value_t = 0.01, help_heading = "Filtering")]
    pub frequency: f64,

    /// Frequency tag of the info field
    #[arg(long = "frequency_tag", default_value = "FRQ", help_heading = "Filtering")]
    pub frequency_tag: String,

    /// Disable any filtering
    #[arg(long = "no-filter", help_heading = "Filtering")]
    pub no_filter: bool,

    // ── Input ───────────────────────────────────────────────────────────
    /// Coverage file
    #[arg(long = "coverage", help_heading = "Input")]
    pub coverage: Option<PathBuf>,

    /// VCF file
    #[arg(long = "vcf", help_heading = "Input")]
    pub vcf: PathBuf,

    /// Output file (default = the prefix of the input vcf)
    #[arg(long = "out", help_heading = "Input")]
    pub out: Option<PathBuf>,

    /// Number of consecutive coverage windows merged into one probe
    #[arg(long = "coverage-bin-size", default_value_t = 20, help_heading = "Input")]
    pub coverage_bin_size: usize,
}

impl Parameters {
    /// Output path, falling back to the VCF path with a `.cgh` extension.
    pub fn out_path(&self) -> PathBuf {
        match &self.out {
            Some(out) => out.clone(),
            None => self.vcf.with_extension("cgh"),
        }
    }

    /// Validate parameter combinations that clap alone cannot enforce.
    pub fn validate(&self) -> Result<(), Error> {
        if !(0.0..=1.0).contains(&self.frequency) {
            return Err(Error::Parameter(format!(
                "--frequency must be within [0, 1], got {}",
                self.frequency
            )));
        }

        if self.coverage_bin_size == 0 {
            return Err(Error::Parameter(
                "--coverage-bin-size must be >= 1".into(),
            ));
        }

        if self.frequency_tag.is_empty() {
            return Err(Error::Parameter("--frequency_tag must not be empty".into()));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
