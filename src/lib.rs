pub mod config;
pub mod error;
pub mod params;
pub mod stats;

pub mod coverage;
pub mod genome;
pub mod interval;
pub mod io;
pub mod probe;
pub mod synthesis;
pub mod variant;

use log::{debug, info};

use crate::config::Config;
use crate::error::Error;
use crate::io::cgh::CghDocument;
use crate::io::vcf::VcfReader;
use crate::params::Parameters;
use crate::stats::ConversionStats;
use crate::synthesis::CghSynthesizer;
use crate::variant::{Admission, Extracted, RawVariant, extract_event};

/// Top-level entry point. Called from `main()` after CLI parsing.
pub fn run(params: &Parameters) -> anyhow::Result<()> {
    let config = Config::from_params(params)?;
    let out = params.out_path();

    info!("vcf2cytosure v{}", env!("CARGO_PKG_VERSION"));
    info!("vcf: {}", params.vcf.display());
    if let Some(coverage) = &params.coverage {
        info!("coverage: {}", coverage.display());
    }
    match &config.filter {
        Some(filter) => info!(
            "Filtering: size > {} bp, {} <= {}",
            filter.min_size, config.frequency_tag, filter.max_frequency
        ),
        None => info!("Filtering disabled"),
    }

    let reader = VcfReader::open(&params.vcf, &config.frequency_tag)?;
    reader.check_contigs(&config.genome);

    let mut stats = ConversionStats::new();
    let document = convert(reader, params.coverage.as_deref(), &config, &mut stats)?;

    document.persist(&out)?;
    info!("Output written to {}", out.display());
    stats.print_summary();
    Ok(())
}

/// Convert a stream of raw records into a CGH document.
///
/// The document is only returned once every record has been processed, so a
/// fatal error never yields a partial document.
pub fn convert<I>(
    records: I,
    coverage: Option<&std::path::Path>,
    config: &Config,
    stats: &mut ConversionStats,
) -> Result<CghDocument, Error>
where
    I: IntoIterator<Item = Result<RawVariant, Error>>,
{
    let mut synthesizer = CghSynthesizer::new(config);

    for record in records {
        let record = record?;
        stats.total_records += 1;

        if let Some(filter) = &config.filter {
            if let Admission::Reject(reason) = filter.admit(&record) {
                debug!(
                    "Filtered {}:{} ({})",
                    record.chrom,
                    record.pos(),
                    reason.as_str()
                );
                stats.record_rejection(reason);
                continue;
            }
        }

        match extract_event(&record, &config.genome)? {
            Extracted::Event(event) => {
                stats.event_probes += synthesizer.add_event(&event)? as u64;
                stats.events += 1;
            }
            Extracted::Skipped(reason) => {
                debug!(
                    "Skipped {}:{} ({})",
                    record.chrom,
                    record.pos(),
                    reason.as_str()
                );
                stats.record_skip(reason);
            }
        }
    }

    match coverage {
        Some(path) => stats.coverage_probes += synthesizer.add_coverage_probes(path)? as u64,
        None => stats.between_probes += synthesizer.add_probes_between_events() as u64,
    }

    Ok(synthesizer.into_document())
}
