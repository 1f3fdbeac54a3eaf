//! Background probes from a per-window coverage file
//!
//! Coverage files are tab-separated with 5 columns:
//! 1. chromosome
//! 2. window start
//! 3. window end
//! 4. mean depth over the window
//! 5. (ignored)
//!
//! Windows are re-binned, windows starting inside assembly gaps or drawn
//! events are dropped, and the remainder become probes whose height is the
//! log-ratio-like `2 * coverage / mean - 2`.

use crate::config::Config;
use crate::error::Error;
use crate::interval::{Interval, merge_intervals};
use crate::io::cgh::{CghDocument, Probe};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// CytoSure does not display probes at height 0.0.
pub const ZERO_HEIGHT: f64 = 0.01;

/// One line of a coverage file.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageRecord {
    pub chrom: String,
    pub start: i64,
    pub end: i64,
    pub coverage: f64,
}

/// Lazy reader over the records of a coverage file.
pub struct CoverageReader {
    inner: Box<dyn BufRead + Send>,
    path: PathBuf,
    line_num: usize,
    line_buf: String,
}

/// Open a coverage file (plain or gzip compressed).
pub fn parse_coverages(path: &Path) -> Result<CoverageReader, Error> {
    Ok(CoverageReader {
        inner: crate::io::open_text(path)?,
        path: path.to_path_buf(),
        line_num: 0,
        line_buf: String::new(),
    })
}

impl Iterator for CoverageReader {
    type Item = Result<CoverageRecord, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line_buf.clear();
            match self.inner.read_line(&mut self.line_buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(Error::io(e, &self.path))),
            }
            self.line_num += 1;

            let line = self.line_buf.trim_end_matches(['\n', '\r']);
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }

            return Some(
                parse_coverage_line(line)
                    .map_err(|message| Error::format(&self.path, self.line_num, message)),
            );
        }
    }
}

fn parse_coverage_line(line: &str) -> Result<CoverageRecord, String> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 5 {
        return Err(format!("expected 5 tab-separated fields, got {}", fields.len()));
    }

    let start = fields[1]
        .parse::<i64>()
        .map_err(|e| format!("invalid start '{}': {}", fields[1], e))?;
    let end = fields[2]
        .parse::<i64>()
        .map_err(|e| format!("invalid end '{}': {}", fields[2], e))?;
    let coverage = fields[3]
        .parse::<f64>()
        .map_err(|e| format!("invalid coverage '{}': {}", fields[3], e))?;

    Ok(CoverageRecord {
        chrom: fields[0].to_string(),
        start,
        end,
        coverage,
    })
}

/// Arithmetic mean of the coverage values, `None` for no records.
pub fn mean_coverage(records: &[CoverageRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let total: f64 = records.iter().map(|r| r.coverage).sum();
    Some(total / records.len() as f64)
}

/// Runs of consecutive records sharing a chromosome.
///
/// The input is expected in chromosome order; a chromosome that appears in
/// two separate runs yields two groups.
pub fn group_by_chromosome(
    records: &[CoverageRecord],
) -> impl Iterator<Item = (&str, &[CoverageRecord])> {
    records
        .chunk_by(|a, b| a.chrom == b.chrom)
        .map(|group| (group[0].chrom.as_str(), group))
}

/// Merge every `n` consecutive records of one chromosome into a single bin
/// spanning them, with the mean of their coverages.
pub fn bin_coverages(
    records: &[CoverageRecord],
    n: usize,
) -> impl Iterator<Item = CoverageRecord> + '_ {
    records.chunks(n.max(1)).map(|bin| CoverageRecord {
        chrom: bin[0].chrom.clone(),
        start: bin[0].start,
        end: bin[bin.len() - 1].end,
        coverage: bin.iter().map(|r| r.coverage).sum::<f64>() / bin.len() as f64,
    })
}

/// Sweep order at equal positions: an interval closing at `p` is left before
/// one opening at `p`, and both are applied before a record starting at `p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SweepKind {
    IntervalEnd,
    IntervalStart,
    Record,
}

/// Keep only records whose start lies outside every interval.
///
/// `intervals` must be disjoint. Record extents are not clipped.
pub fn subtract_intervals<I>(records: I, intervals: &[Interval]) -> Vec<CoverageRecord>
where
    I: IntoIterator<Item = CoverageRecord>,
{
    let mut records: Vec<Option<CoverageRecord>> = records.into_iter().map(Some).collect();

    let mut events: Vec<(i64, SweepKind, usize)> = Vec::with_capacity(records.len() + 2 * intervals.len());
    for (idx, record) in records.iter().enumerate() {
        if let Some(record) = record {
            events.push((record.start, SweepKind::Record, idx));
        }
    }
    for interval in intervals {
        events.push((interval.start, SweepKind::IntervalStart, 0));
        events.push((interval.end, SweepKind::IntervalEnd, 0));
    }
    events.sort_by_key(|&(pos, kind, _)| (pos, kind));

    let mut kept = Vec::new();
    let mut inside = false;
    for (_, kind, idx) in events {
        match kind {
            SweepKind::IntervalStart => inside = true,
            SweepKind::IntervalEnd => inside = false,
            SweepKind::Record => {
                if !inside {
                    if let Some(record) = records[idx].take() {
                        kept.push(record);
                    }
                }
            }
        }
    }
    kept
}

/// Probe height for a bin: `2 * coverage / mean - 2`, clamped from above to
/// `max_height` and nudged off exactly zero.
pub fn coverage_height(coverage: f64, mean: f64, max_height: f64) -> f64 {
    let height = (2.0 * coverage / mean - 2.0).min(max_height);
    if height == 0.0 { ZERO_HEIGHT } else { height }
}

/// Add one "coverage" probe per binned window outside gaps and events.
///
/// Returns the number of probes added.
pub fn add_coverage_probes(
    document: &mut CghDocument,
    path: &Path,
    config: &Config,
    event_intervals: &BTreeMap<String, Vec<Interval>>,
) -> Result<usize, Error> {
    let genome = &config.genome;

    log::info!("Reading {} ...", path.display());
    let mut coverages = Vec::new();
    for record in parse_coverages(path)? {
        let record = record?;
        if genome.contains(&record.chrom) {
            coverages.push(record);
        }
    }

    let mean = mean_coverage(&coverages).ok_or_else(|| Error::EmptyCoverage {
        path: path.to_path_buf(),
    })?;
    if mean <= 0.0 {
        return Err(Error::ZeroCoverage {
            path: path.to_path_buf(),
        });
    }
    log::info!("Mean coverage is {:.2}", mean);

    let mut n = 0;
    for (chrom, records) in group_by_chromosome(&coverages) {
        let excluded = merge_intervals(
            genome
                .gap_intervals(chrom)
                .iter()
                .chain(event_intervals.get(chrom).into_iter().flatten())
                .copied(),
        );
        let display = genome.display_name(chrom);

        for record in subtract_intervals(bin_coverages(records, config.coverage_bin_size), &excluded) {
            let height = coverage_height(record.coverage, mean, config.max_height);
            document
                .probes
                .push(Probe::new(display, record.start, record.end, height, "coverage"));
            n += 1;
        }
    }

    log::info!("Added {} coverage probes", n);
    Ok(n)
}
