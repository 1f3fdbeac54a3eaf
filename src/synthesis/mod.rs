//! Event to CGH synthesis
//!
//! Each event becomes one segment, one aberration and a set of probes:
//! - insertions and breakends get a triangle of probes around the position
//! - all other events get evenly spaced probes along their interval
//!
//! Once all events are in, the rest of the genome is covered either by
//! coverage probes or by flat placeholder probes between the events.

use crate::config::Config;
use crate::coverage::{self, ZERO_HEIGHT};
use crate::error::Error;
use crate::interval::{Interval, complement_intervals, merge_intervals};
use crate::io::cgh::{Aberration, CghDocument, Probe, Segment};
use crate::probe::{spaced_probes, triangle_probes};
use crate::variant::{Event, SvType, VariantInfo};
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// INFO keys left out of aberration comments.
const COMMENT_EXCLUDED_KEYS: &[&str] = &["CSQ", "SVTYPE"];

/// Probes are drawn slightly off the segment line so both stay visible.
const PROBE_HEIGHT_FACTOR: f64 = 1.05;

/// Builds a CGH document from a stream of events.
pub struct CghSynthesizer<'a> {
    config: &'a Config,
    document: CghDocument,
    /// Drawn interval events per contig, for gap filling.
    chr_intervals: BTreeMap<String, Vec<Interval>>,
}

impl<'a> CghSynthesizer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            document: CghDocument::new(),
            chr_intervals: BTreeMap::new(),
        }
    }

    /// Draw one event. Returns the number of probes added for it.
    ///
    /// Fails if the event type has no height in the reference tables.
    pub fn add_event(&mut self, event: &Event) -> Result<usize, Error> {
        let config = self.config;
        let mut height = config.genome.height(&event.sv_type)?;
        let chrom = config.genome.display_name(&event.chrom);

        let point_like = event.sv_type.is_point_like();
        let end = match event.end {
            Some(end) if !point_like => end,
            _ => event.start + config.point_event_window,
        };

        self.document
            .segments
            .push(Segment::new(chrom, event.start, end, height));

        let mut aberration = Aberration::new(chrom, event.start, end);
        aberration.comment = Some(format_comment(&event.info)).filter(|c| !c.is_empty());
        aberration.confirmation = Some(event.sv_type.to_string());
        aberration.n_probes = event.info.occ.unwrap_or(0);
        aberration.copy_number = event.info.rank_score_value();
        self.document.aberrations.push(aberration);

        let before = self.document.probes.len();
        if point_like {
            // Insertions point up, breakends down
            let sign = if event.sv_type == SvType::Ins { 1.0 } else { -1.0 };
            for (pos, h) in triangle_probes(event.start) {
                self.push_probe(chrom, pos, sign * h, event.sv_type.as_str());
            }
        } else {
            self.chr_intervals
                .entry(event.chrom.clone())
                .or_default()
                .push(Interval::spanning(event.start, end));

            height *= PROBE_HEIGHT_FACTOR;
            for pos in spaced_probes(event.start, end - 1, config.probe_spacing) {
                self.push_probe(chrom, pos, height, event.sv_type.as_str());
            }
        }

        Ok(self.document.probes.len() - before)
    }

    fn push_probe(&mut self, chrom: &str, pos: i64, height: f64, text: &str) {
        self.document.probes.push(Probe::new(
            chrom,
            pos,
            pos + self.config.probe_width,
            height,
            text,
        ));
    }

    /// Fill the gaps between drawn events with flat probes, on every contig
    /// that has at least one interval event. Returns the number of probes.
    pub fn add_probes_between_events(&mut self) -> usize {
        let config = self.config;
        let genome = &config.genome;
        let mut n = 0;

        for (chrom, &len) in genome.chr_name.iter().zip(&genome.chr_length) {
            let Some(intervals) = self.chr_intervals.get(chrom) else {
                continue;
            };
            let merged = merge_intervals(intervals.iter().copied());
            let display = genome.display_name(chrom);

            for gap in complement_intervals(&merged, len as i64) {
                for pos in spaced_probes(gap.start, gap.end, config.gap_probe_spacing) {
                    self.document.probes.push(Probe::new(
                        display,
                        pos,
                        pos + config.probe_width,
                        ZERO_HEIGHT,
                        "between events",
                    ));
                    n += 1;
                }
            }
        }

        log::debug!("Added {} probes between events", n);
        n
    }

    /// Add background probes from a coverage file, leaving out drawn events.
    pub fn add_coverage_probes(&mut self, path: &Path) -> Result<usize, Error> {
        coverage::add_coverage_probes(&mut self.document, path, self.config, &self.chr_intervals)
    }

    pub fn into_document(self) -> CghDocument {
        self.document
    }
}

/// One `KEY: value` line per INFO entry, in key order, each preceded by a
/// newline.
pub fn format_comment(info: &VariantInfo) -> String {
    let mut comment = String::new();
    for (key, value) in &info.fields {
        if COMMENT_EXCLUDED_KEYS.contains(&key.as_str()) {
            continue;
        }
        let _ = write!(comment, "\n{}: {}", key, value.as_deref().unwrap_or("True"));
    }
    comment
}
