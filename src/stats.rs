//! Conversion statistics tracking and reporting

use log::info;

use crate::variant::{Rejection, SkipReason};

/// Tracks what happened to each record of a conversion run
#[derive(Default, Debug)]
pub struct ConversionStats {
    /// Total number of VCF records read
    pub total_records: u64,
    /// Records rejected for being too small
    pub too_small: u64,
    /// Breakends rejected for pointing close to themselves
    pub local_breakends: u64,
    /// Records rejected for being too common
    pub too_frequent: u64,
    /// Records without exactly one ALT allele
    pub multi_allelic: u64,
    /// Records on contigs outside the reference table
    pub unknown_contig: u64,
    /// Events written to the CGH document
    pub events: u64,
    /// Probes drawn for events (spaced or triangular)
    pub event_probes: u64,
    /// Background probes from the coverage file
    pub coverage_probes: u64,
    /// Placeholder probes filling the gaps between events
    pub between_probes: u64,
}

impl ConversionStats {
    /// Create new statistics tracker
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_rejection(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::TooSmall => self.too_small += 1,
            Rejection::LocalBreakend => self.local_breakends += 1,
            Rejection::Frequent => self.too_frequent += 1,
        }
    }

    pub fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::MultiAllelic => self.multi_allelic += 1,
            SkipReason::UnknownContig => self.unknown_contig += 1,
        }
    }

    /// Records dropped by the admission filter
    pub fn rejected(&self) -> u64 {
        self.too_small + self.local_breakends + self.too_frequent
    }

    /// Records dropped during event extraction
    pub fn skipped(&self) -> u64 {
        self.multi_allelic + self.unknown_contig
    }

    /// Print summary statistics to log
    pub fn print_summary(&self) {
        info!("=== Conversion Summary ===");
        info!("Number of input records: {}", self.total_records);
        if self.rejected() > 0 {
            info!(
                "Filtered: {} ({} too small, {} local breakends, {} too frequent)",
                self.rejected(),
                self.too_small,
                self.local_breakends,
                self.too_frequent
            );
        }
        if self.skipped() > 0 {
            info!(
                "Skipped: {} ({} multi-allelic, {} unknown contig)",
                self.skipped(),
                self.multi_allelic,
                self.unknown_contig
            );
        }
        info!(
            "Probes: {} event, {} coverage, {} between events",
            self.event_probes, self.coverage_probes, self.between_probes
        );
        info!("Wrote {} variants to CGH", self.events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = ConversionStats::new();
        assert_eq!(stats.total_records, 0);
        assert_eq!(stats.rejected(), 0);
        assert_eq!(stats.skipped(), 0);
    }

    #[test]
    fn test_record_rejection() {
        let mut stats = ConversionStats::new();
        stats.record_rejection(Rejection::TooSmall);
        stats.record_rejection(Rejection::TooSmall);
        stats.record_rejection(Rejection::LocalBreakend);
        stats.record_rejection(Rejection::Frequent);
        assert_eq!(stats.too_small, 2);
        assert_eq!(stats.local_breakends, 1);
        assert_eq!(stats.too_frequent, 1);
        assert_eq!(stats.rejected(), 4);
    }

    #[test]
    fn test_record_skip() {
        let mut stats = ConversionStats::new();
        stats.record_skip(SkipReason::MultiAllelic);
        stats.record_skip(SkipReason::UnknownContig);
        stats.record_skip(SkipReason::UnknownContig);
        assert_eq!(stats.multi_allelic, 1);
        assert_eq!(stats.unknown_contig, 2);
        assert_eq!(stats.skipped(), 3);
    }
}
