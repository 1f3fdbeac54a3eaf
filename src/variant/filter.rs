//! Admission filter applied to raw records before event extraction

use super::{RawVariant, SvType};

/// Why a record was not admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// `|END - start|` is at most the minimum size.
    TooSmall,
    /// Breakend whose partner is on the same contig and closer than the minimum size.
    LocalBreakend,
    /// Population frequency above the maximum.
    Frequent,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TooSmall => "too small",
            Self::LocalBreakend => "local breakend",
            Self::Frequent => "too frequent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admit,
    Reject(Rejection),
}

/// Size and frequency thresholds for admitting a record.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantFilter {
    pub min_size: u64,
    pub max_frequency: f64,
}

impl Default for VariantFilter {
    fn default() -> Self {
        Self {
            min_size: 5000,
            max_frequency: 0.01,
        }
    }
}

impl VariantFilter {
    pub fn new(min_size: u64, max_frequency: f64) -> Self {
        Self {
            min_size,
            max_frequency,
        }
    }

    /// Decide whether `record` is large, rare and non-local enough to draw.
    ///
    /// Translocations read their partner from `CHR2`/`END` but are only
    /// subject to the frequency check.
    pub fn admit(&self, record: &RawVariant) -> Admission {
        let info = &record.info;
        let is_tra = info.sv_type == Some(SvType::Tra);

        match info.end.filter(|&end| end > 0) {
            Some(end) if !is_tra => {
                if end.abs_diff(record.start) <= self.min_size {
                    return Admission::Reject(Rejection::TooSmall);
                }
            }
            _ => {
                if info.sv_type == Some(SvType::Bnd) {
                    let partner = record
                        .alternates
                        .first()
                        .and_then(|alt| breakend_partner(alt));
                    match partner {
                        Some((chrom, pos)) => {
                            if chrom == record.chrom && pos.abs_diff(record.start) < self.min_size {
                                return Admission::Reject(Rejection::LocalBreakend);
                            }
                        }
                        None => log::debug!(
                            "BND at {}:{} has no bracketed mate in ALT",
                            record.chrom,
                            record.pos()
                        ),
                    }
                } else if is_tra {
                    log::debug!(
                        "TRA at {}:{} with partner {}:{}",
                        record.chrom,
                        record.pos(),
                        info.chr2.as_deref().unwrap_or("?"),
                        info.end.map(|e| e.to_string()).unwrap_or_else(|| "?".into())
                    );
                }
            }
        }

        if let Some(frequency) = info.frequency {
            if frequency > self.max_frequency {
                return Admission::Reject(Rejection::Frequent);
            }
        }

        Admission::Admit
    }
}

/// Mate contig and position from a bracketed breakend ALT such as
/// `N]2:3000]` or `[2:3000[N`.
pub(crate) fn breakend_partner(alt: &str) -> Option<(&str, u64)> {
    let (left, right) = alt.split_once(':')?;
    let chrom = left.rsplit(']').next()?.rsplit('[').next()?;
    let pos = right
        .split(':')
        .next()?
        .split(']')
        .next()?
        .split('[')
        .next()?
        .parse()
        .ok()?;
    Some((chrom, pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::VariantInfo;

    fn record(chrom: &str, pos: u64, alt: &str, info: &str) -> RawVariant {
        RawVariant {
            chrom: chrom.to_string(),
            start: pos - 1,
            reference: "N".to_string(),
            alternates: vec![alt.to_string()],
            info: VariantInfo::parse(info, "FRQ"),
        }
    }

    #[test]
    fn test_breakend_partner() {
        assert_eq!(breakend_partner("N]1:500]"), Some(("1", 500)));
        assert_eq!(breakend_partner("[2:3000[A"), Some(("2", 3000)));
        assert_eq!(breakend_partner("G]X:12345]"), Some(("X", 12345)));
        assert_eq!(breakend_partner("]GL000192.1:5000]N"), Some(("GL000192.1", 5000)));
        assert_eq!(breakend_partner("<BND>"), None);
    }

    #[test]
    fn test_deletion_size_threshold() {
        let filter = VariantFilter::default();
        // start=100, END=5200: 5100 bp
        let large = record("1", 101, "<DEL>", "SVTYPE=DEL;END=5200");
        assert_eq!(filter.admit(&large), Admission::Admit);

        // start=100, END=2000: 1900 bp
        let small = record("1", 101, "<DEL>", "SVTYPE=DEL;END=2000");
        assert_eq!(filter.admit(&small), Admission::Reject(Rejection::TooSmall));

        // Exactly min_size is still too small
        let edge = record("1", 101, "<DEL>", "SVTYPE=DEL;END=5100");
        assert_eq!(filter.admit(&edge), Admission::Reject(Rejection::TooSmall));
    }

    #[test]
    fn test_local_breakend_rejected() {
        let filter = VariantFilter::new(100, 0.01);
        let local = record("1", 1001, "N]1:1050]", "SVTYPE=BND");
        assert_eq!(
            filter.admit(&local),
            Admission::Reject(Rejection::LocalBreakend)
        );
    }

    #[test]
    fn test_distant_or_interchromosomal_breakend_admitted() {
        let filter = VariantFilter::new(100, 0.01);
        let distant = record("1", 1001, "N]1:90000]", "SVTYPE=BND");
        assert_eq!(filter.admit(&distant), Admission::Admit);

        let other_chrom = record("1", 1001, "N]2:1050]", "SVTYPE=BND");
        assert_eq!(filter.admit(&other_chrom), Admission::Admit);
    }

    #[test]
    fn test_translocation_has_no_size_rule() {
        // Partner position is read but never compared; only frequency applies.
        let filter = VariantFilter::default();
        let tra = record("1", 1001, "<TRA>", "SVTYPE=TRA;CHR2=1;END=1010");
        assert_eq!(filter.admit(&tra), Admission::Admit);

        let common = record("1", 1001, "<TRA>", "SVTYPE=TRA;CHR2=5;END=1010;FRQ=0.3");
        assert_eq!(filter.admit(&common), Admission::Reject(Rejection::Frequent));
    }

    #[test]
    fn test_frequency_threshold() {
        let filter = VariantFilter::default();
        let rare = record("1", 101, "<DUP>", "SVTYPE=DUP;END=50000;FRQ=0.01");
        assert_eq!(filter.admit(&rare), Admission::Admit);

        let common = record("1", 101, "<DUP>", "SVTYPE=DUP;END=50000;FRQ=0.02");
        assert_eq!(filter.admit(&common), Admission::Reject(Rejection::Frequent));
    }

    #[test]
    fn test_point_insertion_admitted() {
        let filter = VariantFilter::default();
        let ins = record("3", 5000, "<INS>", "SVTYPE=INS");
        assert_eq!(filter.admit(&ins), Admission::Admit);
    }
}
