//! Normalization of admitted records into events

use super::{RawVariant, SvType, VariantInfo};
use crate::error::Error;
use crate::genome::Genome;

/// A structural variant ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub chrom: String,
    /// 0-based.
    pub start: i64,
    /// `None` for point events (no `END`).
    pub end: Option<i64>,
    pub sv_type: SvType,
    pub info: VariantInfo,
}

/// Records that are dropped without failing the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Zero or more than one ALT allele.
    MultiAllelic,
    /// Contig not in the reference table.
    UnknownContig,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultiAllelic => "not exactly one ALT allele",
            Self::UnknownContig => "unknown contig",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    Event(Event),
    Skipped(SkipReason),
}

/// Turn an admitted record into an [`Event`].
///
/// When `END` is present and the 0-based start is less than or equal to it,
/// the two coordinates are exchanged: `Event::start` receives `END` and
/// `Event::end` receives the record start.
pub fn extract_event(record: &RawVariant, genome: &Genome) -> Result<Extracted, Error> {
    if record.alternates.len() != 1 {
        return Ok(Extracted::Skipped(SkipReason::MultiAllelic));
    }
    if !genome.contains(&record.chrom) {
        return Ok(Extracted::Skipped(SkipReason::UnknownContig));
    }

    let sv_type = record
        .info
        .sv_type
        .clone()
        .ok_or_else(|| Error::MissingSvType {
            chrom: record.chrom.clone(),
            pos: record.pos(),
        })?;

    let mut start = record.start as i64;
    let end = match record.info.end.filter(|&end| end > 0) {
        Some(end) => {
            let mut end = end as i64;
            if start <= end {
                std::mem::swap(&mut start, &mut end);
            }
            log::debug!(
                "{} at {}:{}-{} ({} bp)",
                sv_type,
                record.chrom,
                start + 1,
                end,
                end - start
            );
            if record.reference.len() != 1 {
                return Err(Error::InvalidReference {
                    chrom: record.chrom.clone(),
                    pos: record.pos(),
                    reference: record.reference.clone(),
                });
            }
            Some(end)
        }
        None => {
            log::debug!("{} at {}:{}", sv_type, record.chrom, start + 1);
            None
        }
    };

    Ok(Extracted::Event(Event {
        chrom: record.chrom.clone(),
        start,
        end,
        sv_type,
        info: record.info.clone(),
    }))
}
