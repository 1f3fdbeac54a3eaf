//! Structural-variant records
//!
//! This module handles:
//! - The raw record as read from the VCF (`RawVariant`, `VariantInfo`)
//! - Admission filtering by size, frequency and breakend locality
//! - Normalization of admitted records into `Event`s

mod event;
mod filter;

pub use event::{Event, Extracted, SkipReason, extract_event};
pub use filter::{Admission, Rejection, VariantFilter};

use std::collections::BTreeMap;
use std::fmt;

/// SV kind codes from the `SVTYPE` INFO field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SvType {
    Del,
    Dup,
    Ins,
    Inv,
    Bnd,
    Tra,
    /// Any other code, kept verbatim (e.g. `CNV`, `DUP:TANDEM`).
    Other(String),
}

impl SvType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Del => "DEL",
            Self::Dup => "DUP",
            Self::Ins => "INS",
            Self::Inv => "INV",
            Self::Bnd => "BND",
            Self::Tra => "TRA",
            Self::Other(code) => code,
        }
    }

    /// Insertions and breakends have no extent of their own.
    pub fn is_point_like(&self) -> bool {
        matches!(self, Self::Ins | Self::Bnd)
    }
}

impl std::str::FromStr for SvType {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "DEL" => Self::Del,
            "DUP" => Self::Dup,
            "INS" => Self::Ins,
            "INV" => Self::Inv,
            "BND" => Self::Bnd,
            "TRA" => Self::Tra,
            other => Self::Other(other.to_string()),
        })
    }
}

impl fmt::Display for SvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// INFO column of a record.
///
/// The fields the pipeline acts on are parsed into typed members; every
/// field (typed or not) is also kept verbatim in `fields` for the aberration
/// comment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantInfo {
    pub sv_type: Option<SvType>,
    /// `END`, 1-based inclusive.
    pub end: Option<u64>,
    /// `CHR2`, partner contig of a translocation.
    pub chr2: Option<String>,
    /// `RankScore`, formatted `family:score`.
    pub rank_score: Option<String>,
    /// `OCC`, number of occurrences in a local database.
    pub occ: Option<i64>,
    /// Population frequency from the configured tag.
    pub frequency: Option<f64>,
    /// All INFO entries in key order; flags have no value.
    pub fields: BTreeMap<String, Option<String>>,
}

impl VariantInfo {
    /// Parse a raw INFO column (`.` means empty).
    ///
    /// Unparseable typed values are left as `None`; the raw text is still
    /// available in `fields`.
    pub fn parse(info: &str, frequency_tag: &str) -> Self {
        let mut parsed = Self::default();
        if info.is_empty() || info == "." {
            return parsed;
        }

        for entry in info.split(';').filter(|e| !e.is_empty()) {
            let (key, value) = match entry.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (entry, None),
            };

            match (key, value) {
                ("SVTYPE", Some(v)) => parsed.sv_type = v.parse().ok(),
                ("END", Some(v)) => parsed.end = v.parse().ok(),
                ("CHR2", Some(v)) => parsed.chr2 = Some(v.to_string()),
                ("RankScore", Some(v)) => parsed.rank_score = Some(v.to_string()),
                ("OCC", Some(v)) => parsed.occ = first_value(v).parse().ok(),
                _ => {}
            }

            if key == frequency_tag {
                if let Some(v) = value {
                    parsed.frequency = first_value(v).parse().ok();
                    if parsed.frequency.is_none() {
                        log::warn!("Ignoring non-numeric {}={}", key, v);
                    }
                }
            }

            parsed
                .fields
                .insert(key.to_string(), value.map(str::to_string));
        }

        parsed
    }

    /// Score part of `RankScore` (`family:score`), 0 when absent.
    pub fn rank_score_value(&self) -> i64 {
        match &self.rank_score {
            Some(raw) => {
                let score = raw.split_once(':').map(|(_, s)| s).unwrap_or("");
                score.parse().unwrap_or_else(|_| {
                    log::warn!("Ignoring malformed RankScore '{}'", raw);
                    0
                })
            }
            None => 0,
        }
    }
}

/// First entry of a comma-separated (per-allele) value.
fn first_value(v: &str) -> &str {
    v.split(',').next().unwrap_or(v)
}

/// One VCF data line, as far as the converter needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawVariant {
    pub chrom: String,
    /// 0-based position (`POS - 1`).
    pub start: u64,
    pub reference: String,
    pub alternates: Vec<String>,
    pub info: VariantInfo,
}

impl RawVariant {
    /// 1-based position as written in the VCF.
    pub fn pos(&self) -> u64 {
        self.start + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sv_type_roundtrip_codes() {
        for code in ["DEL", "DUP", "INS", "INV", "BND", "TRA", "CNV"] {
            let sv_type: SvType = code.parse().unwrap();
            assert_eq!(sv_type.as_str(), code);
        }
        assert_eq!("CNV".parse::<SvType>().unwrap(), SvType::Other("CNV".into()));
        assert!(SvType::Ins.is_point_like());
        assert!(SvType::Bnd.is_point_like());
        assert!(!SvType::Tra.is_point_like());
    }

    #[test]
    fn test_parse_info_typed_fields() {
        let info = VariantInfo::parse(
            "SVTYPE=DEL;END=5200;OCC=3;RankScore=fam1:12;FRQ=0.002,0.5;IMPRECISE",
            "FRQ",
        );
        assert_eq!(info.sv_type, Some(SvType::Del));
        assert_eq!(info.end, Some(5200));
        assert_eq!(info.occ, Some(3));
        assert_eq!(info.rank_score_value(), 12);
        assert_eq!(info.frequency, Some(0.002));
        assert_eq!(info.fields.get("IMPRECISE"), Some(&None));
        assert_eq!(info.fields.get("END"), Some(&Some("5200".to_string())));
        assert_eq!(info.fields.len(), 6);
    }

    #[test]
    fn test_parse_info_custom_frequency_tag() {
        let info = VariantInfo::parse("SVTYPE=DUP;FRQ=0.9;SWEGENAF=0.2", "SWEGENAF");
        assert_eq!(info.frequency, Some(0.2));
    }

    #[test]
    fn test_parse_info_empty() {
        assert_eq!(VariantInfo::parse(".", "FRQ"), VariantInfo::default());
    }

    #[test]
    fn test_rank_score_defaults() {
        let info = VariantInfo::parse("SVTYPE=DEL", "FRQ");
        assert_eq!(info.rank_score_value(), 0);
        let info = VariantInfo::parse("RankScore=fam1:-4", "FRQ");
        assert_eq!(info.rank_score_value(), -4);
        let info = VariantInfo::parse("RankScore=garbage", "FRQ");
        assert_eq!(info.rank_score_value(), 0);
    }
}
