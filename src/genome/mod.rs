mod grch37;

use std::collections::HashMap;

use crate::error::Error;
use crate::interval::Interval;
use crate::variant::SvType;

/// Static reference configuration: known contigs, display names, assembly
/// gaps and the per-type aberration heights.
#[derive(Debug, Clone)]
pub struct Genome {
    /// Contig names in karyotype order.
    pub chr_name: Vec<String>,

    /// Contig lengths, parallel to `chr_name`.
    pub chr_length: Vec<u64>,

    chr_index: HashMap<String, usize>,
    rename: HashMap<String, String>,
    gaps: HashMap<String, Vec<Interval>>,
    heights: HashMap<String, f64>,
}

impl Genome {
    /// GRCh37 tables as expected by CytoSure.
    pub fn grch37() -> Self {
        let mut genome = Self::from_contigs(
            grch37::CONTIG_LENGTHS
                .iter()
                .map(|&(name, len)| (name.to_string(), len)),
        );

        genome.rename = grch37::CHROM_RENAME
            .iter()
            .map(|&(from, to)| (from.to_string(), to.to_string()))
            .collect();

        genome.heights = grch37::ABERRATION_HEIGHTS
            .iter()
            .map(|&(sv_type, height)| (sv_type.to_string(), height))
            .collect();

        for &(name, cen_start) in grch37::CENTROMERES {
            let Some(len) = genome.contig_length(name) else {
                continue;
            };
            genome.gaps.insert(
                name.to_string(),
                vec![
                    Interval::new(0, grch37::TELOMERE_LENGTH as i64),
                    Interval::new(
                        cen_start as i64,
                        (cen_start + grch37::CENTROMERE_LENGTH) as i64,
                    ),
                    Interval::new((len - grch37::TELOMERE_LENGTH) as i64, len as i64),
                ],
            );
        }

        genome
    }

    /// Build a contig table without rename, gap or height entries.
    pub fn from_contigs(contigs: impl IntoIterator<Item = (String, u64)>) -> Self {
        let mut chr_name = Vec::new();
        let mut chr_length = Vec::new();
        let mut chr_index = HashMap::new();

        for (name, len) in contigs {
            chr_index.insert(name.clone(), chr_name.len());
            chr_name.push(name);
            chr_length.push(len);
        }

        Self {
            chr_name,
            chr_length,
            chr_index,
            rename: HashMap::new(),
            gaps: HashMap::new(),
            heights: HashMap::new(),
        }
    }

    /// Add or replace the default height for an SV type code.
    pub fn with_height(mut self, sv_type: &str, height: f64) -> Self {
        self.heights.insert(sv_type.to_string(), height);
        self
    }

    /// Add a display rename for a contig.
    pub fn with_rename(mut self, from: &str, to: &str) -> Self {
        self.rename.insert(from.to_string(), to.to_string());
        self
    }

    pub fn contains(&self, chrom: &str) -> bool {
        self.chr_index.contains_key(chrom)
    }

    pub fn contig_index(&self, chrom: &str) -> Option<usize> {
        self.chr_index.get(chrom).copied()
    }

    pub fn contig_length(&self, chrom: &str) -> Option<u64> {
        self.contig_index(chrom).map(|idx| self.chr_length[idx])
    }

    /// Name written to the CGH file for `chrom`.
    pub fn display_name<'a>(&'a self, chrom: &'a str) -> &'a str {
        self.rename.get(chrom).map(String::as_str).unwrap_or(chrom)
    }

    /// Assembly gaps ("N" runs) on `chrom`, sorted and non-overlapping.
    pub fn gap_intervals(&self, chrom: &str) -> &[Interval] {
        self.gaps.get(chrom).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Default visual height for an SV type.
    ///
    /// A type missing from the table is a configuration error.
    pub fn height(&self, sv_type: &SvType) -> Result<f64, Error> {
        self.heights
            .get(sv_type.as_str())
            .copied()
            .ok_or_else(|| Error::UnknownSvType(sv_type.as_str().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grch37_contigs() {
        let genome = Genome::grch37();
        assert_eq!(genome.chr_name.len(), 24);
        assert_eq!(genome.chr_name[0], "1");
        assert_eq!(genome.chr_name[23], "Y");
        assert_eq!(genome.contig_length("1"), Some(249_250_621));
        assert_eq!(genome.contig_length("X"), Some(155_270_560));
        assert!(!genome.contains("chr1"));
        assert!(!genome.contains("MT"));
    }

    #[test]
    fn test_display_name() {
        let genome = Genome::grch37();
        assert_eq!(genome.display_name("X"), "23");
        assert_eq!(genome.display_name("Y"), "24");
        assert_eq!(genome.display_name("7"), "7");
    }

    #[test]
    fn test_gap_intervals_sorted() {
        let genome = Genome::grch37();
        let gaps = genome.gap_intervals("1");
        assert_eq!(gaps.len(), 3);
        assert_eq!(gaps[0], Interval::new(0, 10_000));
        assert_eq!(gaps[2].end, 249_250_621);
        for pair in gaps.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
        assert!(genome.gap_intervals("unplaced").is_empty());
    }

    #[test]
    fn test_heights() {
        let genome = Genome::grch37();
        assert_eq!(genome.height(&SvType::Del).unwrap(), -1.0);
        assert_eq!(genome.height(&SvType::Dup).unwrap(), 0.5);
        assert_eq!(
            genome.height(&SvType::Other("DUP:TANDEM".into())).unwrap_err().to_string(),
            "SV type 'DUP:TANDEM' has no entry in the aberration height table"
        );
    }

    #[test]
    fn test_custom_table() {
        let genome = Genome::from_contigs(vec![("chrA".to_string(), 1000)])
            .with_height("DEL", -2.0)
            .with_rename("chrA", "A");
        assert_eq!(genome.contig_index("chrA"), Some(0));
        assert_eq!(genome.display_name("chrA"), "A");
        assert_eq!(genome.height(&SvType::Del).unwrap(), -2.0);
        assert!(genome.height(&SvType::Inv).is_err());
    }
}
