//! VCF reader yielding raw structural-variant records
//!
//! The header block is validated with noodles; data lines are split by hand
//! since only CHROM, POS, REF, ALT and INFO are needed.

use crate::error::Error;
use crate::genome::Genome;
use crate::variant::{RawVariant, VariantInfo};
use noodles::vcf;
use std::io::BufRead;
use std::path::Path;

/// Streaming reader over the data lines of a VCF.
pub struct VcfReader {
    inner: Box<dyn BufRead + Send>,
    header: vcf::Header,
    frequency_tag: String,
    line_num: usize,
    line_buf: String,
}

impl VcfReader {
    /// Open a VCF file (plain or gzip compressed) and read its header.
    pub fn open(path: &Path, frequency_tag: &str) -> Result<Self, Error> {
        let reader = super::open_text(path)?;
        Self::from_reader(reader, frequency_tag)
    }

    /// Read the header from `inner`, leaving it positioned at the first record.
    pub fn from_reader(mut inner: Box<dyn BufRead + Send>, frequency_tag: &str) -> Result<Self, Error> {
        let mut header_str = String::new();
        let mut line = String::new();
        let mut line_num = 0;

        loop {
            line.clear();
            let bytes_read = inner.read_line(&mut line)?;
            if bytes_read == 0 {
                return Err(Error::Vcf {
                    line: line_num,
                    message: "missing #CHROM header line".to_string(),
                });
            }
            line_num += 1;
            if !line.starts_with('#') {
                return Err(Error::Vcf {
                    line: line_num,
                    message: "data line before #CHROM header line".to_string(),
                });
            }
            header_str.push_str(&line);
            if line.starts_with("#CHROM") {
                break;
            }
        }

        let header: vcf::Header = header_str.parse().map_err(|e| Error::Vcf {
            line: line_num,
            message: format!("invalid header: {}", e),
        })?;

        log::debug!(
            "VCF header: {} samples, {} contigs, {} INFO fields",
            header.sample_names().len(),
            header.contigs().len(),
            header.infos().len()
        );
        if !header.infos().contains_key(frequency_tag) {
            log::warn!(
                "Frequency tag {} is not declared in the VCF header",
                frequency_tag
            );
        }

        Ok(Self {
            inner,
            header,
            frequency_tag: frequency_tag.to_string(),
            line_num,
            line_buf: String::new(),
        })
    }

    pub fn header(&self) -> &vcf::Header {
        &self.header
    }

    /// Warn about header contigs whose length disagrees with the reference.
    pub fn check_contigs(&self, genome: &Genome) {
        for (name, contig) in self.header.contigs() {
            if let (Some(len), Some(known)) = (contig.length(), genome.contig_length(name)) {
                if len as u64 != known {
                    log::warn!(
                        "Contig {} has length {} in the VCF but {} in the reference",
                        name,
                        len,
                        known
                    );
                }
            }
        }
    }

    /// Read the next record, or `None` at end of file.
    pub fn next_record(&mut self) -> Result<Option<RawVariant>, Error> {
        loop {
            self.line_buf.clear();
            let bytes_read = self.inner.read_line(&mut self.line_buf)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_num += 1;

            let line = self.line_buf.trim_end_matches(['\n', '\r']);
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            return parse_vcf_line(line, &self.frequency_tag)
                .map(Some)
                .map_err(|message| Error::Vcf {
                    line: self.line_num,
                    message,
                });
        }
    }
}

impl Iterator for VcfReader {
    type Item = Result<RawVariant, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

/// Parse CHROM, POS, REF, ALT and INFO of one data line.
fn parse_vcf_line(line: &str, frequency_tag: &str) -> Result<RawVariant, String> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 8 {
        return Err(format!("expected at least 8 fields, got {}", fields.len()));
    }

    let pos: u64 = fields[1]
        .parse()
        .map_err(|_| format!("invalid POS '{}'", fields[1]))?;
    if pos == 0 {
        return Err("POS must be >= 1".to_string());
    }

    let alternates = if fields[4] == "." {
        Vec::new()
    } else {
        fields[4].split(',').map(str::to_string).collect()
    };

    Ok(RawVariant {
        chrom: fields[0].to_string(),
        start: pos - 1,
        reference: fields[3].to_string(),
        alternates,
        info: VariantInfo::parse(fields[7], frequency_tag),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::SvType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "##fileformat=VCFv4.2\n\
##contig=<ID=1,length=249250621>\n\
##INFO=<ID=SVTYPE,Number=1,Type=String,Description=\"Type of structural variant\">\n\
##INFO=<ID=END,Number=1,Type=Integer,Description=\"End position\">\n\
##INFO=<ID=FRQ,Number=1,Type=Float,Description=\"Frequency\">\n\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n";

    #[test]
    fn test_parse_vcf_line() {
        let rec = parse_vcf_line(
            "1\t101\tsv1\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;END=5200;FRQ=0.001",
            "FRQ",
        )
        .unwrap();
        assert_eq!(rec.chrom, "1");
        assert_eq!(rec.start, 100);
        assert_eq!(rec.pos(), 101);
        assert_eq!(rec.reference, "N");
        assert_eq!(rec.alternates, vec!["<DEL>".to_string()]);
        assert_eq!(rec.info.sv_type, Some(SvType::Del));
        assert_eq!(rec.info.end, Some(5200));
        assert_eq!(rec.info.frequency, Some(0.001));
    }

    #[test]
    fn test_parse_vcf_line_missing_alt() {
        let rec = parse_vcf_line("1\t101\t.\tN\t.\t.\tPASS\tSVTYPE=DEL", "FRQ").unwrap();
        assert!(rec.alternates.is_empty());
    }

    #[test]
    fn test_parse_vcf_line_invalid() {
        assert!(parse_vcf_line("1\t101\t.\tN", "FRQ").is_err());
        assert!(parse_vcf_line("1\tabc\t.\tN\t<DEL>\t.\t.\t.", "FRQ").is_err());
        assert!(parse_vcf_line("1\t0\t.\tN\t<DEL>\t.\t.\t.", "FRQ").is_err());
    }

    #[test]
    fn test_reader_plain() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", HEADER).unwrap();
        writeln!(file, "1\t101\tsv1\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;END=5200").unwrap();
        writeln!(file, "1\t7001\tsv2\tN\t<INS>\t.\tPASS\tSVTYPE=INS").unwrap();
        file.flush().unwrap();

        let reader = VcfReader::open(file.path(), "FRQ").unwrap();
        let records: Vec<RawVariant> = reader.collect::<Result<_, _>>().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].info.end, Some(5200));
        assert_eq!(records[1].info.sv_type, Some(SvType::Ins));
    }

    #[test]
    fn test_reader_gzip() {
        use flate2::Compression;
        use flate2::write::GzEncoder;

        let tmpfile = tempfile::Builder::new().suffix(".vcf.gz").tempfile().unwrap();
        let mut encoder = GzEncoder::new(tmpfile.as_file(), Compression::default());
        write!(encoder, "{}", HEADER).unwrap();
        writeln!(encoder, "1\t101\tsv1\tN\t<DUP>\t.\tPASS\tSVTYPE=DUP;END=90000").unwrap();
        encoder.finish().unwrap();

        let mut reader = VcfReader::open(tmpfile.path(), "FRQ").unwrap();
        let rec = reader.next_record().unwrap().unwrap();
        assert_eq!(rec.info.sv_type, Some(SvType::Dup));
        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn test_reader_reports_line_number() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", HEADER).unwrap();
        writeln!(file, "1\t101\tsv1\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;END=5200").unwrap();
        writeln!(file, "1\tnotanumber\tsv2\tN\t<INS>\t.\tPASS\tSVTYPE=INS").unwrap();
        file.flush().unwrap();

        let mut reader = VcfReader::open(file.path(), "FRQ").unwrap();
        assert!(reader.next_record().unwrap().is_some());
        let err = reader.next_record().unwrap_err();
        match err {
            Error::Vcf { line, .. } => assert_eq!(line, 8),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_reader_requires_header() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1\t101\tsv1\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;END=5200").unwrap();
        file.flush().unwrap();

        assert!(VcfReader::open(file.path(), "FRQ").is_err());
    }
}
