//! CytoSure CGH document model and XML writer
//!
//! The document is built entirely in memory and only written once the whole
//! VCF has been converted. CytoSure inverts the sign of log-ratios, so every
//! height is negated on output; start coordinates are written 1-based.

use crate::error::Error;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Method recorded on every aberration.
pub const METHOD: &str = "converted from VCF";

/// A single point measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Probe {
    pub name: String,
    pub chromosome: String,
    /// 0-based.
    pub start: i64,
    pub end: i64,
    pub height: f64,
}

impl Probe {
    pub fn new(chromosome: &str, start: i64, end: i64, height: f64, name: &str) -> Self {
        Self {
            name: name.to_string(),
            chromosome: chromosome.to_string(),
            start,
            end,
            height,
        }
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("chromosome", self.chromosome.clone()),
            ("start", (self.start + 1).to_string()),
            ("stop", self.end.to_string()),
            ("normalized", format!("{:.3}", -self.height)),
            ("smoothed", "0.0".to_string()),
            ("smoothed_normalized", "-0.25".to_string()),
            ("sequence", "AACCGGTT".to_string()),
        ]
    }

    fn spot_attributes(&self) -> Vec<(&'static str, String)> {
        let red = 1000.0;
        let green = red * 2f64.powf(self.height);
        vec![
            ("index", "1".to_string()),
            ("row", "1".to_string()),
            ("column", "1".to_string()),
            ("red", format!("{}", red as i64)),
            ("green", format!("{:.3}", green)),
            ("gSNR", "100.0".to_string()),
            ("rSNR", "100.0".to_string()),
            ("outlier", "false".to_string()),
        ]
    }
}

/// Segmentation line drawn under an event.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub chromosome: String,
    /// 0-based.
    pub start: i64,
    pub end: i64,
    pub height: f64,
}

impl Segment {
    pub fn new(chromosome: &str, start: i64, end: i64, height: f64) -> Self {
        Self {
            chromosome: chromosome.to_string(),
            start,
            end,
            height,
        }
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("chrId", self.chromosome.clone()),
            ("numProbes", "100".to_string()),
            ("start", (self.start + 1).to_string()),
            ("stop", self.end.to_string()),
            ("average", format!("{:.3}", -self.height)),
        ]
    }
}

/// Annotated call shown in the CytoSure aberration list.
#[derive(Debug, Clone, PartialEq)]
pub struct Aberration {
    pub chromosome: String,
    /// 0-based.
    pub start: i64,
    pub end: i64,
    pub comment: Option<String>,
    pub method: String,
    pub confirmation: Option<String>,
    pub n_probes: i64,
    pub copy_number: i64,
}

impl Aberration {
    pub fn new(chromosome: &str, start: i64, end: i64) -> Self {
        Self {
            chromosome: chromosome.to_string(),
            start,
            end,
            comment: None,
            method: METHOD.to_string(),
            confirmation: None,
            n_probes: 0,
            copy_number: 99,
        }
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        let start = (self.start + 1).to_string();
        let stop = self.end.to_string();
        // Statistics below are placeholders; no confidence is estimated.
        vec![
            ("chr", self.chromosome.clone()),
            ("start", start.clone()),
            ("stop", stop.clone()),
            ("maxStart", start),
            ("maxStop", stop),
            ("copyNumber", self.copy_number.to_string()),
            ("initialClassification", "Unclassified".to_string()),
            ("finalClassification", "Unclassified".to_string()),
            ("inheritance", "Not_tested".to_string()),
            ("numProbes", self.n_probes.to_string()),
            ("startProbe", String::new()),
            ("stopProbe", String::new()),
            ("maxStartProbe", String::new()),
            ("maxStopProbe", String::new()),
            ("automationLevel", "1.0".to_string()),
            ("baseline", "0.0".to_string()),
            ("mosaicism", "0.0".to_string()),
            ("gain", "true".to_string()),
            ("inheritanceCoverage", "0.0".to_string()),
            ("logRatio", "-0.4444".to_string()),
            ("method", self.method.clone()),
            ("p", "0.003333".to_string()),
            ("sd", "0.2222".to_string()),
        ]
    }
}

/// In-memory CGH document with its three mutable sections.
#[derive(Debug, Clone, Default)]
pub struct CghDocument {
    pub probes: Vec<Probe>,
    pub segments: Vec<Segment>,
    pub aberrations: Vec<Aberration>,
}

impl CghDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the whole document as CytoSure XML.
    pub fn write_to<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        writeln!(w, "<?xml version='1.0' encoding='UTF-8'?>")?;
        writeln!(w, "<data formatVersion=\"2\">")?;
        writeln!(
            w,
            "  <cgh mother=\"-1\" father=\"-1\" batched=\"false\" genomeBuild=\"hg19\" softwareVersion=\"{}\">",
            env!("CARGO_PKG_VERSION")
        )?;

        writeln!(w, "    <submission design=\"vcf2cytosure\">")?;
        for aberration in &self.aberrations {
            let children = [
                ("comments", aberration.comment.as_deref()),
                ("confirmation", aberration.confirmation.as_deref()),
            ];
            if children.iter().all(|(_, text)| text.is_none()) {
                write_empty(w, 3, "aberration", &aberration.attributes())?;
                continue;
            }
            write_open(w, 3, "aberration", &aberration.attributes())?;
            for (tag, text) in children {
                if let Some(text) = text {
                    writeln!(w, "{}<{tag}>{}</{tag}>", indent(4), escape(text, false))?;
                }
            }
            writeln!(w, "{}</aberration>", indent(3))?;
        }
        writeln!(w, "    </submission>")?;

        writeln!(w, "    <probes>")?;
        for probe in &self.probes {
            write_open(w, 3, "probe", &probe.attributes())?;
            write_empty(w, 4, "spot", &probe.spot_attributes())?;
            writeln!(w, "{}</probe>", indent(3))?;
        }
        writeln!(w, "    </probes>")?;

        writeln!(w, "    <segmentation type=\"NORMALIZED\">")?;
        for segment in &self.segments {
            write_empty(w, 3, "segment", &segment.attributes())?;
        }
        writeln!(w, "    </segmentation>")?;

        writeln!(w, "  </cgh>")?;
        writeln!(w, "</data>")?;
        Ok(())
    }

    /// Write the document to `path` through a temporary file in the same
    /// directory, so an interrupted write never leaves a truncated file.
    pub fn persist(&self, path: &Path) -> Result<(), Error> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(e, dir))?;

        {
            let mut writer = BufWriter::new(tmp.as_file());
            self.write_to(&mut writer)
                .and_then(|_| writer.flush())
                .map_err(|e| Error::io(e, tmp.path()))?;
        }

        tmp.persist(path).map_err(|e| Error::io(e.error, path))?;
        Ok(())
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

fn write_attributes<W: Write>(w: &mut W, attrs: &[(&'static str, String)]) -> std::io::Result<()> {
    for (key, value) in attrs {
        write!(w, " {}=\"{}\"", key, escape(value, true))?;
    }
    Ok(())
}

fn write_open<W: Write>(
    w: &mut W,
    depth: usize,
    tag: &str,
    attrs: &[(&'static str, String)],
) -> std::io::Result<()> {
    write!(w, "{}<{}", indent(depth), tag)?;
    write_attributes(w, attrs)?;
    writeln!(w, ">")
}

fn write_empty<W: Write>(
    w: &mut W,
    depth: usize,
    tag: &str,
    attrs: &[(&'static str, String)],
) -> std::io::Result<()> {
    write!(w, "{}<{}", indent(depth), tag)?;
    write_attributes(w, attrs)?;
    writeln!(w, "/>")
}

/// Escape XML markup; attribute values also escape quotes and newlines.
fn escape(s: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\'' if attribute => out.push_str("&apos;"),
            '\n' if attribute => out.push_str("&#10;"),
            _ => out.push(c),
        }
    }
    out
}
