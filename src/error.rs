use std::path::PathBuf;

/// Errors that can occur while converting a VCF to CGH.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    Parameter(String),

    #[error("I/O error: {source} ({path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("VCF parsing error at line {line}: {message}")]
    Vcf { line: usize, message: String },

    #[error("coverage file {path} line {line}: {message}")]
    Format {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("SV type '{0}' has no entry in the aberration height table")]
    UnknownSvType(String),

    #[error("variant at {chrom}:{pos} has no SVTYPE")]
    MissingSvType { chrom: String, pos: u64 },

    #[error("variant at {chrom}:{pos} has END but reference allele '{reference}' is not a single base")]
    InvalidReference {
        chrom: String,
        pos: u64,
        reference: String,
    },

    #[error("no coverage records on known contigs in {path}")]
    EmptyCoverage { path: PathBuf },

    #[error("mean coverage on known contigs in {path} is zero")]
    ZeroCoverage { path: PathBuf },
}

impl Error {
    /// Convenience for wrapping an `io::Error` with a path context.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }

    pub(crate) fn format(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            source: err,
            path: PathBuf::from("<unknown>"),
        }
    }
}
