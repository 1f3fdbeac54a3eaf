pub mod cgh;
pub mod vcf;

use crate::error::Error;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Open a text input, decompressing gzip/bgzip by file extension.
pub fn open_text(path: &Path) -> Result<Box<dyn BufRead + Send>, Error> {
    let path_str = path.to_string_lossy();
    let is_gzipped = path_str.ends_with(".gz") || path_str.ends_with(".bgz");

    let file = File::open(path).map_err(|e| Error::io(e, path))?;

    if is_gzipped {
        // bgzip output is a series of gzip members
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
