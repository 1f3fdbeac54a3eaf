//! Built-in GRCh37 tables used by CytoSure.

/// (name, length) of the assembled chromosomes, in karyotype order.
pub(super) const CONTIG_LENGTHS: &[(&str, u64)] = &[
    ("1", 249_250_621),
    ("2", 243_199_373),
    ("3", 198_022_430),
    ("4", 191_154_276),
    ("5", 180_915_260),
    ("6", 171_115_067),
    ("7", 159_138_663),
    ("8", 146_364_022),
    ("9", 141_213_431),
    ("10", 135_534_747),
    ("11", 135_006_516),
    ("12", 133_851_895),
    ("13", 115_169_878),
    ("14", 107_349_540),
    ("15", 102_531_392),
    ("16", 90_354_753),
    ("17", 81_195_210),
    ("18", 78_077_248),
    ("19", 59_128_983),
    ("20", 63_025_520),
    ("21", 48_129_895),
    ("22", 51_304_566),
    ("X", 155_270_560),
    ("Y", 59_373_566),
];

/// Centromere gap start per chromosome; every gap spans 3 Mb.
pub(super) const CENTROMERES: &[(&str, u64)] = &[
    ("1", 121_535_434),
    ("2", 92_326_171),
    ("3", 90_504_854),
    ("4", 49_660_117),
    ("5", 46_405_641),
    ("6", 58_830_166),
    ("7", 58_054_331),
    ("8", 43_838_887),
    ("9", 47_367_679),
    ("10", 39_254_935),
    ("11", 51_644_205),
    ("12", 34_856_694),
    ("13", 16_000_000),
    ("14", 16_000_000),
    ("15", 17_000_000),
    ("16", 35_335_801),
    ("17", 22_263_006),
    ("18", 15_460_898),
    ("19", 24_681_782),
    ("20", 26_369_569),
    ("21", 11_288_129),
    ("22", 13_000_000),
    ("X", 58_632_012),
    ("Y", 10_104_553),
];

pub(super) const CENTROMERE_LENGTH: u64 = 3_000_000;
pub(super) const TELOMERE_LENGTH: u64 = 10_000;

/// CytoSure numbers the sex chromosomes.
pub(super) const CHROM_RENAME: &[(&str, &str)] = &[("X", "23"), ("Y", "24")];

/// Default log-ratio height drawn for each SV type.
pub(super) const ABERRATION_HEIGHTS: &[(&str, f64)] = &[
    ("DEL", -1.0),
    ("DUP", 0.5),
    ("TDUP", 0.5),
    ("IDUP", 0.5),
    ("CNV", 0.5),
    ("INV", 0.75),
    ("INS", 1.0),
    ("BND", 1.0),
    ("TRA", 1.0),
];
