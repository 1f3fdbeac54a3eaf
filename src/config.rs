use crate::error::Error;
use crate::genome::Genome;
use crate::params::Parameters;
use crate::probe::PROBE_SPACING;
use crate::variant::VariantFilter;

/// Immutable run configuration, built once from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` when filtering is disabled.
    pub filter: Option<VariantFilter>,
    /// INFO key carrying the population frequency.
    pub frequency_tag: String,
    pub genome: Genome,
    /// Spacing of probes drawn along interval events.
    pub probe_spacing: i64,
    /// Spacing of placeholder probes between events.
    pub gap_probe_spacing: i64,
    /// Width of every probe written.
    pub probe_width: i64,
    /// Window drawn for insertions and breakends.
    pub point_event_window: i64,
    /// Upper clamp for coverage probe heights.
    pub max_height: f64,
    /// Coverage windows merged per probe.
    pub coverage_bin_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filter: Some(VariantFilter::default()),
            frequency_tag: "FRQ".to_string(),
            genome: Genome::grch37(),
            probe_spacing: PROBE_SPACING,
            gap_probe_spacing: 200_000,
            probe_width: 60,
            point_event_window: 1000,
            max_height: 4.0,
            coverage_bin_size: 20,
        }
    }
}

impl Config {
    pub fn from_params(params: &Parameters) -> Result<Self, Error> {
        params.validate()?;

        let filter = if params.no_filter {
            None
        } else {
            Some(VariantFilter::new(params.size, params.frequency))
        };

        Ok(Self {
            filter,
            frequency_tag: params.frequency_tag.clone(),
            coverage_bin_size: params.coverage_bin_size,
            ..Self::default()
        })
    }
}
