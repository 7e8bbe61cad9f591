use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::common;

/// Site-specific hardware and orientation options for the radar this
/// control program runs on.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteOptions {
    pub site_id: String,
    pub main_antenna_count: usize,
    pub intf_antenna_count: usize,
    pub main_antenna_spacing_m: f64,
    pub is_forward_radar: bool,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            site_id: "sas".to_string(),
            main_antenna_count: 16,
            intf_antenna_count: 4,
            main_antenna_spacing_m: 15.24,
            is_forward_radar: true,
        }
    }
}

impl SiteOptions {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading site options {}", path_ref.display()))?;
        let options: SiteOptions = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing site options {}", path_ref.display()))?;
        Ok(options)
    }

    /// Range-gate count for this site class.
    pub fn num_ranges(&self) -> u32 {
        if matches!(self.site_id.as_str(), "cly" | "rkn" | "inv") {
            common::POLARDARN_NUM_RANGES
        } else {
            common::STD_NUM_RANGES
        }
    }

    /// Standard 16-beam sweep for this site's scan direction.
    pub fn beams_to_use(&self) -> [usize; 16] {
        if self.is_forward_radar {
            common::STD_16_FORWARD_BEAM_ORDER
        } else {
            common::STD_16_REVERSE_BEAM_ORDER
        }
    }
}
