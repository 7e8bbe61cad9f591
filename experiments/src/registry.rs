use anyhow::bail;
use expcore::experiment::ExperimentPrototype;

use crate::kwargs::Kwargs;
use crate::modes;
use crate::site::SiteOptions;

type Builder = fn(&SiteOptions, &Kwargs) -> anyhow::Result<ExperimentPrototype>;

const MODES: &[(&str, Builder)] = &[
    ("dm_test", modes::dm_test::build),
    ("eeaao", modes::eeaao::build),
    ("epopsound", modes::epopsound::build),
    ("full_fov", modes::full_fov::build),
    ("full_fov_60deg", modes::full_fov_60deg::build),
    ("full_fov_normalscan_comp", modes::full_fov_normalscan_comp::build),
    ("ib_collab", modes::ib_collab::build),
    ("impt_test", modes::impt_test::build),
    ("interleavesound", modes::interleavesound::build),
    ("listening_normalscan", modes::listening_normalscan::build),
    ("multifreq_tuning", modes::multifreq_tuning::build),
    ("noise_search", modes::noise_search::build),
    ("normalscan_single_beam", modes::normalscan_single_beam::build),
    ("phase_encoding_test", modes::phase_encoding_test::build),
    ("power_meter_mode", modes::power_meter_mode::build),
    ("pulse_codes_test", modes::pulse_codes_test::build),
    ("two_multifsound", modes::two_multifsound::build),
    ("widebeam_2tx", modes::widebeam_2tx::build),
];

pub fn names() -> Vec<&'static str> {
    MODES.iter().map(|(name, _)| *name).collect()
}

pub fn build(
    name: &str,
    site: &SiteOptions,
    kwargs: &Kwargs,
) -> anyhow::Result<ExperimentPrototype> {
    for (mode_name, builder) in MODES {
        if *mode_name == name {
            return builder(site, kwargs);
        }
    }
    bail!("unknown experiment {:?} (use --list to see the registry)", name);
}
