use serde::Serialize;

use crate::decimation::firwin::create_firwin_filter_by_attenuation;
use crate::prelude::ExperimentResult;

/// One low-pass filter + downsample step of a receive chain.
#[derive(Debug, Clone, Serialize)]
pub struct DecimationStage {
    pub stage_num: usize,
    pub input_rate_hz: f64,
    pub dm_rate: u32,
    pub filter_taps: Vec<f64>,
}

impl DecimationStage {
    pub fn new(stage_num: usize, input_rate_hz: f64, dm_rate: u32, filter_taps: Vec<f64>) -> Self {
        Self {
            stage_num,
            input_rate_hz,
            dm_rate,
            filter_taps,
        }
    }

    pub fn output_rate_hz(&self) -> f64 {
        self.input_rate_hz / self.dm_rate as f64
    }

    pub fn num_taps(&self) -> usize {
        self.filter_taps.len()
    }
}

/// Cascaded filter stages reducing the digitizer input rate to the output
/// sample rate handed to data processing.
#[derive(Debug, Clone, Serialize)]
pub struct DecimationScheme {
    pub input_rate_hz: f64,
    pub output_rate_hz: f64,
    pub stages: Vec<DecimationStage>,
}

impl DecimationScheme {
    pub fn new(input_rate_hz: f64, output_rate_hz: f64, stages: Vec<DecimationStage>) -> Self {
        Self {
            input_rate_hz,
            output_rate_hz,
            stages,
        }
    }

    /// Product of the per-stage decimation rates.
    pub fn rate_reduction(&self) -> u32 {
        self.stages.iter().map(|stage| stage.dm_rate).product()
    }

    pub fn num_stages(&self) -> usize {
        self.stages.len()
    }
}

/// The standard four-stage receive chain, 5 MHz down to 10/3 kHz.
pub fn create_default_scheme() -> ExperimentResult<DecimationScheme> {
    let rates = [5.0e6, 500.0e3, 100.0e3, 50.0e3 / 3.0];
    let dm_rates = [10, 5, 6, 5];
    let transition_widths = [150.0e3, 40.0e3, 15.0e3, 1.0e3];
    let cutoffs = [20.0e3, 10.0e3, 10.0e3, 5.0e3];
    let ripple_dbs = [150.0, 80.0, 35.0, 9.0];
    let scaling_factors = [10.0, 100.0, 100.0, 100.0];

    let mut stages = Vec::with_capacity(rates.len());
    for stage in 0..rates.len() {
        let taps = create_firwin_filter_by_attenuation(
            rates[stage],
            transition_widths[stage],
            cutoffs[stage],
            ripple_dbs[stage],
        )?;
        let scaled = taps
            .iter()
            .map(|tap| tap * scaling_factors[stage])
            .collect();
        stages.push(DecimationStage::new(
            stage,
            rates[stage],
            dm_rates[stage],
            scaled,
        ));
    }

    Ok(DecimationScheme::new(
        rates[0],
        rates[rates.len() - 1] / dm_rates[dm_rates.len() - 1] as f64,
        stages,
    ))
}
