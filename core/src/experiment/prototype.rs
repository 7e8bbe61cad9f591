use std::collections::BTreeMap;

use serde_json::json;

use crate::experiment::interfacing::{InterfacingDict, InterfacingType};
use crate::experiment::slice::Slice;
use crate::prelude::{ExperimentError, ExperimentResult};
use crate::telemetry::BuildLog;

/// Default output sample rate after decimation, in Hz.
pub const DEFAULT_OUTPUT_RX_RATE_HZ: f64 = 10.0e3 / 3.0;
/// Default transmit/receive center frequency, in kHz.
pub const DEFAULT_CTR_FREQ_KHZ: f64 = 12000.0;

/// Ordered collection of slices plus their pairwise interfacing
/// declarations; the artifact the control program's validation and
/// sequence-building engine consumes.
#[derive(Debug, Clone)]
pub struct ExperimentPrototype {
    cpid: i32,
    txctrfreq_khz: f64,
    rxctrfreq_khz: f64,
    output_rx_rate_hz: f64,
    comment: String,
    slices: Vec<Slice>,
    slice_interfacing: Vec<InterfacingDict>,
    interfacing: BTreeMap<(usize, usize), InterfacingType>,
    log: BuildLog,
}

impl ExperimentPrototype {
    pub fn new(cpid: i32) -> Self {
        Self {
            cpid,
            txctrfreq_khz: DEFAULT_CTR_FREQ_KHZ,
            rxctrfreq_khz: DEFAULT_CTR_FREQ_KHZ,
            output_rx_rate_hz: DEFAULT_OUTPUT_RX_RATE_HZ,
            comment: String::new(),
            slices: Vec::new(),
            slice_interfacing: Vec::new(),
            interfacing: BTreeMap::new(),
            log: BuildLog::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_ctr_freqs(mut self, txctrfreq_khz: f64, rxctrfreq_khz: f64) -> Self {
        self.txctrfreq_khz = txctrfreq_khz;
        self.rxctrfreq_khz = rxctrfreq_khz;
        self
    }

    pub fn with_output_rx_rate(mut self, output_rx_rate_hz: f64) -> Self {
        self.output_rx_rate_hz = output_rx_rate_hz;
        self
    }

    /// Registers a slice and its interfacing declarations against the
    /// slices already added, returning the new slice id.
    ///
    /// The first slice must not declare interfacing; every later slice must
    /// declare at least one relationship, and only against existing ids.
    /// Graph consistency across all declarations is resolved downstream.
    pub fn add_slice(
        &mut self,
        slice: Slice,
        interfacing: Option<InterfacingDict>,
    ) -> ExperimentResult<usize> {
        let new_id = self.slices.len();
        let dict = interfacing.unwrap_or_default();

        if new_id == 0 {
            if !dict.is_empty() {
                return Err(ExperimentError::InvalidInterfacing(
                    "first slice cannot declare interfacing".to_string(),
                ));
            }
        } else {
            if dict.is_empty() {
                return Err(ExperimentError::InvalidInterfacing(format!(
                    "slice {} must declare interfacing with an existing slice",
                    new_id
                )));
            }
            for &existing_id in dict.keys() {
                if existing_id >= new_id {
                    return Err(ExperimentError::InvalidInterfacing(format!(
                        "slice {} declares interfacing with unknown slice {}",
                        new_id, existing_id
                    )));
                }
            }
        }

        for (&existing_id, &kind) in &dict {
            self.interfacing.insert((existing_id, new_id), kind);
        }
        self.log.record(format!(
            "slice {} registered: {} kHz, {} interfacing entries",
            new_id,
            slice.freq_khz,
            dict.len()
        ));
        self.slices.push(slice);
        self.slice_interfacing.push(dict);
        Ok(new_id)
    }

    pub fn cpid(&self) -> i32 {
        self.cpid
    }

    pub fn txctrfreq_khz(&self) -> f64 {
        self.txctrfreq_khz
    }

    pub fn rxctrfreq_khz(&self) -> f64 {
        self.rxctrfreq_khz
    }

    pub fn output_rx_rate_hz(&self) -> f64 {
        self.output_rx_rate_hz
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn num_slices(&self) -> usize {
        self.slices.len()
    }

    /// All accumulated pairwise declarations, keyed (earlier id, later id).
    pub fn interfacing(&self) -> &BTreeMap<(usize, usize), InterfacingType> {
        &self.interfacing
    }

    /// The declaration dict the given slice was registered with.
    pub fn interfacing_for(&self, slice_id: usize) -> Option<&InterfacingDict> {
        self.slice_interfacing.get(slice_id)
    }

    pub fn build_log(&self) -> &BuildLog {
        &self.log
    }

    /// The resolved configuration, as printed by the offline driver.
    pub fn summary(&self) -> serde_json::Value {
        let interfacing: Vec<serde_json::Value> = self
            .interfacing
            .iter()
            .map(|((first, second), kind)| json!([first, second, kind.to_string()]))
            .collect();
        json!({
            "cpid": self.cpid,
            "txctrfreq_khz": self.txctrfreq_khz,
            "rxctrfreq_khz": self.rxctrfreq_khz,
            "output_rx_rate_hz": self.output_rx_rate_hz,
            "comment": self.comment,
            "num_slices": self.slices.len(),
            "slices": self.slices.iter().map(Slice::summary).collect::<Vec<_>>(),
            "interfacing": interfacing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::interfacing::interfacing;

    fn test_slice(freq_khz: u32) -> Slice {
        Slice {
            freq_khz,
            ..Default::default()
        }
    }

    #[test]
    fn slice_ids_are_sequential() {
        let mut experiment = ExperimentPrototype::new(3581);
        let first = experiment.add_slice(test_slice(10500), None).unwrap();
        let second = experiment
            .add_slice(
                test_slice(13000),
                Some(interfacing(&[(0, InterfacingType::Concurrent)])),
            )
            .unwrap();
        assert_eq!((first, second), (0, 1));
        assert_eq!(experiment.num_slices(), 2);
        assert_eq!(
            experiment.interfacing()[&(0, 1)],
            InterfacingType::Concurrent
        );
    }

    #[test]
    fn first_slice_rejects_interfacing() {
        let mut experiment = ExperimentPrototype::new(1);
        let result = experiment.add_slice(
            test_slice(10500),
            Some(interfacing(&[(0, InterfacingType::Scan)])),
        );
        assert!(result.is_err());
    }

    #[test]
    fn later_slices_require_interfacing_with_existing_ids() {
        let mut experiment = ExperimentPrototype::new(1);
        experiment.add_slice(test_slice(10500), None).unwrap();

        assert!(experiment.add_slice(test_slice(12000), None).is_err());
        // forward reference
        let forward = experiment.add_slice(
            test_slice(12000),
            Some(interfacing(&[(1, InterfacingType::Scan)])),
        );
        assert!(forward.is_err());
    }

    #[test]
    fn builder_methods_override_defaults() {
        let experiment = ExperimentPrototype::new(3700)
            .with_comment("ICEBEAR collab")
            .with_ctr_freqs(10900.0, 10900.0)
            .with_output_rx_rate(10.0e3);
        assert_eq!(experiment.cpid(), 3700);
        assert_eq!(experiment.comment(), "ICEBEAR collab");
        assert_eq!(experiment.txctrfreq_khz(), 10900.0);
        assert_eq!(experiment.output_rx_rate_hz(), 10.0e3);
    }

    #[test]
    fn registration_is_logged_and_summarized() {
        let mut experiment = ExperimentPrototype::new(404);
        experiment.add_slice(test_slice(10500), None).unwrap();
        experiment
            .add_slice(
                test_slice(12000),
                Some(interfacing(&[(0, InterfacingType::Aveperiod)])),
            )
            .unwrap();

        assert_eq!(experiment.build_log().lines().len(), 2);
        let summary = experiment.summary();
        assert_eq!(summary["num_slices"], 2);
        assert_eq!(summary["interfacing"][0][2], "AVEPERIOD");
    }
}
