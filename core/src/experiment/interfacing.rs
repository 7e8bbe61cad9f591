use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::prelude::ExperimentError;

/// Declared timing relationship between two slices. CONCURRENT slices share
/// sequences, SEQUENCE slices alternate sequence by sequence, AVEPERIOD
/// slices alternate averaging period by averaging period, and SCAN slices
/// alternate scan by scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterfacingType {
    Concurrent,
    Sequence,
    Aveperiod,
    Scan,
}

impl fmt::Display for InterfacingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InterfacingType::Concurrent => "CONCURRENT",
            InterfacingType::Sequence => "SEQUENCE",
            InterfacingType::Aveperiod => "AVEPERIOD",
            InterfacingType::Scan => "SCAN",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for InterfacingType {
    type Err = ExperimentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONCURRENT" => Ok(InterfacingType::Concurrent),
            "SEQUENCE" => Ok(InterfacingType::Sequence),
            "AVEPERIOD" => Ok(InterfacingType::Aveperiod),
            "SCAN" => Ok(InterfacingType::Scan),
            other => Err(ExperimentError::InvalidInterfacing(format!(
                "unknown interfacing type {:?}",
                other
            ))),
        }
    }
}

/// Interfacing declarations for a new slice, keyed by existing slice id.
pub type InterfacingDict = BTreeMap<usize, InterfacingType>;

/// Builds the literal declaration maps the experiment definitions pass to
/// `add_slice`.
pub fn interfacing(entries: &[(usize, InterfacingType)]) -> InterfacingDict {
    entries.iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in [
            InterfacingType::Concurrent,
            InterfacingType::Sequence,
            InterfacingType::Aveperiod,
            InterfacingType::Scan,
        ] {
            assert_eq!(kind.to_string().parse::<InterfacingType>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!("PARALLEL".parse::<InterfacingType>().is_err());
    }

    #[test]
    fn interfacing_builder_keeps_all_entries() {
        let dict = interfacing(&[
            (0, InterfacingType::Scan),
            (1, InterfacingType::Scan),
            (2, InterfacingType::Aveperiod),
        ]);
        assert_eq!(dict.len(), 3);
        assert_eq!(dict[&2], InterfacingType::Aveperiod);
    }
}
