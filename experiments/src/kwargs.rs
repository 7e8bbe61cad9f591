use anyhow::Context;
use std::collections::BTreeMap;

/// Optional per-run experiment arguments, as handed to the control program
/// by the scheduler at start time.
#[derive(Clone, Debug, Default)]
pub struct Kwargs {
    values: BTreeMap<String, String>,
}

impl Kwargs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `key=value` pairs from the command line.
    pub fn from_pairs(pairs: &[String]) -> anyhow::Result<Self> {
        let mut values = BTreeMap::new();
        for pair in pairs {
            let (key, value) = pair
                .split_once('=')
                .with_context(|| format!("argument {:?} is not of the form key=value", pair))?;
            values.insert(key.trim().to_string(), value.trim().to_string());
        }
        Ok(Self { values })
    }

    /// Builds a set from literal entries.
    pub fn of(entries: &[(&str, &str)]) -> Self {
        let values = entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn get_u32(&self, key: &str) -> anyhow::Result<Option<u32>> {
        match self.values.get(key) {
            Some(raw) => {
                let value = raw
                    .parse::<u32>()
                    .with_context(|| format!("argument {} is not an integer: {:?}", key, raw))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
