use std::{env, num::NonZeroUsize, str::FromStr, time::Duration};

use crate::{PlaygroundErr, Result};

const DEFAULT_GENERATIONS: usize = 5000;
const DEFAULT_REPORT_MS: u64 = 100;

/// When a run stops and how often it reports on its progress.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverConfig {
    /// Stop after this many steps, `None` trains until another condition is met.
    pub max_generations: Option<NonZeroUsize>,
    /// Stop as soon as the best error is at most this value.
    pub target_error: Option<f32>,
    /// Minimum time between two progress reports, the final one is always emitted.
    pub report_interval: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_generations: NonZeroUsize::new(DEFAULT_GENERATIONS),
            target_error: None,
            report_interval: Duration::from_millis(DEFAULT_REPORT_MS),
        }
    }
}

impl DriverConfig {
    /// Stops after exactly `generations` steps and reports on every one of them.
    pub fn bounded(generations: NonZeroUsize) -> Self {
        Self {
            max_generations: Some(generations),
            target_error: None,
            report_interval: Duration::ZERO,
        }
    }

    /// Reads `GENERATIONS` (`0` for no limit), `TARGET_ERROR` and `REPORT_MS` from the
    /// environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` but reading the variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(generations) = parse::<usize, _>(&lookup, "GENERATIONS")? {
            config.max_generations = NonZeroUsize::new(generations);
        }

        if let Some(target) = parse::<f32, _>(&lookup, "TARGET_ERROR")? {
            if !target.is_finite() || target < 0. {
                return Err(PlaygroundErr::InvalidConfig(format!(
                    "TARGET_ERROR must be a non negative number, got {target}"
                )));
            }

            config.target_error = Some(target);
        }

        if let Some(ms) = parse::<u64, _>(&lookup, "REPORT_MS")? {
            config.report_interval = Duration::from_millis(ms);
        }

        Ok(config)
    }
}

fn parse<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };

    raw.trim()
        .parse()
        .map(Some)
        .map_err(|_| PlaygroundErr::InvalidConfig(format!("{key} must be a number, got '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> Result<DriverConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        DriverConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = lookup(&[]).unwrap();

        assert_eq!(config, DriverConfig::default());
        assert_eq!(config.max_generations.map(NonZeroUsize::get), Some(5000));
        assert_eq!(config.report_interval, Duration::from_millis(100));
    }

    #[test]
    fn overrides() {
        let config = lookup(&[
            ("GENERATIONS", "0"),
            ("TARGET_ERROR", "0.01"),
            ("REPORT_MS", " 250 "),
        ])
        .unwrap();

        assert_eq!(config.max_generations, None);
        assert_eq!(config.target_error, Some(0.01));
        assert_eq!(config.report_interval, Duration::from_millis(250));
    }

    #[test]
    fn rejects_garbage() {
        let err = lookup(&[("GENERATIONS", "many")]).unwrap_err();
        assert!(matches!(err, PlaygroundErr::InvalidConfig(_)));

        assert!(lookup(&[("TARGET_ERROR", "-1")]).is_err());
    }
}
