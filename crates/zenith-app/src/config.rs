use std::env;
use std::str::FromStr;
use std::time::Duration;

// Runtime settings (not gameplay tuning, see zenith_core::constants).

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_TICK_HZ: u32 = 60;
pub const MAX_TICK_HZ: u32 = 240;
pub const DEFAULT_MISSIONS: u32 = 3;
pub const DEFAULT_MAX_MISSION_SECS: u64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    /// Seeds the simulation, dialogue rolls and the procedural director.
    pub seed: u64,
    pub tick_hz: u32,
    /// Missions played by the headless runner.
    pub missions: u32,
    /// Wall-clock limit per headless mission.
    pub max_mission_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            tick_hz: DEFAULT_TICK_HZ,
            missions: DEFAULT_MISSIONS,
            max_mission_secs: DEFAULT_MAX_MISSION_SECS,
        }
    }
}

impl AppConfig {
    /// Read `ZENITH_*` variables, loading `.env` first when present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable or out-of-range values
    /// fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let tick_hz = parse_or(&lookup, "ZENITH_TICK_HZ", defaults.tick_hz);
        Self {
            seed: parse_or(&lookup, "ZENITH_SEED", defaults.seed),
            tick_hz: if (1..=MAX_TICK_HZ).contains(&tick_hz) {
                tick_hz
            } else {
                defaults.tick_hz
            },
            missions: parse_or(&lookup, "ZENITH_MISSIONS", defaults.missions),
            max_mission_secs: parse_or(&lookup, "ZENITH_MAX_MISSION_SECS", defaults.max_mission_secs),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.tick_hz.max(1)))
    }

    pub fn max_mission_duration(&self) -> Duration {
        Duration::from_secs(self.max_mission_secs)
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(AppConfig::from_lookup(lookup(&[])), AppConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("ZENITH_SEED", "7"),
            ("ZENITH_TICK_HZ", "30"),
            ("ZENITH_MISSIONS", " 5 "),
            ("ZENITH_MAX_MISSION_SECS", "10"),
        ]));
        assert_eq!(config.seed, 7);
        assert_eq!(config.tick_hz, 30);
        assert_eq!(config.missions, 5);
        assert_eq!(config.max_mission_duration(), Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[
            ("ZENITH_SEED", "-1"),
            ("ZENITH_TICK_HZ", "0"),
            ("ZENITH_MISSIONS", "many"),
        ]));
        assert_eq!(config, AppConfig::default());

        let config = AppConfig::from_lookup(lookup(&[("ZENITH_TICK_HZ", "100000")]));
        assert_eq!(config.tick_hz, DEFAULT_TICK_HZ);
    }

    #[test]
    fn test_tick_interval() {
        let config = AppConfig::default();
        assert_eq!(config.tick_interval().as_nanos(), 1_000_000_000u128 / 60);
    }
}
