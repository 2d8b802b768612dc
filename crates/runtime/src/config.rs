//! Runtime configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings of the host loop. Rules tunables live in
/// [`combat_core::CombatConfig`] and are loaded from content files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Overrides the encounter's own seed.
    pub seed: Option<u64>,
    /// Pause awaited after every presented step.
    pub present_delay: Duration,
    /// Capacity of each event bus topic.
    pub event_buffer: usize,
    /// Content directory; `None` means the bundled data.
    pub content_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            present_delay: Duration::ZERO,
            event_buffer: 100,
            content_dir: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_SEED` - Seed override for the encounter (default: encounter seed)
    /// - `COMBAT_PRESENT_DELAY_MS` - Delay after each presented step (default: 0)
    /// - `COMBAT_EVENT_BUFFER` - Event bus capacity per topic (default: 100)
    /// - `COMBAT_CONTENT_DIR` - Content data directory (default: bundled data)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.seed = read_env::<u64>("COMBAT_SEED");

        if let Some(millis) = read_env::<u64>("COMBAT_PRESENT_DELAY_MS") {
            config.present_delay = Duration::from_millis(millis);
        }

        if let Some(capacity) = read_env::<usize>("COMBAT_EVENT_BUFFER") {
            config.event_buffer = capacity.max(1);
        }

        config.content_dir = env::var_os("COMBAT_CONTENT_DIR").map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
