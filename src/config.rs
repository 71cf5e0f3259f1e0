use engine::constant::{DEFAULT_DEPTH, MAX_DEPTH};
use engine::Side;
use tracing::warn;

/// Game settings read from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Search depth of the automated opponent, in plies.
    pub depth: u32,
    /// Side played from stdin; `None` lets the engine play both sides.
    pub human: Option<Side>,
    /// Self-play stops after this many plies.
    pub max_plies: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = AppConfig::default();
        let depth = match lookup("CHESS_AI_DEPTH").map(|v| v.parse::<u32>()) {
            None => defaults.depth,
            Some(Ok(depth)) if (1..=MAX_DEPTH).contains(&depth) => depth,
            Some(_) => {
                warn!("CHESS_AI_DEPTH must be 1..={MAX_DEPTH}, using {}", defaults.depth);
                defaults.depth
            }
        };
        let human = match lookup("CHESS_HUMAN_SIDE").as_deref() {
            None => defaults.human,
            Some("none") => None,
            Some(value) => value.parse().map(Some).unwrap_or_else(|_| {
                warn!("unknown CHESS_HUMAN_SIDE {value}, using light");
                defaults.human
            }),
        };
        let max_plies = match lookup("CHESS_MAX_PLIES").map(|v| v.parse::<u32>()) {
            None => defaults.max_plies,
            Some(Ok(plies)) => plies,
            Some(Err(_)) => {
                warn!("CHESS_MAX_PLIES must be a number, using {}", defaults.max_plies);
                defaults.max_plies
            }
        };
        AppConfig { depth, human, max_plies }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            depth: DEFAULT_DEPTH,
            human: Some(Side::Light),
            max_plies: 200,
        }
    }
}
