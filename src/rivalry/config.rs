use serde::{Deserialize, Serialize};
use tracing::warn;

/// A named fixed roster taking part in the rivalry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    pub name: String,
    pub players: Vec<String>,
}

impl Roster {
    pub fn new(name: &str, players: [&str; 3]) -> Self {
        Self {
            name: name.to_string(),
            players: players.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// The two rosters whose head-to-head record the rivalry endpoint reports.
/// Always injected through `AppState`; override via the `RIVALRY_ROSTERS`
/// environment variable holding the JSON form of this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RivalryConfig {
    pub roster_a: Roster,
    pub roster_b: Roster,
}

impl Default for RivalryConfig {
    fn default() -> Self {
        Self {
            roster_a: Roster::new(
                "The Orchard",
                ["Sean Nary", "Tyler Pendleton", "Reid Silverman"],
            ),
            roster_b: Roster::new(
                "Dreher",
                ["Jeremy Cortazzo", "Danny Wersching", "AJ Partridge"],
            ),
        }
    }
}

impl RivalryConfig {
    /// Reads `RIVALRY_ROSTERS` from the environment, falling back to the
    /// built-in rosters when unset or malformed.
    pub fn from_env() -> Self {
        match std::env::var("RIVALRY_ROSTERS") {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(config) => config,
                Err(error) => {
                    warn!(%error, "Invalid RIVALRY_ROSTERS, using default rosters");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rosters_have_three_players_each() {
        let config = RivalryConfig::default();
        assert_eq!(config.roster_a.players.len(), 3);
        assert_eq!(config.roster_b.players.len(), 3);
        assert_eq!(config.roster_a.name, "The Orchard");
        assert_eq!(config.roster_b.name, "Dreher");
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = RivalryConfig::default();
        let raw = serde_json::to_string(&config).unwrap();
        let parsed: RivalryConfig = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.roster_b.players, config.roster_b.players);
    }
}
