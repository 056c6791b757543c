//! Snapshot document persisted in the data directory.

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Player/game state captured at a point in time.
///
/// The shape of individual player records, stats and messages is owned by
/// the game, so they are kept as raw JSON. Top-level keys this type does not
/// know about are carried in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: NaiveDateTime,
    pub server_ip: String,
    #[serde(default)]
    pub players: Map<String, Value>,
    #[serde(default)]
    pub game_stats: Map<String, Value>,
    #[serde(default)]
    pub messages: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlayerSnapshot {
    /// Empty snapshot stamped with the current local time.
    pub fn skeleton(server_ip: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now().naive_local(),
            server_ip: server_ip.into(),
            players: Map::new(),
            game_stats: Map::new(),
            messages: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Overlay the top-level fields of a persisted document on this snapshot.
    ///
    /// Persisted values win; fields it lacks keep their fresh values. A
    /// well-known field whose value has the wrong shape is skipped on its
    /// own, so one odd field never discards the rest of the document.
    pub fn merged_with(self, persisted: Map<String, Value>) -> Result<Self, serde_json::Error> {
        let Value::Object(mut fields) = serde_json::to_value(self)? else {
            return Err(serde::de::Error::custom("snapshot did not serialize to an object"));
        };

        for (key, value) in persisted {
            if fits_known_field(&key, &value) {
                fields.insert(key, value);
            } else {
                warn!("Ignoring persisted '{}' with unexpected value {}", key, value);
            }
        }

        serde_json::from_value(Value::Object(fields))
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.game_stats.is_empty() && self.messages.is_empty()
    }
}

fn fits_known_field(key: &str, value: &Value) -> bool {
    match key {
        "timestamp" => value.as_str().and_then(parse_timestamp).is_some(),
        "server_ip" => value.is_string(),
        "players" | "game_stats" => value.is_object(),
        "messages" => value.is_array(),
        _ => true,
    }
}

/// Naive ISO-8601 as written by this agent, or RFC 3339 with an offset
/// (e.g. a browser's `toISOString()`), converted to local time.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Some(naive);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognised timestamp '{}'", raw)))
}
