// src/models/status.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// One entry of `players.list`. API v2 sends bare names, v3 sends records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PlayerRef {
    Name(String),
    NamedWithId { name: String, uuid: Option<Uuid> },
}

impl PlayerRef {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::NamedWithId { name, .. } => name,
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(name) if !name.is_empty() => Some(Self::Name(name)),
            Value::Object(map) => {
                let name = map.get("name")?.as_str()?;
                if name.is_empty() {
                    return None;
                }
                let uuid = map
                    .get("uuid")
                    .and_then(Value::as_str)
                    .and_then(|raw| Uuid::parse_str(raw).ok());
                Some(Self::NamedWithId { name: name.to_string(), uuid })
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Players {
    #[serde(default, deserialize_with = "lenient_count")]
    pub online: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub max: u32,
    #[serde(default, deserialize_with = "lenient_list")]
    pub list: Vec<PlayerRef>,
}

impl Players {
    /// Display names in list order.
    pub fn names(&self) -> Vec<String> {
        self.list.iter().map(|p| p.name().to_string()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatusResponse {
    #[serde(default, deserialize_with = "lenient_bool")]
    pub online: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "lenient_players")]
    pub players: Players,
}

impl StatusResponse {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(d)?, Value::Bool(true)))
}

fn lenient_count<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let count = Value::deserialize(d)?
        .as_u64()
        .map(|n| n.min(u32::MAX as u64) as u32)
        .unwrap_or(0);
    Ok(count)
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) if !s.trim().is_empty() => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn lenient_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<PlayerRef>, D::Error> {
    match Value::deserialize(d)? {
        Value::Array(entries) => Ok(entries.into_iter().filter_map(PlayerRef::from_value).collect()),
        _ => Ok(Vec::new()),
    }
}

fn lenient_players<'de, D: Deserializer<'de>>(d: D) -> Result<Players, D::Error> {
    match Value::deserialize(d)? {
        value @ Value::Object(_) => Ok(serde_json::from_value(value).unwrap_or_default()),
        _ => Ok(Players::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_v2_shape() {
        let status = StatusResponse::from_json(
            r#"{"online":true,"version":"1.20.1","players":{"online":2,"max":20,"list":["Alice","Bob"]}}"#,
        )
        .unwrap();
        assert!(status.online);
        assert_eq!(status.version.as_deref(), Some("1.20.1"));
        assert_eq!(status.players.online, 2);
        assert_eq!(status.players.max, 20);
        assert_eq!(status.players.names(), ["Alice", "Bob"]);
    }

    #[test]
    fn parses_v3_records() {
        let status = StatusResponse::from_json(
            r#"{"online":true,"players":{"online":1,"max":10,"list":[
                {"name":"Alice","uuid":"069a79f4-44e9-4726-a5be-fca90e38aaf5"},
                {"name":"Bob","uuid":"not-a-uuid"}
            ]}}"#,
        )
        .unwrap();
        assert_eq!(status.players.names(), ["Alice", "Bob"]);
        match &status.players.list[0] {
            PlayerRef::NamedWithId { uuid, .. } => assert!(uuid.is_some()),
            other => panic!("unexpected entry {:?}", other),
        }
        match &status.players.list[1] {
            PlayerRef::NamedWithId { uuid, .. } => assert!(uuid.is_none()),
            other => panic!("unexpected entry {:?}", other),
        }
    }

    #[test]
    fn offline_body_defaults_everything() {
        let status = StatusResponse::from_json(r#"{"online":false}"#).unwrap();
        assert_eq!(status, StatusResponse::default());
    }

    #[test]
    fn malformed_fields_fall_back() {
        let status = StatusResponse::from_json(
            r#"{"online":"yes","version":42,"players":{"online":"many","max":-1,"list":[null,7,{"uuid":"x"},"","Steve"]}}"#,
        )
        .unwrap();
        assert!(!status.online);
        assert_eq!(status.version, None);
        assert_eq!(status.players.online, 0);
        assert_eq!(status.players.max, 0);
        assert_eq!(status.players.names(), ["Steve"]);
    }

    #[test]
    fn players_of_wrong_type_is_empty() {
        let status = StatusResponse::from_json(r#"{"online":true,"players":[1,2]}"#).unwrap();
        assert_eq!(status.players, Players::default());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(StatusResponse::from_json("<html>502 Bad Gateway</html>").is_err());
        assert!(StatusResponse::from_json("null").is_err());
    }
}
