use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

// Typed view of the nagios-api `/state` document. Only the fields the
// reports need are decoded; everything else nagios-api sends is ignored.

/// Envelope returned by `GET {url}/state`.
#[derive(Debug, Clone, Deserialize)]
pub struct StateResponse {
    pub content: ClusterState,
}

/// Host name to host status, ordered by host name.
pub type ClusterState = BTreeMap<String, HostState>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostState {
    #[serde(default, deserialize_with = "null_as_default")]
    pub services: BTreeMap<String, ServiceState>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceState {
    #[serde(deserialize_with = "state_code")]
    pub current_state: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub plugin_output: String,
}

impl ServiceState {
    pub fn is_ok(&self) -> bool {
        self.current_state == "0"
    }
}

impl StateResponse {
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

/// nagios-api encodes states as strings ("0".."3"); accept bare integers too.
fn state_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(i64),
    }

    Ok(match Code::deserialize(deserializer)? {
        Code::Text(s) => s,
        Code::Number(n) => n.to_string(),
    })
}

/// `null` decodes like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
