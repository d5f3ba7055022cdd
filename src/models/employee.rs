use serde::{Deserialize, Serialize};

/// Roster entry maintained by the administrator. The PIN is stored only as a
/// SHA-256 digest, never in clear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub pin_hash: Option<String>,
    pub active: bool,
}

impl Employee {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            pin_hash: None,
            active: true,
        }
    }
}
