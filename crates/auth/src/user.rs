//! The signed-in operator as resolved by `currentUser`.

use serde::{Deserialize, Serialize};

use crate::Role;

/// Agency (ISP tenant) the user belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgencyRef {
    pub id: String,
    pub name: String,
}

/// Result of `currentUser` for one server render.
///
/// Owned by the session gate for the lifetime of a single render; never
/// cached across requests. Fields the backend leaves out deserialize to
/// empty values so that the gate, not the decoder, decides what is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub agency: Option<AgencyRef>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl AuthenticatedUser {
    /// First letter of the display name, used for the avatar badge.
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('U')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_full_payload() {
        let user: AuthenticatedUser = serde_json::from_value(json!({
            "id": "u1",
            "name": "Ann",
            "email": "ann@example.com",
            "agency": { "id": "ag1", "name": "Nairobi Fibre" },
            "roles": ["admin", "support"]
        }))
        .unwrap();

        assert_eq!(user.agency.as_ref().map(|a| a.name.as_str()), Some("Nairobi Fibre"));
        assert_eq!(user.roles, vec![Role::new("admin"), Role::new("support")]);
        assert_eq!(user.initial(), 'A');
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let user: AuthenticatedUser = serde_json::from_value(json!({
            "id": "u2",
            "agency": null
        }))
        .unwrap();

        assert!(user.name.is_empty());
        assert!(user.agency.is_none());
        assert!(user.roles.is_empty());
        assert_eq!(user.initial(), 'U');
    }
}
