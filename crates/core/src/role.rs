//! Speaker roles

use serde::{Deserialize, Serialize};

/// Speaker role of a transcript line
///
/// Only the literal value `"manager"` is scanned for insights. Every other
/// value is carried through verbatim so the output row matches the input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Sales manager (the only scanned role)
    Manager,
    /// Any other speaker, kept as written in the transcript
    Other(String),
}

impl Role {
    /// Literal role value that enables insight scanning
    pub const MANAGER: &'static str = "manager";

    /// Whether lines spoken in this role are scanned for insights
    pub fn is_manager(&self) -> bool {
        matches!(self, Role::Manager)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Manager => Self::MANAGER,
            Role::Other(role) => role,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        if value == Self::MANAGER {
            Role::Manager
        } else {
            Role::Other(value)
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Manager => Role::MANAGER.to_string(),
            Role::Other(role) => role,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_is_exact_match() {
        assert!(Role::from("manager").is_manager());
        assert!(!Role::from("Manager").is_manager());
        assert!(!Role::from(" manager").is_manager());
        assert!(!Role::from("client").is_manager());
    }

    #[test]
    fn test_other_role_round_trips_verbatim() {
        let role = Role::from("Client");
        assert_eq!(role.as_str(), "Client");
        assert_eq!(String::from(role), "Client");
    }

    #[test]
    fn test_role_serde() {
        let role: Role = serde_json::from_str("\"manager\"").unwrap();
        assert_eq!(role, Role::Manager);
        assert_eq!(serde_json::to_string(&Role::from("client")).unwrap(), "\"client\"");
    }
}
