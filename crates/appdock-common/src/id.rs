use serde::{Deserialize, Serialize};
use std::fmt;

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(new_id())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }
    };
}

string_id!(
    /// Identifies a profile, the root scope that owns workspaces.
    ProfileId
);
string_id!(
    /// Identifies a workspace within a profile.
    WorkspaceId
);
string_id!(
    /// Identifies a registered web app instance.
    AppId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_id_is_valid_uuid() {
        let id = new_id();
        let parsed = uuid::Uuid::parse_str(&id);
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap().get_version_num(), 4);
    }

    #[test]
    fn typed_ids_are_unique() {
        assert_ne!(AppId::new(), AppId::new());
        assert_ne!(WorkspaceId::new(), WorkspaceId::new());
    }

    #[test]
    fn typed_id_display_matches_raw() {
        let id = AppId::from("mail");
        assert_eq!(id.to_string(), "mail");
        assert_eq!(id.as_str(), "mail");
    }

    #[test]
    fn typed_id_serializes_as_plain_string() {
        let id = WorkspaceId::from("ws-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ws-1\"");
        let back: WorkspaceId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn typed_id_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ProfileId::from("p"));
        set.insert(ProfileId::from("p"));
        set.insert(ProfileId::from("q"));
        assert_eq!(set.len(), 2);
    }
}
