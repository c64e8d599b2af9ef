use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

/// Host-provided lookup from player display names to stable ids.
///
/// The live session registry belongs to the host runtime; warpkeep only
/// needs name resolution for the delete flow and reverse lookup for menu
/// rendering. An unknown name resolves to `None`, which callers treat as
/// "no matching warp" rather than an error.
pub trait PlayerDirectory: Send + Sync {
    /// Resolve a display name to a player id. Case-insensitive, matching
    /// how game servers resolve offline player names.
    fn resolve(&self, name: &str) -> Option<Uuid>;

    /// Current display name for a player id, if known.
    fn display_name(&self, id: Uuid) -> Option<String>;
}

/// In-memory directory for tests and for hosts that push their roster in.
///
/// Keys are lowercased for resolution; the original-cased display name is
/// kept beside the id so reverse lookup returns what the player registered
/// as.
pub struct StaticDirectory {
    by_name: RwLock<HashMap<String, (Uuid, String)>>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self {
            by_name: RwLock::new(HashMap::new()),
        }
    }

    /// Register or update a player's name-to-id mapping.
    pub fn insert(&self, name: &str, id: Uuid) {
        let mut map = self.by_name.write().unwrap();
        map.insert(name.to_lowercase(), (id, name.to_string()));
    }

    pub fn remove(&self, name: &str) {
        let mut map = self.by_name.write().unwrap();
        map.remove(&name.to_lowercase());
    }
}

impl Default for StaticDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerDirectory for StaticDirectory {
    fn resolve(&self, name: &str) -> Option<Uuid> {
        let map = self.by_name.read().unwrap();
        map.get(&name.to_lowercase()).map(|(id, _)| *id)
    }

    fn display_name(&self, id: Uuid) -> Option<String> {
        let map = self.by_name.read().unwrap();
        map.values()
            .find(|(mapped, _)| *mapped == id)
            .map(|(_, name)| name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_case_insensitive() {
        let dir = StaticDirectory::new();
        let id = Uuid::new_v4();
        dir.insert("Alice", id);

        assert_eq!(dir.resolve("alice"), Some(id));
        assert_eq!(dir.resolve("ALICE"), Some(id));
        assert_eq!(dir.resolve("bob"), None);
    }

    #[test]
    fn display_name_keeps_registered_casing() {
        let dir = StaticDirectory::new();
        let id = Uuid::new_v4();
        dir.insert("CaptainAlice", id);

        assert_eq!(dir.resolve("captainalice"), Some(id));
        assert_eq!(dir.display_name(id), Some("CaptainAlice".to_string()));
        assert_eq!(dir.display_name(Uuid::new_v4()), None);

        // Re-registering under new casing updates the display name.
        dir.insert("captainALICE", id);
        assert_eq!(dir.display_name(id), Some("captainALICE".to_string()));
    }

    #[test]
    fn removal_forgets_the_player() {
        let dir = StaticDirectory::new();
        let id = Uuid::new_v4();
        dir.insert("Alice", id);
        dir.remove("alice");
        assert_eq!(dir.resolve("Alice"), None);
    }
}
