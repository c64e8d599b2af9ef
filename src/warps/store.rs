use std::path::{Path, PathBuf};

use log::warn;
use sled::IVec;
use uuid::Uuid;

use crate::logutil::escape_log;
use crate::warps::errors::WarpsError;
use crate::warps::types::{WarpRecord, WARP_SCHEMA_VERSION};

const TREE_WARPS: &str = "warps";

const KEY_PREFIX: &str = "warps:";

/// Helper builder so tests can easily create throwaway stores with custom paths.
pub struct WarpStoreBuilder {
    path: PathBuf,
}

impl WarpStoreBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open(self) -> Result<WarpStore, WarpsError> {
        WarpStore::open(self.path)
    }
}

/// Sled-backed persistence for warp records.
///
/// Every write flushes the tree before returning, so a record is durable by
/// the time the calling flow reports success to the player. Absence is a
/// soft result (`None` / `false`), never an error.
pub struct WarpStore {
    _db: sled::Db,
    warps: sled::Tree,
}

impl WarpStore {
    /// Open (or create) the warp store rooted at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, WarpsError> {
        let path_ref = path.as_ref();
        std::fs::create_dir_all(path_ref)?;
        let db = sled::open(path_ref)?;
        let warps = db.open_tree(TREE_WARPS)?;
        Ok(Self { _db: db, warps })
    }

    fn warp_key(id: Uuid) -> Vec<u8> {
        format!("{}{}", KEY_PREFIX, id).into_bytes()
    }

    fn serialize(record: &WarpRecord) -> Result<Vec<u8>, WarpsError> {
        Ok(bincode::serialize(record)?)
    }

    fn deserialize(bytes: IVec) -> Result<WarpRecord, WarpsError> {
        let record: WarpRecord = bincode::deserialize(&bytes)?;
        if record.schema_version != WARP_SCHEMA_VERSION {
            return Err(WarpsError::SchemaMismatch {
                id: record.id,
                expected: WARP_SCHEMA_VERSION,
                found: record.schema_version,
            });
        }
        Ok(record)
    }

    /// Insert or update a warp record, overwriting any record with the same
    /// identifier.
    pub fn upsert(&self, record: &WarpRecord) -> Result<(), WarpsError> {
        let mut record = record.clone();
        record.schema_version = WARP_SCHEMA_VERSION;
        let key = Self::warp_key(record.id);
        let bytes = Self::serialize(&record)?;
        self.warps.insert(key, bytes)?;
        self.warps.flush()?;
        Ok(())
    }

    /// Fetch a warp by identifier. `None` when no such record exists.
    pub fn get(&self, id: Uuid) -> Result<Option<WarpRecord>, WarpsError> {
        let key = Self::warp_key(id);
        let Some(bytes) = self.warps.get(key)? else {
            return Ok(None);
        };
        Ok(Some(Self::deserialize(bytes)?))
    }

    /// Find the warp a player owns under an exact, case-sensitive name.
    pub fn find_named(&self, owner_id: Uuid, name: &str) -> Result<Option<WarpRecord>, WarpsError> {
        for warp in self.all()? {
            if warp.owner_id == owner_id && warp.name == name {
                return Ok(Some(warp));
            }
        }
        Ok(None)
    }

    /// List every warp in the store, in store-enumeration order.
    ///
    /// Callers that need a deterministic order must sort explicitly
    /// (see [`WarpRecord::listing_cmp`]). Records that fail to decode are
    /// skipped and logged; one corrupt entry must not take down every
    /// listing in the game.
    pub fn all(&self) -> Result<Vec<WarpRecord>, WarpsError> {
        let mut list = Vec::new();
        for entry in self.warps.scan_prefix(KEY_PREFIX.as_bytes()) {
            let (key, value) = entry?;
            match Self::deserialize(value) {
                Ok(record) => list.push(record),
                Err(err) => {
                    warn!(
                        "skipping undecodable warp record at key {}: {}",
                        escape_log(&String::from_utf8_lossy(&key)),
                        err
                    );
                }
            }
        }
        Ok(list)
    }

    /// List all warps a player owns.
    pub fn by_owner(&self, owner_id: Uuid) -> Result<Vec<WarpRecord>, WarpsError> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|warp| warp.owner_id == owner_id)
            .collect())
    }

    /// Count the warps a player owns.
    pub fn count_by_owner(&self, owner_id: Uuid) -> Result<usize, WarpsError> {
        Ok(self.by_owner(owner_id)?.len())
    }

    /// Distinct owner display names across all warps, first-seen order.
    pub fn owner_names(&self) -> Result<Vec<String>, WarpsError> {
        let mut names: Vec<String> = Vec::new();
        for warp in self.all()? {
            if !names.contains(&warp.owner_name) {
                names.push(warp.owner_name);
            }
        }
        Ok(names)
    }

    /// Remove a warp by identifier. Returns `false` when the key was already
    /// absent; deletion is idempotent.
    pub fn remove(&self, id: Uuid) -> Result<bool, WarpsError> {
        let key = Self::warp_key(id);
        let existed = self.warps.remove(key)?.is_some();
        self.warps.flush()?;
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warps::types::WarpLocation;
    use tempfile::TempDir;

    fn sample(owner_id: Uuid, owner_name: &str, name: &str) -> WarpRecord {
        WarpRecord::new(
            owner_id,
            owner_name,
            name,
            WarpLocation::new("overworld", 12.5, 64.0, -7.25).with_orientation(90.0, 0.0),
        )
    }

    #[test]
    fn store_round_trip_warp() {
        let dir = TempDir::new().expect("tempdir");
        let store = WarpStoreBuilder::new(dir.path()).open().expect("store");

        let mut warp = sample(Uuid::new_v4(), "Alice", "home");
        warp.visits = 7;
        warp.ban(Uuid::new_v4());
        store.upsert(&warp).expect("upsert");

        let fetched = store.get(warp.id).expect("get").expect("present");
        assert_eq!(fetched, warp);
    }

    #[test]
    fn get_missing_is_none() {
        let dir = TempDir::new().expect("tempdir");
        let store = WarpStoreBuilder::new(dir.path()).open().expect("store");
        assert!(store.get(Uuid::new_v4()).expect("get").is_none());
    }

    #[test]
    fn find_named_is_exact_and_case_sensitive() {
        let dir = TempDir::new().expect("tempdir");
        let store = WarpStoreBuilder::new(dir.path()).open().expect("store");

        let owner = Uuid::new_v4();
        store.upsert(&sample(owner, "Alice", "Home")).expect("upsert");

        assert!(store.find_named(owner, "Home").expect("find").is_some());
        assert!(store.find_named(owner, "home").expect("find").is_none());
        assert!(store.find_named(owner, "Hom").expect("find").is_none());
        assert!(store
            .find_named(Uuid::new_v4(), "Home")
            .expect("find")
            .is_none());
    }

    #[test]
    fn count_matches_by_owner() {
        let dir = TempDir::new().expect("tempdir");
        let store = WarpStoreBuilder::new(dir.path()).open().expect("store");

        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        store.upsert(&sample(alice, "Alice", "home")).expect("upsert");
        store.upsert(&sample(alice, "Alice", "shop")).expect("upsert");
        store.upsert(&sample(bob, "Bob", "dock")).expect("upsert");

        assert_eq!(store.count_by_owner(alice).expect("count"), 2);
        assert_eq!(
            store.by_owner(alice).expect("by_owner").len(),
            store.count_by_owner(alice).expect("count")
        );
        assert_eq!(store.count_by_owner(Uuid::new_v4()).expect("count"), 0);
    }

    #[test]
    fn owner_names_deduplicate() {
        let dir = TempDir::new().expect("tempdir");
        let store = WarpStoreBuilder::new(dir.path()).open().expect("store");

        let alice = Uuid::new_v4();
        store.upsert(&sample(alice, "Alice", "home")).expect("upsert");
        store.upsert(&sample(alice, "Alice", "shop")).expect("upsert");
        store
            .upsert(&sample(Uuid::new_v4(), "Bob", "dock"))
            .expect("upsert");

        let names = store.owner_names().expect("names");
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Alice".to_string()));
        assert!(names.contains(&"Bob".to_string()));
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = TempDir::new().expect("tempdir");
        let store = WarpStoreBuilder::new(dir.path()).open().expect("store");

        let warp = sample(Uuid::new_v4(), "Alice", "home");
        store.upsert(&warp).expect("upsert");

        assert!(store.remove(warp.id).expect("remove"));
        assert!(!store.remove(warp.id).expect("second remove"));
        assert!(store.get(warp.id).expect("get").is_none());
    }

    #[test]
    fn stale_schema_records_fail_get_and_skip_enumeration() {
        let dir = TempDir::new().expect("tempdir");
        let store = WarpStoreBuilder::new(dir.path()).open().expect("store");

        let mut stale = sample(Uuid::new_v4(), "Alice", "relic");
        stale.schema_version = WARP_SCHEMA_VERSION + 1;
        // Bypass upsert, which would restamp the version.
        store
            .warps
            .insert(
                WarpStore::warp_key(stale.id),
                bincode::serialize(&stale).expect("encode"),
            )
            .expect("insert stale");
        store.warps.flush().expect("flush");

        assert!(matches!(
            store.get(stale.id),
            Err(WarpsError::SchemaMismatch { .. })
        ));
        assert!(store.all().expect("all").is_empty());
    }

    #[test]
    fn corrupt_records_are_skipped_in_enumeration() {
        let dir = TempDir::new().expect("tempdir");
        let store = WarpStoreBuilder::new(dir.path()).open().expect("store");

        store
            .upsert(&sample(Uuid::new_v4(), "Alice", "home"))
            .expect("upsert");

        // Plant garbage under the warp prefix directly.
        store
            .warps
            .insert(format!("{}{}", KEY_PREFIX, Uuid::new_v4()).into_bytes(), b"not bincode".to_vec())
            .expect("insert garbage");
        store.warps.flush().expect("flush");

        let all = store.all().expect("all");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "home");
    }
}
