use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const WARP_SCHEMA_VERSION: u8 = 1;

/// A world position with orientation, captured from the owner at purchase
/// time and updated only through an explicit relocate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WarpLocation {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

impl WarpLocation {
    pub fn new(world: &str, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.to_string(),
            x,
            y,
            z,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn with_orientation(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }
}

/// A persisted warp: a named, owned teleport destination.
///
/// The record is a snapshot; mutations made on a copy are not visible to
/// anyone else until it is written back through [`WarpStore::upsert`].
///
/// [`WarpStore::upsert`]: crate::warps::WarpStore::upsert
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WarpRecord {
    /// Primary key in storage. Assigned once, never changes.
    pub id: Uuid,
    /// The purchasing player. Immutable after creation.
    pub owner_id: Uuid,
    /// Display-name snapshot of the owner. May go stale if the player
    /// renames; never used as a join key.
    pub owner_name: String,
    /// Warp label, unique per owner (case-sensitive).
    pub name: String,
    pub location: WarpLocation,
    /// Players denied visiting authorization. Set semantics.
    #[serde(default)]
    pub banned: Vec<Uuid>,
    /// Unique-visitor counter, incremented at most once per visitor per
    /// reset window.
    #[serde(default)]
    pub visits: u64,
    pub created_at: DateTime<Utc>,
    pub schema_version: u8,
}

impl WarpRecord {
    /// Create a fresh warp with a new identifier at the given location.
    pub fn new(owner_id: Uuid, owner_name: &str, name: &str, location: WarpLocation) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            owner_name: owner_name.to_string(),
            name: name.to_string(),
            location,
            banned: Vec::new(),
            visits: 0,
            created_at: Utc::now(),
            schema_version: WARP_SCHEMA_VERSION,
        }
    }

    pub fn is_banned(&self, player_id: Uuid) -> bool {
        self.banned.contains(&player_id)
    }

    /// Add a player to the ban list. No-op if already present.
    pub fn ban(&mut self, player_id: Uuid) {
        if !self.banned.contains(&player_id) {
            self.banned.push(player_id);
        }
    }

    /// Remove a player from the ban list. No-op if absent.
    pub fn unban(&mut self, player_id: Uuid) {
        self.banned.retain(|id| *id != player_id);
    }

    pub fn record_visit(&mut self) {
        self.visits = self.visits.saturating_add(1);
    }

    /// Total order used for listing pages: most-visited first, then name,
    /// then id so two warps never compare equal.
    pub fn listing_cmp(&self, other: &Self) -> Ordering {
        other
            .visits
            .cmp(&self.visits)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.id.cmp(&other.id))
    }

    /// One-line summary used by the menu renderers.
    pub fn summary_line(&self) -> String {
        format!(
            "{} | Owner: {} | {} visit{}",
            self.name,
            self.owner_name,
            self.visits,
            if self.visits == 1 { "" } else { "s" }
        )
    }
}
