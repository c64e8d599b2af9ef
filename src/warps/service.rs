use std::sync::Arc;

use log::{debug, info};
use uuid::Uuid;

use crate::logutil::escape_log;
use crate::validation::WarpNameRules;
use crate::warps::directory::PlayerDirectory;
use crate::warps::errors::WarpsError;
use crate::warps::pricing::PriceTable;
use crate::warps::store::WarpStore;
use crate::warps::types::{WarpLocation, WarpRecord};
use crate::warps::visits::VisitTracker;

/// Result of a visit request. `Banned` and `NotFound` are soft outcomes the
/// host renders as chat messages, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum VisitOutcome {
    /// The visitor may be teleported. `first_visit` is true when this pair
    /// had not been counted in the current window, in which case the warp's
    /// visit total was incremented and persisted.
    Arrived {
        warp: WarpRecord,
        first_visit: bool,
    },
    /// The visitor is on the warp's ban list.
    Banned,
    /// No warp with that identifier exists.
    NotFound,
}

/// Composition root for the warp flows: purchase, delete, rename, relocate,
/// ban management, and visit counting.
///
/// One instance owns the storage handle, the shared visit tracker, the price
/// table, and the host's player directory; request handlers receive a
/// reference instead of reaching for globals. Read-modify-write sequences
/// stay inside these methods, which is the critical-section boundary if the
/// host dispatches from more than one thread.
pub struct WarpService {
    store: WarpStore,
    tracker: Arc<VisitTracker>,
    prices: PriceTable,
    directory: Arc<dyn PlayerDirectory>,
    name_rules: WarpNameRules,
}

impl WarpService {
    pub fn new(
        store: WarpStore,
        tracker: Arc<VisitTracker>,
        prices: PriceTable,
        directory: Arc<dyn PlayerDirectory>,
    ) -> Self {
        Self {
            store,
            tracker,
            prices,
            directory,
            name_rules: WarpNameRules::default(),
        }
    }

    pub fn with_name_rules(mut self, rules: WarpNameRules) -> Self {
        self.name_rules = rules;
        self
    }

    pub fn store(&self) -> &WarpStore {
        &self.store
    }

    pub fn tracker(&self) -> &VisitTracker {
        &self.tracker
    }

    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    /// Price of the next warp this player would buy, or `None` when they
    /// have reached the configured ceiling. The host checks affordability
    /// against this quote before calling [`WarpService::create_warp`].
    pub fn quote_next_price(&self, owner_id: Uuid) -> Result<Option<u32>, WarpsError> {
        let owned = self.store.count_by_owner(owner_id)? as u32;
        Ok(self.prices.price_for(owned + 1))
    }

    /// Purchase flow: validate the name, reject duplicates per owner, reject
    /// unpurchasable ordinals, then persist a fresh record at the player's
    /// location.
    pub fn create_warp(
        &self,
        owner_id: Uuid,
        owner_name: &str,
        name: &str,
        location: WarpLocation,
    ) -> Result<WarpRecord, WarpsError> {
        self.name_rules.validate(name)?;

        if self.store.find_named(owner_id, name)?.is_some() {
            return Err(WarpsError::DuplicateName {
                owner_name: owner_name.to_string(),
                name: name.to_string(),
            });
        }

        let ordinal = self.store.count_by_owner(owner_id)? as u32 + 1;
        let Some(price) = self.prices.price_for(ordinal) else {
            return Err(WarpsError::NotPurchasable { ordinal });
        };

        let warp = WarpRecord::new(owner_id, owner_name, name, location);
        self.store.upsert(&warp)?;
        info!(
            "warp '{}' created by {} (ordinal {}, {} coins)",
            escape_log(name),
            escape_log(owner_name),
            ordinal,
            price
        );
        Ok(warp)
    }

    /// Delete a warp by its owner's display name and the warp's name.
    ///
    /// Unresolvable owner names and missing warps are both treated as
    /// "nothing to delete": `Ok(false)`, never an error. Returns `Ok(true)`
    /// only when a record was actually removed.
    pub fn delete_warp(&self, owner_name: &str, warp_name: &str) -> Result<bool, WarpsError> {
        let Some(owner_id) = self.directory.resolve(owner_name) else {
            debug!(
                "delete request for unknown player {}, nothing to do",
                escape_log(owner_name)
            );
            return Ok(false);
        };
        let Some(warp) = self.store.find_named(owner_id, warp_name)? else {
            return Ok(false);
        };
        let removed = self.store.remove(warp.id)?;
        if removed {
            info!(
                "warp '{}' owned by {} deleted",
                escape_log(warp_name),
                escape_log(owner_name)
            );
        }
        Ok(removed)
    }

    /// Rename an owned warp. The new name is re-checked against the
    /// per-owner uniqueness invariant.
    pub fn rename_warp(
        &self,
        owner_id: Uuid,
        old_name: &str,
        new_name: &str,
    ) -> Result<WarpRecord, WarpsError> {
        self.name_rules.validate(new_name)?;

        let Some(mut warp) = self.store.find_named(owner_id, old_name)? else {
            return Err(WarpsError::NotFound(old_name.to_string()));
        };
        if new_name != old_name && self.store.find_named(owner_id, new_name)?.is_some() {
            return Err(WarpsError::DuplicateName {
                owner_name: warp.owner_name.clone(),
                name: new_name.to_string(),
            });
        }

        warp.name = new_name.to_string();
        self.store.upsert(&warp)?;
        Ok(warp)
    }

    /// Move an owned warp to a new location.
    pub fn relocate_warp(
        &self,
        owner_id: Uuid,
        name: &str,
        location: WarpLocation,
    ) -> Result<WarpRecord, WarpsError> {
        let Some(mut warp) = self.store.find_named(owner_id, name)? else {
            return Err(WarpsError::NotFound(name.to_string()));
        };
        warp.location = location;
        self.store.upsert(&warp)?;
        Ok(warp)
    }

    /// Add a player to a warp's ban list and persist the change.
    pub fn ban_player(
        &self,
        owner_id: Uuid,
        warp_name: &str,
        player_id: Uuid,
    ) -> Result<WarpRecord, WarpsError> {
        let Some(mut warp) = self.store.find_named(owner_id, warp_name)? else {
            return Err(WarpsError::NotFound(warp_name.to_string()));
        };
        warp.ban(player_id);
        self.store.upsert(&warp)?;
        Ok(warp)
    }

    /// Remove a player from a warp's ban list and persist the change.
    pub fn unban_player(
        &self,
        owner_id: Uuid,
        warp_name: &str,
        player_id: Uuid,
    ) -> Result<WarpRecord, WarpsError> {
        let Some(mut warp) = self.store.find_named(owner_id, warp_name)? else {
            return Err(WarpsError::NotFound(warp_name.to_string()));
        };
        warp.unban(player_id);
        self.store.upsert(&warp)?;
        Ok(warp)
    }

    /// Authorization check the presentation layer runs before offering a
    /// teleport. Storage reads stay ban-inclusive; this is the policy layer.
    pub fn is_banned_from(&self, warp_id: Uuid, player_id: Uuid) -> Result<bool, WarpsError> {
        Ok(self
            .store
            .get(warp_id)?
            .map(|warp| warp.is_banned(player_id))
            .unwrap_or(false))
    }

    /// Visit flow: enforce the ban list, then count the visitor at most once
    /// per reset window. The increment and the tracker record happen
    /// together so a revisit within the window never double-counts.
    pub fn visit(&self, warp_id: Uuid, visitor: Uuid) -> Result<VisitOutcome, WarpsError> {
        let Some(mut warp) = self.store.get(warp_id)? else {
            return Ok(VisitOutcome::NotFound);
        };
        if warp.is_banned(visitor) {
            return Ok(VisitOutcome::Banned);
        }

        let first_visit = !self.tracker.has_visited(warp_id, visitor);
        if first_visit {
            warp.record_visit();
            self.store.upsert(&warp)?;
            self.tracker.record(warp_id, visitor);
            debug!(
                "counted visit to '{}' ({} total)",
                escape_log(&warp.name),
                warp.visits
            );
        }

        Ok(VisitOutcome::Arrived { warp, first_visit })
    }
}
