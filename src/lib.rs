//! # Warpkeep - Player-Owned Warps for Game Servers
//!
//! Warpkeep is a small add-on library for multiplayer game servers that lets
//! players purchase, own, and visit named teleport locations ("warps") inside
//! a shared world. The host runtime owns the world simulation, player
//! sessions, event dispatch, and UI rendering; warpkeep owns the warp records,
//! the purchase pricing, the once-per-window visit counting, and the paginated
//! listing text the host feeds into its menus.
//!
//! ## Features
//!
//! - **Sled-Backed Registry**: Warp records persisted in an embedded
//!   key-value store, flushed on every write.
//! - **Per-Owner Naming**: Warp names are unique per owner, enforced by the
//!   purchase flow before anything reaches storage.
//! - **Visit Deduplication**: A shared in-memory tracker counts each
//!   (warp, visitor) pair at most once per reset window.
//! - **Tiered Pricing**: The Nth warp a player buys is priced from a
//!   configured table; unconfigured ordinals are not purchasable.
//! - **Ban Lists**: Per-warp ban sets enforced at visit time, never at read
//!   time.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use warpkeep::config::Config;
//! use warpkeep::warps::{StaticDirectory, VisitResetTask, VisitTracker, WarpService, WarpStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!
//!     let store = WarpStore::open(config.warps_db_path())?;
//!     let tracker = Arc::new(VisitTracker::new());
//!     let reset = VisitResetTask::spawn(tracker.clone(), config.warps.reset_period());
//!
//!     let directory = Arc::new(StaticDirectory::new());
//!     let service = WarpService::new(store, tracker, config.warps.price_table(), directory);
//!
//!     // ... wire `service` into the host's command and menu handlers ...
//!
//!     reset.shutdown();
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`warps`] - Warp records, registry, visit tracking, pricing, and flows
//! - [`config`] - Configuration management and validation
//! - [`validation`] - Warp-name validation rules
//! - [`logutil`] - Log sanitization helpers for player-provided strings

pub mod config;
pub mod logutil;
pub mod validation;
pub mod warps;
