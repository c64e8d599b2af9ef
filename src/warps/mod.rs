//! Warp data model, registry, and flows.
//! The store persists warp records in sled, the tracker deduplicates visit
//! counting inside the current reset window, and the service wires both to
//! the pricing table and the host's player directory.

pub mod directory;
pub mod errors;
pub mod menu;
pub mod pricing;
pub mod service;
pub mod store;
pub mod types;
pub mod visits;

pub use directory::{PlayerDirectory, StaticDirectory};
pub use errors::WarpsError;
pub use menu::{page_count, render_help, render_owner_warps, render_warp_listing, warp_page, WarpPage};
pub use pricing::PriceTable;
pub use service::{VisitOutcome, WarpService};
pub use store::{WarpStore, WarpStoreBuilder};
pub use types::{WarpLocation, WarpRecord, WARP_SCHEMA_VERSION};
pub use visits::{VisitResetTask, VisitTracker};
