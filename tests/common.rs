//! Test utilities & fixtures.
//! Builds a throwaway warp service over a tempdir-backed store. Each test
//! owns its TempDir so the sled files live until the test finishes.

use std::sync::Arc;

use tempfile::TempDir;
use warpkeep::warps::{PriceTable, StaticDirectory, VisitTracker, WarpService, WarpStoreBuilder};

pub struct TestHarness {
    // Held for its Drop; the store path lives inside it.
    pub _dir: TempDir,
    pub service: WarpService,
    #[allow(dead_code)] // Not every test file resolves names.
    pub directory: Arc<StaticDirectory>,
    #[allow(dead_code)] // Not every test file pokes the window directly.
    pub tracker: Arc<VisitTracker>,
}

/// Service with the default three-tier price table (100/250/500).
#[allow(dead_code)]
pub fn harness() -> TestHarness {
    harness_with_prices(PriceTable::default())
}

#[allow(dead_code)]
pub fn harness_with_prices(prices: PriceTable) -> TestHarness {
    let dir = TempDir::new().expect("tempdir");
    let store = WarpStoreBuilder::new(dir.path()).open().expect("store");
    let tracker = Arc::new(VisitTracker::new());
    let directory = Arc::new(StaticDirectory::new());
    let service = WarpService::new(store, tracker.clone(), prices, directory.clone());
    TestHarness {
        _dir: dir,
        service,
        directory,
        tracker,
    }
}
