use std::collections::BTreeMap;

/// Configured prices for warp purchases, keyed by ownership ordinal: the
/// price at ordinal N is what the Nth warp a player would own costs.
///
/// Pure lookup over static configuration; an unconfigured ordinal means the
/// purchase is not available at all, which is how servers cap warps per
/// player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTable {
    prices: BTreeMap<u32, u32>,
}

impl PriceTable {
    pub fn new(prices: BTreeMap<u32, u32>) -> Self {
        Self { prices }
    }

    /// Price in coins for the given ownership ordinal, or `None` when the
    /// ordinal is not purchasable.
    pub fn price_for(&self, ordinal: u32) -> Option<u32> {
        self.prices.get(&ordinal).copied()
    }

    /// Highest ordinal with a configured price. 0 when the table is empty.
    pub fn max_ordinal(&self) -> u32 {
        self.prices.keys().next_back().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl Default for PriceTable {
    /// Three tiers, matching the bundled template: 100, 250, 500 coins.
    fn default() -> Self {
        let mut prices = BTreeMap::new();
        prices.insert(1, 100);
        prices.insert(2, 250);
        prices.insert(3, 500);
        Self { prices }
    }
}

impl FromIterator<(u32, u32)> for PriceTable {
    fn from_iter<T: IntoIterator<Item = (u32, u32)>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
