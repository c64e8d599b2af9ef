//! Text renderers for the host's warp menus.
//!
//! The host runtime owns the actual widgets; this module owns the page math
//! and the strings. Listings are sorted by [`WarpRecord::listing_cmp`] so a
//! page number always means the same slice of warps.

use uuid::Uuid;

use crate::warps::errors::WarpsError;
use crate::warps::service::WarpService;
use crate::warps::types::WarpRecord;

/// Number of pages needed for `total` entries. An empty listing still has
/// one (empty) page so menus always have somewhere to land. A zero page
/// size is clamped to 1 so a bad config value degrades to one-warp pages
/// instead of a panic.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if total == 0 {
        return 1;
    }
    total.div_ceil(page_size.max(1))
}

/// One page of the global warp listing, in deterministic order.
#[derive(Debug, Clone)]
pub struct WarpPage {
    pub page: usize,
    pub pages: usize,
    pub warps: Vec<WarpRecord>,
}

/// Slice out page `page` (0-based) of the full listing.
pub fn warp_page(
    service: &WarpService,
    page: usize,
    page_size: usize,
) -> Result<WarpPage, WarpsError> {
    let page_size = page_size.max(1);
    let mut warps = service.store().all()?;
    warps.sort_by(|a, b| a.listing_cmp(b));

    let pages = page_count(warps.len(), page_size);
    let page = page.min(pages - 1);
    let start = page * page_size;
    let warps = warps
        .into_iter()
        .skip(start)
        .take(page_size)
        .collect();

    Ok(WarpPage { page, pages, warps })
}

/// Render the global warp listing the way the host's list menu shows it:
/// one line per warp, a banned marker for warps the viewer cannot visit,
/// and a footer with the viewer's next purchase price.
pub fn render_warp_listing(
    service: &WarpService,
    viewer: Uuid,
    page: usize,
    page_size: usize,
) -> Result<Vec<String>, WarpsError> {
    let listing = warp_page(service, page, page_size)?;
    let mut lines = Vec::new();

    lines.push(format!(
        "=== Warps (page {}/{}) ===",
        listing.page + 1,
        listing.pages
    ));

    if listing.warps.is_empty() {
        lines.push("No warps yet. Be the first to create one!".to_string());
    }

    for warp in &listing.warps {
        if warp.is_banned(viewer) {
            lines.push(format!("{} [you are banned]", warp.summary_line()));
        } else {
            lines.push(warp.summary_line());
        }
    }

    match service.quote_next_price(viewer)? {
        Some(price) => lines.push(format!("Your next warp costs {} coins.", price)),
        None => lines.push("You cannot purchase any more warps.".to_string()),
    }

    Ok(lines)
}

/// The "My Warps" view: everything the player owns, with ban-list sizes so
/// owners can audit who they have excluded.
pub fn render_owner_warps(service: &WarpService, owner_id: Uuid) -> Result<Vec<String>, WarpsError> {
    let mut warps = service.store().by_owner(owner_id)?;
    warps.sort_by(|a, b| a.listing_cmp(b));

    let mut lines = Vec::new();
    lines.push("=== My Warps ===".to_string());

    if warps.is_empty() {
        lines.push("You do not own any warps.".to_string());
        return Ok(lines);
    }

    for warp in &warps {
        let banned = match warp.banned.len() {
            0 => String::new(),
            1 => " | 1 player banned".to_string(),
            n => format!(" | {} players banned", n),
        };
        lines.push(format!(
            "{} @ {} ({:.0}, {:.0}, {:.0}){}",
            warp.summary_line(),
            warp.location.world,
            warp.location.x,
            warp.location.y,
            warp.location.z,
            banned
        ));
    }

    Ok(lines)
}

/// Command summary shown by the help entry of the warp menu.
pub fn render_help() -> Vec<String> {
    vec![
        "Player warps let other players teleport to locations you have chosen.".to_string(),
        "/warps - list all warps".to_string(),
        "/warps create <name> - create a warp where you are standing".to_string(),
        "/warps delete <name> - delete one of your warps".to_string(),
        "/warps edit <name> - rename or move one of your warps".to_string(),
        "/warps ban <player> - ban a player from your warp".to_string(),
        "/warps unban <player> - lift a ban".to_string(),
        "Visits count each unique player at most once per hour.".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 45), 1);
        assert_eq!(page_count(1, 45), 1);
        assert_eq!(page_count(45, 45), 1);
        assert_eq!(page_count(46, 45), 2);
        assert_eq!(page_count(90, 45), 2);
        assert_eq!(page_count(91, 45), 3);
    }

    #[test]
    fn zero_page_size_clamps_to_one() {
        assert_eq!(page_count(0, 0), 1);
        assert_eq!(page_count(10, 0), 10);
    }

    #[test]
    fn help_mentions_every_command() {
        let help = render_help().join("\n");
        for cmd in ["create", "delete", "edit", "ban", "unban"] {
            assert!(help.contains(cmd), "help is missing '{}'", cmd);
        }
    }
}
