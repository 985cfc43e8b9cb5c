use std::collections::{HashMap, HashSet};

use eframe::egui::ColorImage;

use super::types::{TileKey, TileResult};

/// Cap on concurrently running tile fetches; smaller while the first
/// screenful is still loading so the visible view fills in first.
pub(crate) fn current_inflight_limit(loaded: usize) -> usize {
    const WARMUP_TILES: usize = 6;
    const WARMUP_LIMIT: usize = 4;
    const MAX_LIMIT: usize = 12;
    if loaded >= WARMUP_TILES {
        MAX_LIMIT
    } else {
        WARMUP_LIMIT
    }
}

/// Settle one finished fetch: clear its in-flight slot, record a failure, or
/// hand the decoded image back for texture upload.
pub(crate) fn apply_tile_result(
    inflight: &mut HashSet<TileKey>,
    errors: &mut HashMap<TileKey, String>,
    result: TileResult,
) -> Option<(TileKey, ColorImage)> {
    inflight.remove(&result.key);
    if let Some(error) = result.error {
        tracing::debug!(key = ?result.key, %error, "tile fetch failed");
        errors.insert(result.key, error);
        return None;
    }
    result.image.map(|image| (result.key, image))
}
