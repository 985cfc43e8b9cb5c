//! Raster tile layer: background fetch threads feed decoded tiles back over
//! an mpsc channel, and the UI thread uploads them as egui textures.

use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{Receiver, Sender};

use eframe::egui::{Context, TextureHandle, TextureOptions};

mod bookkeeping;
mod fetch_decode;
mod types;

pub use types::TileKey;
use types::TileResult;

use crate::ui::constants::TILE_SUBDOMAINS;

pub struct MapTileState {
    tiles: HashMap<TileKey, TextureHandle>,
    inflight: HashSet<TileKey>,
    errors: HashMap<TileKey, String>,
    sender: Sender<TileResult>,
    receiver: Receiver<TileResult>,
    template: String,
}

impl MapTileState {
    pub fn new(template: &str) -> Self {
        let (sender, receiver) = std::sync::mpsc::channel();
        Self {
            tiles: HashMap::new(),
            inflight: HashSet::new(),
            errors: HashMap::new(),
            sender,
            receiver,
            template: template.to_string(),
        }
    }

    /// Upload any finished fetches as textures. Must run on the UI thread.
    pub fn drain_results(&mut self, ctx: &Context) {
        while let Ok(result) = self.receiver.try_recv() {
            if let Some((key, image)) =
                bookkeeping::apply_tile_result(&mut self.inflight, &mut self.errors, result)
            {
                let name = format!("tile-{}-{}-{}", key.z, key.x, key.y);
                let texture = ctx.load_texture(name, image, TextureOptions::LINEAR);
                self.tiles.insert(key, texture);
            }
        }
    }

    /// Kick off fetches for tiles we neither have, nor already asked for,
    /// nor already failed on. A failed key is not refetched.
    pub fn request_missing_tiles<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = TileKey>,
    {
        let mut inflight_count = self.inflight.len();
        for key in keys {
            if self.tiles.contains_key(&key) || self.inflight.contains(&key) {
                continue;
            }
            if self.errors.contains_key(&key) {
                continue;
            }
            let limit = bookkeeping::current_inflight_limit(self.tiles.len());
            if inflight_count >= limit {
                break;
            }
            inflight_count += 1;
            self.inflight.insert(key);
            let sender = self.sender.clone();
            let url = tile_url(&self.template, key);
            std::thread::spawn(move || {
                let result = fetch_decode::fetch_tile(&url, key);
                let _ = sender.send(result);
            });
        }
    }

    pub fn texture(&self, key: &TileKey) -> Option<&TextureHandle> {
        self.tiles.get(key)
    }

    /// Drop cached tiles far from the active zoom once the cache grows past
    /// a screenful-per-zoom budget.
    pub fn evict_distant_zooms(&mut self, zoom: u8) {
        const MAX_CACHED_TILES: usize = 192;
        if self.tiles.len() <= MAX_CACHED_TILES {
            return;
        }
        self.tiles.retain(|key, _| key.z.abs_diff(zoom) <= 1);
        self.errors.retain(|key, _| key.z == zoom);
    }
}

/// Expand the `{s}`/`{z}`/`{x}`/`{y}` placeholders. The subdomain rotates by
/// tile address so requests spread across the mirrors.
pub(crate) fn tile_url(template: &str, key: TileKey) -> String {
    let subdomain = TILE_SUBDOMAINS[(key.x + key.y) as usize % TILE_SUBDOMAINS.len()];
    template
        .replace("{s}", subdomain)
        .replace("{z}", &key.z.to_string())
        .replace("{x}", &key.x.to_string())
        .replace("{y}", &key.y.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_url_expands_all_placeholders() {
        let key = TileKey { z: 13, x: 5297, y: 3157 };
        let url = tile_url("https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png", key);
        assert_eq!(url, "https://a.tile.opentopomap.org/13/5297/3157.png");
    }

    #[test]
    fn subdomain_rotates_with_the_tile_address() {
        let template = "https://{s}.tiles.example/{z}/{x}/{y}.png";
        let first = tile_url(template, TileKey { z: 1, x: 0, y: 0 });
        let second = tile_url(template, TileKey { z: 1, x: 1, y: 0 });
        let third = tile_url(template, TileKey { z: 1, x: 2, y: 0 });
        assert!(first.starts_with("https://a."));
        assert!(second.starts_with("https://b."));
        assert!(third.starts_with("https://c."));
    }
}
