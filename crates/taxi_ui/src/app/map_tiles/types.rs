use eframe::egui::ColorImage;

/// Slippy-map tile address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

pub(crate) struct TileResult {
    pub key: TileKey,
    pub image: Option<ColorImage>,
    pub error: Option<String>,
}

impl TileResult {
    pub(crate) fn failed(key: TileKey, error: String) -> Self {
        Self {
            key,
            image: None,
            error: Some(error),
        }
    }
}
