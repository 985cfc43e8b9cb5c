use std::time::Duration;

use eframe::egui::ColorImage;

use super::types::{TileKey, TileResult};

const TILE_TIMEOUT: Duration = Duration::from_secs(3);
const TILE_USER_AGENT: &str = concat!("taxi-map-demo/", env!("CARGO_PKG_VERSION"));

pub(crate) fn fetch_tile(url: &str, key: TileKey) -> TileResult {
    let client = match reqwest::blocking::Client::builder()
        .timeout(TILE_TIMEOUT)
        .user_agent(TILE_USER_AGENT)
        .build()
    {
        Ok(client) => client,
        Err(err) => return TileResult::failed(key, err.to_string()),
    };
    let response = match client.get(url).send() {
        Ok(response) => response,
        Err(err) => return TileResult::failed(key, err.to_string()),
    };
    if !response.status().is_success() {
        return TileResult::failed(key, format!("status {}", response.status()));
    }
    let bytes = match response.bytes() {
        Ok(bytes) => bytes,
        Err(err) => return TileResult::failed(key, err.to_string()),
    };
    match decode_tile_image(&bytes) {
        Ok(image) => TileResult {
            key,
            image: Some(image),
            error: None,
        },
        Err(err) => TileResult::failed(key, err),
    }
}

fn decode_tile_image(bytes: &[u8]) -> Result<ColorImage, String> {
    let decoded = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        assert!(decode_tile_image(&[0u8; 16]).is_err());
        assert!(decode_tile_image(&[]).is_err());
    }
}
