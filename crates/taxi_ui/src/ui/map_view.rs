//! Slippy-map view: Web-Mercator projection, raster tile layer, trip
//! markers, route line and the simulated fleet.

use eframe::egui::{
    self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, StrokeKind, Ui, Vec2,
};

use taxi_core::ecs::PlacementMode;
use taxi_core::geo::{GeoBounds, GeoPoint};

use crate::app::map_tiles::TileKey;
use crate::app::TaxiMapApp;
use crate::ui::constants::{
    DROPOFF_COLOR, DROPOFF_POPUP_LABEL, FIT_PADDING, MAP_ATTRIBUTION, MAX_ZOOM, MIN_ZOOM,
    PICKUP_COLOR, PICKUP_POPUP_LABEL, ROUTE_COLOR, ROUTE_OPACITY, ROUTE_STROKE_WIDTH, TAXI_COLOR,
};

const TILE_SIZE: f64 = 256.0;
/// Web-Mercator latitude limit.
const LAT_LIMIT: f64 = 85.05112878;

fn world_x(lng: f64, zoom: u8) -> f64 {
    (lng + 180.0) / 360.0 * TILE_SIZE * (1u32 << zoom) as f64
}

fn world_y(lat: f64, zoom: u8) -> f64 {
    let lat = lat.clamp(-LAT_LIMIT, LAT_LIMIT).to_radians();
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) * 0.5;
    y * TILE_SIZE * (1u32 << zoom) as f64
}

fn lng_from_world_x(x: f64, zoom: u8) -> f64 {
    x / (TILE_SIZE * (1u32 << zoom) as f64) * 360.0 - 180.0
}

fn lat_from_world_y(y: f64, zoom: u8) -> f64 {
    let n = y / (TILE_SIZE * (1u32 << zoom) as f64);
    (std::f64::consts::PI * (1.0 - 2.0 * n)).sinh().atan().to_degrees()
}

/// Screen/geo mapping for one frame of the map widget.
pub struct Projection {
    center: GeoPoint,
    zoom: u8,
    rect: Rect,
}

impl Projection {
    pub fn new(center: GeoPoint, zoom: u8, rect: Rect) -> Self {
        Self { center, zoom, rect }
    }

    pub fn to_screen(&self, point: GeoPoint) -> Pos2 {
        let dx = world_x(point.lng, self.zoom) - world_x(self.center.lng, self.zoom);
        let dy = world_y(point.lat, self.zoom) - world_y(self.center.lat, self.zoom);
        Pos2::new(
            self.rect.center().x + dx as f32,
            self.rect.center().y + dy as f32,
        )
    }

    pub fn from_screen(&self, pos: Pos2) -> GeoPoint {
        let x = world_x(self.center.lng, self.zoom) + (pos.x - self.rect.center().x) as f64;
        let y = world_y(self.center.lat, self.zoom) + (pos.y - self.rect.center().y) as f64;
        GeoPoint {
            lat: lat_from_world_y(y, self.zoom),
            lng: lng_from_world_x(x, self.zoom),
        }
    }

    /// New center after a screen-space drag of `delta` pixels.
    pub fn pan(&self, delta: Vec2) -> GeoPoint {
        let x = world_x(self.center.lng, self.zoom) - delta.x as f64;
        let y = world_y(self.center.lat, self.zoom) - delta.y as f64;
        GeoPoint {
            lat: lat_from_world_y(y, self.zoom).clamp(-LAT_LIMIT, LAT_LIMIT),
            lng: lng_from_world_x(x, self.zoom),
        }
    }

    /// Tile keys covering the viewport.
    pub fn visible_tiles(&self) -> Vec<TileKey> {
        let max_index = (1u32 << self.zoom) as i64 - 1;
        let half_w = (self.rect.width() * 0.5) as f64;
        let half_h = (self.rect.height() * 0.5) as f64;
        let cx = world_x(self.center.lng, self.zoom);
        let cy = world_y(self.center.lat, self.zoom);

        let x_start = (((cx - half_w) / TILE_SIZE).floor() as i64).clamp(0, max_index) as u32;
        let x_end = (((cx + half_w) / TILE_SIZE).floor() as i64).clamp(0, max_index) as u32;
        let y_start = (((cy - half_h) / TILE_SIZE).floor() as i64).clamp(0, max_index) as u32;
        let y_end = (((cy + half_h) / TILE_SIZE).floor() as i64).clamp(0, max_index) as u32;

        let mut tiles = Vec::new();
        for x in x_start..=x_end {
            for y in y_start..=y_end {
                tiles.push(TileKey { z: self.zoom, x, y });
            }
        }
        tiles
    }

    /// Screen rectangle a tile occupies.
    pub fn tile_rect(&self, key: TileKey) -> Rect {
        let cx = world_x(self.center.lng, self.zoom);
        let cy = world_y(self.center.lat, self.zoom);
        let min_x = self.rect.center().x + (key.x as f64 * TILE_SIZE - cx) as f32;
        let min_y = self.rect.center().y + (key.y as f64 * TILE_SIZE - cy) as f32;
        Rect::from_min_size(Pos2::new(min_x, min_y), Vec2::splat(TILE_SIZE as f32))
    }
}

/// Largest zoom that fits `bounds` into `size` with `padding` px per side.
pub fn zoom_to_fit(bounds: &GeoBounds, size: Vec2, padding: f32) -> u8 {
    let usable_w = (size.x - 2.0 * padding).max(1.0) as f64;
    let usable_h = (size.y - 2.0 * padding).max(1.0) as f64;
    for zoom in (MIN_ZOOM..=MAX_ZOOM).rev() {
        let span_x = world_x(bounds.lng_max, zoom) - world_x(bounds.lng_min, zoom);
        let span_y = world_y(bounds.lat_min, zoom) - world_y(bounds.lat_max, zoom);
        if span_x <= usable_w && span_y <= usable_h {
            return zoom;
        }
    }
    MIN_ZOOM
}

fn zoom_control_rects(rect: Rect) -> (Rect, Rect) {
    let size = Vec2::splat(28.0);
    let zoom_in = Rect::from_min_size(rect.right_top() + Vec2::new(-40.0, 10.0), size);
    let zoom_out = Rect::from_min_size(rect.right_top() + Vec2::new(-40.0, 44.0), size);
    (zoom_in, zoom_out)
}

/// Paint the map widget and route its interactions back into the app.
pub fn render_map_view(ui: &mut Ui, app: &mut TaxiMapApp) {
    let size = ui.available_size();
    let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
    let (zoom_in_rect, zoom_out_rect) = zoom_control_rects(rect);

    // A fresh route wants the viewport refitted around it.
    if let Some(fit) = app.pending_fit.take() {
        app.viewport.zoom = zoom_to_fit(&fit, rect.size(), FIT_PADDING);
        app.viewport.center = fit.center();
    }

    // Drag pans, scroll steps the zoom, click places a marker.
    if response.dragged() {
        let projection = Projection::new(app.viewport.center, app.viewport.zoom, rect);
        app.viewport.center = projection.pan(response.drag_delta());
    }
    if response.hovered() {
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if scroll > 0.0 {
            app.viewport.zoom = (app.viewport.zoom + 1).min(MAX_ZOOM);
        } else if scroll < 0.0 {
            app.viewport.zoom = app.viewport.zoom.saturating_sub(1).max(MIN_ZOOM);
        }
    }
    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            if !zoom_in_rect.contains(pos) && !zoom_out_rect.contains(pos) {
                let projection = Projection::new(app.viewport.center, app.viewport.zoom, rect);
                app.handle_map_click(projection.from_screen(pos));
            }
        }
    }

    let projection = Projection::new(app.viewport.center, app.viewport.zoom, rect);
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, Color32::from_gray(225));

    let keys = projection.visible_tiles();
    app.map_tiles.request_missing_tiles(keys.iter().copied());
    for key in &keys {
        if let Some(texture) = app.map_tiles.texture(key) {
            painter.image(
                texture.id(),
                projection.tile_rect(*key),
                Rect::from_min_size(Pos2::ZERO, Vec2::splat(1.0)),
                Color32::WHITE,
            );
        }
    }
    app.map_tiles.evict_distant_zooms(app.viewport.zoom);

    if let Some(line) = app.route_line.as_ref() {
        let points: Vec<Pos2> = line.iter().map(|point| projection.to_screen(*point)).collect();
        if points.len() >= 2 {
            painter.add(egui::Shape::line(
                points,
                Stroke::new(ROUTE_STROKE_WIDTH, ROUTE_COLOR.gamma_multiply(ROUTE_OPACITY)),
            ));
        }
    }

    let selection = app.selection();
    if let Some(pickup) = selection.pickup {
        draw_marker(&painter, projection.to_screen(pickup), PICKUP_COLOR);
    }
    if let Some(dropoff) = selection.dropoff {
        draw_marker(&painter, projection.to_screen(dropoff), DROPOFF_COLOR);
    }
    match app.open_popup {
        Some(PlacementMode::Pickup) => {
            if let Some(pickup) = selection.pickup {
                draw_popup(&painter, projection.to_screen(pickup), PICKUP_COLOR, PICKUP_POPUP_LABEL);
            }
        }
        Some(PlacementMode::Dropoff) => {
            if let Some(dropoff) = selection.dropoff {
                draw_popup(&painter, projection.to_screen(dropoff), DROPOFF_COLOR, DROPOFF_POPUP_LABEL);
            }
        }
        None => {}
    }

    for position in app.taxi_positions() {
        draw_taxi(&painter, projection.to_screen(position));
    }

    draw_attribution(&painter, rect);
    render_zoom_controls(ui, zoom_in_rect, zoom_out_rect, app);
}

fn draw_marker(painter: &egui::Painter, pos: Pos2, color: Color32) {
    painter.circle_filled(pos, 7.0, color);
    painter.circle_stroke(pos, 7.0, Stroke::new(2.0, Color32::WHITE));
    painter.circle_filled(pos, 2.5, Color32::WHITE);
}

fn draw_taxi(painter: &egui::Painter, pos: Pos2) {
    painter.circle_filled(pos, 5.0, TAXI_COLOR);
    painter.circle_stroke(pos, 5.0, Stroke::new(1.5, Color32::from_gray(40)));
}

/// Informational label above a marker, the role of the popup the map library
/// used to open on placement.
fn draw_popup(painter: &egui::Painter, anchor: Pos2, dot_color: Color32, label: &str) {
    let galley = painter.layout_no_wrap(
        label.to_string(),
        FontId::proportional(13.0),
        Color32::from_gray(30),
    );
    let dot_radius = 4.0;
    let pad = Vec2::new(8.0, 6.0);
    let size = Vec2::new(
        galley.size().x + dot_radius * 2.0 + pad.x * 2.0 + 4.0,
        galley.size().y + pad.y * 2.0,
    );
    let rect = Rect::from_center_size(anchor + Vec2::new(0.0, -(size.y * 0.5 + 14.0)), size);

    painter.rect_filled(rect, 4.0, Color32::from_rgba_unmultiplied(255, 255, 255, 240));
    painter.rect_stroke(rect, 4.0, Stroke::new(1.0, Color32::from_gray(160)), StrokeKind::Middle);
    let dot_center = Pos2::new(rect.left() + pad.x + dot_radius, rect.center().y);
    painter.circle_filled(dot_center, dot_radius, dot_color);
    painter.galley(
        Pos2::new(dot_center.x + dot_radius + 4.0, rect.top() + pad.y),
        galley,
        Color32::from_gray(30),
    );
}

fn draw_attribution(painter: &egui::Painter, rect: Rect) {
    painter.text(
        rect.left_bottom() + Vec2::new(6.0, -6.0),
        Align2::LEFT_BOTTOM,
        MAP_ATTRIBUTION,
        FontId::proportional(10.0),
        Color32::from_gray(80),
    );
}

fn render_zoom_controls(ui: &mut Ui, zoom_in_rect: Rect, zoom_out_rect: Rect, app: &mut TaxiMapApp) {
    let zoom_in = ui.interact(zoom_in_rect, ui.id().with("map_zoom_in"), Sense::click());
    let zoom_out = ui.interact(zoom_out_rect, ui.id().with("map_zoom_out"), Sense::click());
    if zoom_in.clicked() {
        app.viewport.zoom = (app.viewport.zoom + 1).min(MAX_ZOOM);
    }
    if zoom_out.clicked() {
        app.viewport.zoom = app.viewport.zoom.saturating_sub(1).max(MIN_ZOOM);
    }
    for (rect, label) in [(zoom_in_rect, "+"), (zoom_out_rect, "−")] {
        ui.painter()
            .rect_filled(rect, 3.0, Color32::from_rgba_unmultiplied(255, 255, 255, 220));
        ui.painter()
            .rect_stroke(rect, 3.0, Stroke::new(1.0, Color32::from_gray(100)), StrokeKind::Middle);
        ui.painter().text(
            rect.center(),
            Align2::CENTER_CENTER,
            label,
            FontId::proportional(16.0),
            Color32::BLACK,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_rect() -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))
    }

    #[test]
    fn projection_round_trips_through_the_screen() {
        let projection = Projection::new(GeoPoint::new(43.34116, 52.86192), 13, demo_rect());
        let point = GeoPoint::new(43.3438, 52.8505);
        let back = projection.from_screen(projection.to_screen(point));
        assert!((back.lat - point.lat).abs() < 1e-4);
        assert!((back.lng - point.lng).abs() < 1e-4);
    }

    #[test]
    fn center_projects_to_the_rect_center() {
        let center = GeoPoint::new(43.34116, 52.86192);
        let projection = Projection::new(center, 13, demo_rect());
        let pos = projection.to_screen(center);
        assert_eq!(pos, demo_rect().center());
    }

    #[test]
    fn visible_tiles_cover_the_viewport_at_the_current_zoom() {
        let projection = Projection::new(GeoPoint::new(43.34116, 52.86192), 13, demo_rect());
        let tiles = projection.visible_tiles();
        assert!(!tiles.is_empty());
        assert!(tiles.iter().all(|key| key.z == 13));

        // The tile under the viewport center must be among them.
        let cx = (world_x(52.86192, 13) / TILE_SIZE).floor() as u32;
        let cy = (world_y(43.34116, 13) / TILE_SIZE).floor() as u32;
        assert!(tiles.contains(&TileKey { z: 13, x: cx, y: cy }));
    }

    #[test]
    fn adjacent_tiles_are_seamless_on_screen() {
        let projection = Projection::new(GeoPoint::new(43.34116, 52.86192), 13, demo_rect());
        let key = TileKey { z: 13, x: 100, y: 200 };
        let right = TileKey { z: 13, x: 101, y: 200 };
        let a = projection.tile_rect(key);
        let b = projection.tile_rect(right);
        assert_eq!(a.right(), b.left());
        assert_eq!(a.top(), b.top());
    }

    #[test]
    fn pan_moves_the_center_opposite_to_the_drag() {
        let projection = Projection::new(GeoPoint::new(43.34116, 52.86192), 13, demo_rect());
        let panned = projection.pan(Vec2::new(0.0, 50.0));
        // Dragging the map down reveals terrain further north.
        assert!(panned.lat > 43.34116);
        assert_eq!(panned.lng, 52.86192);
    }

    #[test]
    fn zoom_to_fit_picks_a_deeper_zoom_for_a_smaller_box() {
        let size = Vec2::new(800.0, 600.0);
        let tight = GeoBounds::new(43.34, 43.3401, 52.86, 52.8601);
        let wide = GeoBounds::new(20.0, 60.0, 30.0, 80.0);
        let tight_zoom = zoom_to_fit(&tight, size, FIT_PADDING);
        let wide_zoom = zoom_to_fit(&wide, size, FIT_PADDING);
        assert_eq!(tight_zoom, MAX_ZOOM);
        assert!(wide_zoom < tight_zoom);
    }

    #[test]
    fn zoom_to_fit_respects_the_padding_margin() {
        let size = Vec2::new(800.0, 600.0);
        let bounds = GeoBounds::new(43.327, 43.356, 52.835, 52.89);
        let zoom = zoom_to_fit(&bounds, size, FIT_PADDING);
        let span_x = world_x(bounds.lng_max, zoom) - world_x(bounds.lng_min, zoom);
        let span_y = world_y(bounds.lat_min, zoom) - world_y(bounds.lat_max, zoom);
        assert!(span_x <= (size.x - 2.0 * FIT_PADDING) as f64);
        assert!(span_y <= (size.y - 2.0 * FIT_PADDING) as f64);
        // One step deeper would overflow the padded area on some axis.
        if zoom < MAX_ZOOM {
            let next = zoom + 1;
            let next_x = world_x(bounds.lng_max, next) - world_x(bounds.lng_min, next);
            let next_y = world_y(bounds.lat_min, next) - world_y(bounds.lat_max, next);
            assert!(
                next_x > (size.x - 2.0 * FIT_PADDING) as f64
                    || next_y > (size.y - 2.0 * FIT_PADDING) as f64
            );
        }
    }
}
