//! Zeichnet die egui-Karte und übersetzt Maus-Eingaben in Karten-Events.

use super::surface::{Cluster, EguiSurface};
use crate::core::{geo, IconTint, IconVariant, LatLng};
use crate::surface::{ClusterLayer, ControlPosition, MapSurface, SurfaceEvent};

const CONTROL_SIZE: f32 = 28.0;
const CONTROL_MARGIN: f32 = 10.0;
const SCALE_MAX_WIDTH: f32 = 100.0;
/// Meter pro Pixel am Äquator bei Zoom 0
const EQUATOR_METERS_PER_PIXEL: f64 = 156_543.033_92;
/// Scroll-Pixel pro Zoomstufe
const SCROLL_PIXELS_PER_ZOOM: f64 = 240.0;

/// Rückgabe von [`render_map`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MapViewResponse {
    /// Belegte Fläche weicht von der übernommenen Viewport-Größe ab
    pub resized: bool,
}

/// Zeichnet die Karte in den verfügbaren Platz und verarbeitet Eingaben.
pub fn render_map(
    ui: &mut egui::Ui,
    surface: &mut EguiSurface,
    show_tiles: bool,
) -> MapViewResponse {
    let (rect, response) =
        ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
    let resized = surface.observe_viewport(rect);
    surface.tick(f64::from(ui.input(|i| i.stable_dt)));

    handle_input(ui, &response, surface, rect);

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, egui::Color32::from_gray(225));
    if show_tiles {
        paint_tiles(ui, surface, rect);
    }
    paint_markers(&painter, surface);
    paint_popup(ui, surface);
    paint_controls(&painter, surface, rect);

    MapViewResponse { resized }
}

fn handle_input(
    ui: &egui::Ui,
    response: &egui::Response,
    surface: &mut EguiSurface,
    rect: egui::Rect,
) {
    if response.gained_focus() {
        surface.emit(SurfaceEvent::Focus);
    }

    if response.dragged() {
        surface.pan_by_pixels(response.drag_delta());
    }

    if surface.scroll_wheel_zoom() && response.hovered() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll != 0.0 {
            if let Some(pos) = response.hover_pos() {
                surface.zoom_around(f64::from(scroll) / SCROLL_PIXELS_PER_ZOOM, pos);
            }
        }
    }

    if !response.clicked() {
        return;
    }
    response.request_focus();
    let Some(pos) = response.interact_pointer_pos() else {
        return;
    };

    if let Some((popup, url)) = popup_rect(surface) {
        if popup.contains(pos) {
            if !url.is_empty() {
                ui.ctx().open_url(egui::OpenUrl::new_tab(url));
            }
            return;
        }
    }

    if surface.options().zoom_home_control && zoom_home_rect(rect).contains(pos) {
        surface.emit(SurfaceEvent::ZoomHome);
        return;
    }

    match hit_test(surface, pos) {
        Some(cluster) if cluster.is_single() => {
            let marker = cluster.members[0];
            if let Err(e) = surface.open_popup(marker) {
                log::warn!("Popup für {} nicht geöffnet: {}", marker, e);
            }
        }
        Some(cluster) => surface.expand_cluster(&cluster),
        None => {
            surface.close_popup();
            surface.emit(SurfaceEvent::Click);
        }
    }
}

/// Oberster Cluster/Marker unter dem Mauszeiger.
fn hit_test(surface: &EguiSurface, pos: egui::Pos2) -> Option<Cluster> {
    surface.clusters().into_iter().rev().find(|cluster| {
        if cluster.is_single() {
            marker_rect(surface, cluster).is_some_and(|r| r.contains(pos))
        } else {
            let center = surface.world_to_screen(cluster.center_px);
            center.distance(pos) <= cluster_radius(cluster.members.len())
        }
    })
}

fn marker_rect(surface: &EguiSurface, cluster: &Cluster) -> Option<egui::Rect> {
    let marker = surface.marker(cluster.members[0])?;
    let tip = surface.geo_to_screen(marker.coord);
    let min = tip - egui::vec2(marker.icon.anchor[0], marker.icon.anchor[1]);
    Some(egui::Rect::from_min_size(
        min,
        egui::vec2(marker.icon.size[0], marker.icon.size[1]),
    ))
}

fn cluster_radius(count: usize) -> f32 {
    match count {
        0..=9 => 16.0,
        10..=99 => 20.0,
        _ => 24.0,
    }
}

fn paint_tiles(ui: &egui::Ui, surface: &EguiSurface, rect: egui::Rect) {
    let layer = &surface.options().tile_layer;
    let zoom = surface.zoom_level();
    let tile_zoom = zoom.round().clamp(f64::from(layer.min_zoom), f64::from(layer.max_zoom));
    let scale = 2f64.powf(zoom - tile_zoom);
    let tile_px = geo::TILE_SIZE * scale;

    let size = surface.size();
    let origin = surface.project(surface.center())
        - glam::DVec2::new(f64::from(size.x) / 2.0, f64::from(size.y) / 2.0);
    let tiles_per_axis = 2f64.powf(tile_zoom);

    let x_start = (origin.x / tile_px).floor() as i64;
    let x_end = ((origin.x + f64::from(size.x)) / tile_px).floor() as i64;
    let y_start = ((origin.y / tile_px).floor() as i64).max(0);
    let y_end = (((origin.y + f64::from(size.y)) / tile_px).floor() as i64)
        .min(tiles_per_axis as i64 - 1);

    for y in y_start..=y_end {
        for x in x_start..=x_end {
            let wrapped_x = x.rem_euclid(tiles_per_axis as i64) as u32;
            let url = layer.tile_url(tile_zoom as u8, wrapped_x, y as u32);
            let min = rect.min
                + egui::vec2(
                    (x as f64 * tile_px - origin.x) as f32,
                    (y as f64 * tile_px - origin.y) as f32,
                );
            let tile_rect = egui::Rect::from_min_size(min, egui::Vec2::splat(tile_px as f32));
            egui::Image::new(url).paint_at(ui, tile_rect);
        }
    }
}

fn paint_markers(painter: &egui::Painter, surface: &EguiSurface) {
    for cluster in surface.clusters() {
        if cluster.is_single() {
            paint_single_marker(painter, surface, &cluster);
        } else {
            paint_cluster(painter, surface, &cluster);
        }
    }
}

fn paint_single_marker(painter: &egui::Painter, surface: &EguiSurface, cluster: &Cluster) {
    let Some(marker) = surface.marker(cluster.members[0]) else {
        return;
    };
    let tip = surface.geo_to_screen(marker.coord);
    let [width, height] = marker.icon.size;
    let head = tip - egui::vec2(0.0, height * 0.62);
    let radius = width * 0.32;

    let (fill, outline) = match marker.icon.tint {
        IconTint::Dark => (egui::Color32::from_gray(45), egui::Color32::WHITE),
        IconTint::Light => (egui::Color32::from_gray(240), egui::Color32::from_gray(45)),
    };
    let stroke = egui::Stroke::new(1.5, outline);

    painter.add(egui::Shape::convex_polygon(
        vec![
            tip,
            head + egui::vec2(-radius * 0.8, radius * 0.6),
            head + egui::vec2(radius * 0.8, radius * 0.6),
        ],
        fill,
        stroke,
    ));
    painter.circle(head, radius, fill, stroke);

    if marker.icon.variant == IconVariant::Featured {
        painter.text(
            head,
            egui::Align2::CENTER_CENTER,
            "★",
            egui::FontId::proportional(radius * 1.3),
            egui::Color32::from_rgb(240, 180, 40),
        );
    }
}

fn paint_cluster(painter: &egui::Painter, surface: &EguiSurface, cluster: &Cluster) {
    let center = surface.world_to_screen(cluster.center_px);
    let count = cluster.members.len();
    let radius = cluster_radius(count);
    let fill = match count {
        0..=9 => egui::Color32::from_rgb(110, 204, 57),
        10..=99 => egui::Color32::from_rgb(240, 194, 12),
        _ => egui::Color32::from_rgb(241, 128, 23),
    };

    painter.circle_filled(center, radius + 4.0, fill.gamma_multiply(0.5));
    painter.circle_filled(center, radius, fill);
    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        count.to_string(),
        egui::FontId::proportional(12.0),
        egui::Color32::BLACK,
    );
}

/// Bildschirm-Fläche und Ziel-URL des offenen Popups.
fn popup_rect(surface: &EguiSurface) -> Option<(egui::Rect, String)> {
    let marker = surface.marker(surface.open_popup_marker()?)?;
    let (content, options) = marker.popup.as_ref()?;
    let anchor = surface.geo_to_screen(marker.coord)
        + egui::vec2(marker.icon.popup_anchor[0], marker.icon.popup_anchor[1]);
    let height = EguiSurface::popup_height(content) as f32;
    let rect = egui::Rect::from_min_max(
        anchor - egui::vec2(options.max_width / 2.0, height),
        anchor + egui::vec2(options.max_width / 2.0, 0.0),
    );
    Some((rect, content.url.clone()))
}

fn paint_popup(ui: &egui::Ui, surface: &EguiSurface) {
    let Some((rect, _)) = popup_rect(surface) else {
        return;
    };
    let Some(content) = surface
        .open_popup_marker()
        .and_then(|handle| surface.marker(handle))
        .and_then(|marker| marker.popup.as_ref())
        .map(|(content, _)| content)
    else {
        return;
    };
    let height = rect.height();

    let painter = ui.painter();
    painter.rect_filled(rect, 6.0, egui::Color32::WHITE);
    painter.rect_stroke(
        rect,
        6.0,
        egui::Stroke::new(1.0, egui::Color32::from_gray(160)),
        egui::StrokeKind::Outside,
    );

    let mut text_top = rect.min.y + 8.0;
    if !content.cover_src.is_empty() {
        let cover_rect = egui::Rect::from_min_size(
            rect.min + egui::vec2(8.0, 8.0),
            egui::vec2(rect.width() - 16.0, height - 64.0 - 8.0),
        );
        egui::Image::new(content.cover_src.clone()).paint_at(ui, cover_rect);
        text_top = cover_rect.max.y + 8.0;
    }

    painter.text(
        egui::pos2(rect.min.x + 10.0, text_top),
        egui::Align2::LEFT_TOP,
        &content.title,
        egui::FontId::proportional(14.0),
        egui::Color32::from_gray(20),
    );
    painter.text(
        egui::pos2(rect.min.x + 10.0, text_top + 22.0),
        egui::Align2::LEFT_TOP,
        &content.address_line,
        egui::FontId::proportional(11.0),
        egui::Color32::from_gray(90),
    );
}

fn zoom_home_rect(rect: egui::Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        rect.min + egui::vec2(CONTROL_MARGIN, CONTROL_MARGIN),
        egui::Vec2::splat(CONTROL_SIZE),
    )
}

fn paint_controls(painter: &egui::Painter, surface: &EguiSurface, rect: egui::Rect) {
    let options = surface.options();

    if options.zoom_home_control {
        let home = zoom_home_rect(rect);
        painter.rect_filled(home, 4.0, egui::Color32::WHITE);
        painter.text(
            home.center(),
            egui::Align2::CENTER_CENTER,
            "⌂",
            egui::FontId::proportional(18.0),
            egui::Color32::from_gray(40),
        );
    }

    if let Some(position) = options.scale_control {
        paint_scale(painter, surface, rect, position);
    }

    painter.text(
        rect.right_bottom() - egui::vec2(4.0, 2.0),
        egui::Align2::RIGHT_BOTTOM,
        strip_tags(&options.tile_layer.attribution),
        egui::FontId::proportional(10.0),
        egui::Color32::from_gray(60),
    );
}

fn paint_scale(
    painter: &egui::Painter,
    surface: &EguiSurface,
    rect: egui::Rect,
    position: ControlPosition,
) {
    let (meters, width) = scale_bar(surface.center(), surface.zoom_level(), SCALE_MAX_WIDTH);
    let x = match position {
        ControlPosition::TopLeft
        | ControlPosition::BottomLeft
        | ControlPosition::VerticalCenterLeft => rect.min.x + CONTROL_MARGIN,
        _ => rect.max.x - CONTROL_MARGIN - width,
    };
    let y = match position {
        ControlPosition::TopLeft | ControlPosition::TopRight => rect.min.y + 2.0 * CONTROL_MARGIN,
        ControlPosition::BottomLeft | ControlPosition::BottomRight => {
            rect.max.y - 2.0 * CONTROL_MARGIN
        }
        _ => rect.center().y,
    };

    let stroke = egui::Stroke::new(2.0, egui::Color32::from_gray(40));
    painter.line_segment([egui::pos2(x, y), egui::pos2(x + width, y)], stroke);
    painter.line_segment([egui::pos2(x, y - 5.0), egui::pos2(x, y)], stroke);
    painter.line_segment([egui::pos2(x + width, y - 5.0), egui::pos2(x + width, y)], stroke);

    let label = if meters >= 1000.0 {
        format!("{} km", meters / 1000.0)
    } else {
        format!("{} m", meters)
    };
    painter.text(
        egui::pos2(x + width / 2.0, y - 6.0),
        egui::Align2::CENTER_BOTTOM,
        label,
        egui::FontId::proportional(10.0),
        egui::Color32::from_gray(40),
    );
}

/// Runde Maßstabslänge (1/2/5·10ⁿ Meter) und ihre Breite in Pixeln.
pub fn scale_bar(center: LatLng, zoom: f64, max_width: f32) -> (f64, f32) {
    let meters_per_px = EQUATOR_METERS_PER_PIXEL * center.lat.to_radians().cos()
        / geo::world_size(zoom)
        * geo::TILE_SIZE;
    let max_meters = meters_per_px * f64::from(max_width);
    let magnitude = 10f64.powf(max_meters.log10().floor());
    let meters = [5.0, 2.0, 1.0]
        .into_iter()
        .map(|step| step * magnitude)
        .find(|m| *m <= max_meters)
        .unwrap_or(magnitude);
    (meters, (meters / meters_per_px) as f32)
}

/// Entfernt HTML-Tags aus einer Attribution.
pub fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_strip_tags_keeps_text_only() {
        assert_eq!(
            strip_tags("© <a href=\"x\">Mapbox</a> <strong>Improve</strong>"),
            "© Mapbox Improve"
        );
    }

    #[test]
    fn test_scale_bar_is_round_and_fits() {
        let (meters, width) = scale_bar(LatLng::new(0.0, 0.0), 15.0, 100.0);
        assert!(width <= 100.0);
        let leading = meters / 10f64.powf(meters.log10().floor());
        assert!([1.0, 2.0, 5.0].iter().any(|s| (leading - s).abs() < 1e-9));
    }

    #[test]
    fn test_scale_bar_at_zoom_zero_equator() {
        // ~156 km pro Pixel → 100 px ≈ 15654 km, gerundet auf 10000 km
        let (meters, width) = scale_bar(LatLng::new(0.0, 0.0), 0.0, 100.0);
        assert_relative_eq!(meters, 10_000_000.0);
        assert_relative_eq!(f64::from(width), 63.88, epsilon = 0.01);
    }
}
