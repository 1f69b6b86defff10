use eframe::egui::{InputState, Pos2, Rect, Vec2};

const MIN_ZOOM: f32 = 0.1;
const MAX_ZOOM: f32 = 40.0;

#[derive(Debug)]
pub struct ViewportInfo {
    pan_offset: Vec2,
    mouse_pos: Option<Pos2>,
    zoom: f32,
}

impl Default for ViewportInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportInfo {
    pub fn new() -> Self {
        Self {
            pan_offset: Vec2::ZERO,
            mouse_pos: None,
            zoom: 1.0,
        }
    }

    pub fn update(&mut self, mouse_pos: Option<Pos2>) {
        self.mouse_pos = mouse_pos;
    }

    pub fn pan_offset(&self) -> Vec2 {
        self.pan_offset
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn reset(&mut self) {
        self.pan_offset = Vec2::ZERO;
        self.zoom = 1.0;
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan_offset += delta;
    }

    /// Scales by `factor` keeping the point under `cursor` in place.
    pub fn zoom_at(&mut self, factor: f32, cursor: Pos2, image_center: Pos2) {
        let old_zoom = self.zoom;
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);

        let ratio = self.zoom / old_zoom;
        self.pan_offset += (cursor - image_center) * (1.0 - ratio);
    }

    /// Where an image of `content` proportions is drawn inside `available`.
    pub fn image_rect(&self, available: Rect, content: Vec2) -> Rect {
        let fitted = fit_rect(available, content);
        Rect::from_center_size(fitted.center() + self.pan_offset, fitted.size() * self.zoom)
    }
}

pub fn update_zoom(input: &InputState, viewport_info: &mut ViewportInfo, image_center: Pos2) {
    let scroll_delta = input.raw_scroll_delta.y;
    if scroll_delta == 0.0 {
        return;
    }

    let Some(mouse_pos) = viewport_info.mouse_pos else {
        return;
    };
    let zoom_delta = if scroll_delta > 0.0 { 1.1 } else { 0.9 };
    viewport_info.zoom_at(zoom_delta, mouse_pos, image_center);
}

/// Largest rect with the aspect ratio of `content`, centred in `available`.
pub fn fit_rect(available: Rect, content: Vec2) -> Rect {
    if content.x <= 0.0 || content.y <= 0.0 {
        return Rect::from_center_size(available.center(), Vec2::ZERO);
    }
    let scale = (available.width() / content.x).min(available.height() / content.y);
    Rect::from_center_size(available.center(), content * scale)
}

/// Grid cell `(row, col)` under `pos`, if any.
pub fn screen_to_cell(
    image_rect: Rect,
    pos: Pos2,
    rows: usize,
    cols: usize,
) -> Option<(usize, usize)> {
    if rows == 0 || cols == 0 || !image_rect.contains(pos) {
        return None;
    }
    let rel = pos - image_rect.min;
    let col = (rel.x / image_rect.width() * cols as f32).floor() as usize;
    let row = (rel.y / image_rect.height() * rows as f32).floor() as usize;
    Some((row.min(rows - 1), col.min(cols - 1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Rect {
        Rect::from_min_max(Pos2::new(x0, y0), Pos2::new(x1, y1))
    }

    #[test]
    fn fit_keeps_cells_square() {
        // 12 rows by 4 columns in a wide area: height limits.
        let fitted = fit_rect(rect(0.0, 0.0, 400.0, 240.0), Vec2::new(4.0, 12.0));
        assert_eq!(fitted.height(), 240.0);
        assert_eq!(fitted.width(), 80.0);
        assert_eq!(fitted.center(), Pos2::new(200.0, 120.0));
    }

    #[test]
    fn cell_lookup() {
        let image = rect(10.0, 10.0, 50.0, 130.0);
        assert_eq!(screen_to_cell(image, Pos2::new(10.0, 10.0), 12, 4), Some((0, 0)));
        assert_eq!(screen_to_cell(image, Pos2::new(49.9, 129.9), 12, 4), Some((11, 3)));
        assert_eq!(screen_to_cell(image, Pos2::new(25.0, 35.0), 12, 4), Some((2, 1)));
        assert_eq!(screen_to_cell(image, Pos2::new(5.0, 35.0), 12, 4), None);
    }

    #[test]
    fn zoom_keeps_cursor_point() {
        let mut info = ViewportInfo::new();
        let available = rect(0.0, 0.0, 100.0, 100.0);
        let content = Vec2::new(1.0, 1.0);
        let cursor = Pos2::new(75.0, 50.0);

        let before = info.image_rect(available, content);
        let u = (cursor.x - before.min.x) / before.width();

        info.zoom_at(2.0, cursor, before.center());
        let after = info.image_rect(available, content);
        let v = (cursor.x - after.min.x) / after.width();

        assert_eq!(info.zoom(), 2.0);
        assert!((u - v).abs() < 1e-5);
    }

    #[test]
    fn reset_restores_fit() {
        let mut info = ViewportInfo::new();
        info.pan_by(Vec2::new(5.0, -3.0));
        info.zoom_at(3.0, Pos2::ZERO, Pos2::ZERO);
        info.reset();
        assert_eq!(info.pan_offset(), Vec2::ZERO);
        assert_eq!(info.zoom(), 1.0);
    }
}
