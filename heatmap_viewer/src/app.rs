use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Stroke, Vec2};
use eframe::Frame;
use lib_pink::Heatmap;

use crate::viewport::{screen_to_cell, update_zoom, ViewportInfo};

const COLORBAR_STEPS: usize = 256;
const COLORBAR_TICKS: usize = 5;
const COLORBAR_PANEL_WIDTH: f32 = 96.0;

fn full_uv() -> Rect {
    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0))
}

fn format_value(value: f32) -> String {
    if value != 0.0 && (value.abs() >= 1e4 || value.abs() < 1e-3) {
        format!("{:.3e}", value)
    } else {
        format!("{:.4}", value)
    }
}

pub struct HeatmapViewer {
    heatmap: Heatmap,
    caption: String,
    texture: Option<egui::TextureHandle>,
    colorbar: Option<egui::TextureHandle>,
    viewport_info: ViewportInfo,
}

impl HeatmapViewer {
    pub fn new(heatmap: Heatmap, caption: String) -> Self {
        Self {
            heatmap,
            caption,
            texture: None,
            colorbar: None,
            viewport_info: ViewportInfo::new(),
        }
    }

    fn load_textures(&mut self, ctx: &egui::Context) {
        if self.texture.is_none() {
            let color_image = egui::ColorImage::from_rgba_unmultiplied(
                [self.heatmap.cols(), self.heatmap.rows()],
                &self.heatmap.to_rgba(),
            );
            self.texture = Some(ctx.load_texture(
                "heatmap",
                color_image,
                egui::TextureOptions::NEAREST,
            ));
        }

        if self.colorbar.is_none() {
            let color_image = egui::ColorImage::from_rgba_unmultiplied(
                [1, COLORBAR_STEPS],
                &self.heatmap.colorbar_rgba(1, COLORBAR_STEPS),
            );
            self.colorbar = Some(ctx.load_texture(
                "colorbar",
                color_image,
                egui::TextureOptions::LINEAR,
            ));
        }
    }

    fn draw_colorbar(&self, ctx: &egui::Context) {
        egui::SidePanel::right("colorbar")
            .resizable(false)
            .exact_width(COLORBAR_PANEL_WIDTH)
            .show(ctx, |ui| {
                let (rect, _) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
                let bar = Rect::from_min_max(
                    Pos2::new(rect.min.x + 6.0, rect.min.y + 12.0),
                    Pos2::new(rect.min.x + 26.0, rect.max.y - 12.0),
                );

                let painter = ui.painter();
                if let Some(texture) = &self.colorbar {
                    painter.image(texture.id(), bar, full_uv(), Color32::WHITE);
                }
                painter.rect_stroke(bar, 0.0, Stroke::new(1.0, Color32::GRAY));

                let text_color = ui.visuals().text_color();
                let ticks = self.heatmap.ticks(COLORBAR_TICKS);
                for (i, tick) in ticks.iter().enumerate() {
                    let t = i as f32 / (COLORBAR_TICKS - 1) as f32;
                    let y = bar.max.y - t * bar.height();
                    painter.line_segment(
                        [Pos2::new(bar.max.x, y), Pos2::new(bar.max.x + 4.0, y)],
                        Stroke::new(1.0, text_color),
                    );
                    painter.text(
                        Pos2::new(bar.max.x + 6.0, y),
                        Align2::LEFT_CENTER,
                        format_value(*tick),
                        FontId::monospace(11.0),
                        text_color,
                    );
                }
            });
    }

    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(&self.caption);
            ui.separator();
            ui.label(format!("zoom {:.0}%", self.viewport_info.zoom() * 100.0));

            let moved = self.viewport_info.zoom() != 1.0
                || self.viewport_info.pan_offset() != Vec2::ZERO;
            if ui
                .add_enabled(moved, egui::Button::new("Reset view"))
                .clicked()
            {
                self.viewport_info.reset();
            }
        });
    }

    fn draw_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_toolbar(ui);
            ui.separator();

            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let input = ui.input(|i| i.clone());
            let content = Vec2::new(self.heatmap.cols() as f32, self.heatmap.rows() as f32);

            self.viewport_info.update(response.hover_pos());
            if response.hovered() {
                let image_rect = self.viewport_info.image_rect(response.rect, content);
                update_zoom(&input, &mut self.viewport_info, image_rect.center());
            }
            if response.dragged() {
                self.viewport_info.pan_by(response.drag_delta());
            }
            if response.double_clicked() {
                self.viewport_info.reset();
            }

            let image_rect = self.viewport_info.image_rect(response.rect, content);
            let painter = ui.painter_at(response.rect);
            if let Some(texture) = &self.texture {
                painter.image(texture.id(), image_rect, full_uv(), Color32::WHITE);
            }
            painter.rect_stroke(image_rect, 0.0, Stroke::new(1.0, Color32::GRAY));

            let hovered = response.hover_pos().and_then(|pos| {
                screen_to_cell(image_rect, pos, self.heatmap.rows(), self.heatmap.cols())
            });
            if let Some((row, col)) = hovered {
                if let Some(value) = self.heatmap.value(row, col) {
                    response.on_hover_text_at_pointer(format!(
                        "row {}, column {}\n{}",
                        row,
                        col,
                        format_value(value)
                    ));
                }
            }
        });
    }
}

impl eframe::App for HeatmapViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.load_textures(ctx);
        self.draw_colorbar(ctx);
        self.draw_central_panel(ctx);
    }
}

/// Opens a window showing `heatmap` and blocks until it is closed.
pub fn show(heatmap: Heatmap, title: &str, caption: String) -> Result<(), eframe::Error> {
    let app = HeatmapViewer::new(heatmap, caption);
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_inner_size([720.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(title, native_options, Box::new(|_cc| Ok(Box::new(app))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_formatting() {
        assert_eq!(format_value(0.0), "0.0000");
        assert_eq!(format_value(1.5), "1.5000");
        assert_eq!(format_value(123456.0), "1.235e5");
        assert_eq!(format_value(0.0001), "1.000e-4");
    }
}
