use eframe::egui;
use palette_gradient::color::{BRIGHTNESS_RANGE, CONTRAST_RANGE, HUE_SHIFT_RANGE, SATURATION_RANGE};
use palette_gradient::view::DragAccumulator;
use palette_gradient::{AdjustmentParameters, Session};
use rfd::FileDialog;
use std::ops::RangeInclusive;
use std::path::PathBuf;

// egui reports one wheel line as 50 points; the zoom rule counts 120 per notch.
const WHEEL_UNITS_PER_POINT: f64 = 120.0 / 50.0;

fn main() -> Result<(), eframe::Error> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([700.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Palette Gradient Generator",
        options,
        Box::new(|_cc| Ok(Box::new(PaletteGradientApp::default()))),
    )
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum MessageKind {
    Info,
    Warning,
    Error,
}

impl MessageKind {
    fn title(self) -> &'static str {
        match self {
            MessageKind::Info => "Saved",
            MessageKind::Warning => "Warning",
            MessageKind::Error => "Error",
        }
    }
}

struct PaletteGradientApp {
    session: Session,
    params: AdjustmentParameters,
    texture: Option<egui::TextureHandle>,
    texture_offset: (i64, i64),
    texture_viewport: (u32, u32),
    needs_texture_update: bool,
    drag: DragAccumulator,
    loaded_path: Option<PathBuf>,
    message: Option<(MessageKind, String)>,
}

impl Default for PaletteGradientApp {
    fn default() -> Self {
        Self {
            session: Session::new(),
            params: AdjustmentParameters::default(),
            texture: None,
            texture_offset: (0, 0),
            texture_viewport: (0, 0),
            needs_texture_update: false,
            drag: DragAccumulator::default(),
            loaded_path: None,
            message: None,
        }
    }
}

impl eframe::App for PaletteGradientApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Load Image...").clicked() {
                        ui.close_menu();
                        self.load_image();
                    }
                    if ui.button("Save Image As...").clicked() {
                        ui.close_menu();
                        self.save_image();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(self.status_text());
                });
            });
        });

        egui::TopBottomPanel::bottom("sliders").show(ctx, |ui| {
            self.show_sliders(ui);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.show_canvas(ui);
            });

        self.show_message(ctx);
    }
}

impl PaletteGradientApp {
    fn show_sliders(&mut self, ui: &mut egui::Ui) {
        let mut params = self.params;
        let mut changed = false;

        egui::Grid::new("slider_grid")
            .num_columns(2)
            .spacing([20.0, 8.0])
            .show(ui, |ui| {
                changed |= labeled_slider(ui, "Hue Shift", &mut params.hue_shift_degrees, HUE_SHIFT_RANGE);
                changed |= labeled_slider(ui, "Saturation", &mut params.saturation_factor, SATURATION_RANGE);
                ui.end_row();
                changed |= labeled_slider(ui, "Brightness", &mut params.brightness_factor, BRIGHTNESS_RANGE);
                changed |= labeled_slider(ui, "Contrast", &mut params.contrast_factor, CONTRAST_RANGE);
                ui.end_row();
            });

        if changed {
            self.params = params;
            self.session.set_parameters(params);
            self.needs_texture_update = true;
        }
    }

    fn show_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());
        painter.rect_filled(response.rect, 0.0, egui::Color32::GRAY);

        if response.dragged() {
            let delta = response.drag_delta();
            let (dx, dy) = self.drag.accumulate(delta.x as f64, delta.y as f64);
            if dx != 0 || dy != 0 {
                self.session.pan_by(dx, dy);
                self.needs_texture_update = true;
            }
        } else {
            self.drag.reset();
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 && self.session.zoom_by_scroll(scroll as f64 * WHEEL_UNITS_PER_POINT) {
                self.needs_texture_update = true;
            }
        }

        let viewport = (
            response.rect.width().ceil() as u32,
            response.rect.height().ceil() as u32,
        );
        if self.needs_texture_update || viewport != self.texture_viewport {
            self.update_texture(ui.ctx(), viewport);
            self.texture_viewport = viewport;
            self.needs_texture_update = false;
        }

        if let Some(texture) = &self.texture {
            let (x, y) = self.texture_offset;
            let min = response.rect.min + egui::vec2(x as f32, y as f32);
            let rect = egui::Rect::from_min_size(min, texture.size_vec2());
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), rect, uv, egui::Color32::WHITE);
        }
    }

    fn show_message(&mut self, ctx: &egui::Context) {
        let Some((kind, text)) = &self.message else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new(kind.title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(text.as_str());
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.message = None;
        }
    }

    fn status_text(&self) -> String {
        let Some(path) = &self.loaded_path else {
            return "No image loaded".to_string();
        };
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match self.session.output() {
            Some(output) => format!(
                "{}: {}x{} at {:.0}%",
                name,
                output.width(),
                output.height(),
                self.session.view().zoom * 100.0
            ),
            None => name,
        }
    }

    fn file_dialog() -> FileDialog {
        let dialog = FileDialog::new();
        match dirs::picture_dir() {
            Some(dir) => dialog.set_directory(dir),
            None => dialog,
        }
    }

    fn load_image(&mut self) {
        let Some(path) = Self::file_dialog()
            .add_filter("PNG Images", &["png"])
            .add_filter("All files", &["*"])
            .pick_file()
        else {
            return;
        };

        match self.session.load(&path) {
            Ok(()) => {
                self.loaded_path = Some(path);
                self.needs_texture_update = true;
            }
            Err(e) => {
                log::error!("{}", e);
                self.message = Some((MessageKind::Error, format!("Could not open image:\n{}", e)));
            }
        }
    }

    fn save_image(&mut self) {
        if self.session.output().is_none() {
            self.message = Some((MessageKind::Warning, "No generated image to save.".to_string()));
            return;
        }

        let Some(mut path) = Self::file_dialog()
            .add_filter("PNG Image", &["png"])
            .set_file_name("gradient.png")
            .save_file()
        else {
            return;
        };
        if path.extension().is_none() {
            path.set_extension("png");
        }

        self.message = Some(match self.session.save(&path) {
            Ok(()) => (MessageKind::Info, "Image saved successfully.".to_string()),
            Err(e) => {
                log::error!("{}", e);
                (MessageKind::Error, format!("Could not save image:\n{}", e))
            }
        });
    }

    fn update_texture(&mut self, ctx: &egui::Context, viewport: (u32, u32)) {
        let max_side = ctx.input(|i| i.max_texture_side) as u32;
        let Some(region) = self.session.display_region(viewport, max_side) else {
            self.texture = None;
            return;
        };

        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [region.image.width() as usize, region.image.height() as usize],
            region.image.as_raw(),
        );
        match &mut self.texture {
            Some(texture) => texture.set(color_image, egui::TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture("gradient", color_image, egui::TextureOptions::LINEAR));
            }
        }
        self.texture_offset = region.offset;
    }
}

fn labeled_slider(ui: &mut egui::Ui, text: &str, value: &mut f64, range: RangeInclusive<f64>) -> bool {
    ui.horizontal(|ui| {
        ui.label(text);
        let changed = ui
            .add(egui::Slider::new(value, range).show_value(false))
            .changed();
        ui.label(format!("{:.2}", value));
        changed
    })
    .inner
}
