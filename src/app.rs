use eframe::egui::{self, Color32, Pos2, Rect, Sense, Shape, Stroke, Vec2};

use crate::controller::AnimationController;
use crate::surface::Surface;
use crate::types::Phase;

pub struct SimulatorApp {
    controller: AnimationController,
}

impl SimulatorApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut controller = AnimationController::new();
        controller.start();
        Self { controller }
    }

    fn draw_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Three-Phase System");

        let params = *self.controller.params();

        let mut frequency = params.frequency_hz;
        if ui
            .add(egui::Slider::new(&mut frequency, 10.0..=100.0).text("frequency (Hz)"))
            .changed()
        {
            self.controller.set_frequency(frequency);
        }

        let mut amplitude = params.amplitude;
        if ui
            .add(egui::Slider::new(&mut amplitude, 50.0..=400.0).text("amplitude (V)"))
            .changed()
        {
            self.controller.set_amplitude(amplitude);
        }

        let mut time_scale = params.time_scale;
        if ui
            .add(egui::Slider::new(&mut time_scale, 0.5..=5.0).text("time scale"))
            .changed()
        {
            self.controller.set_time_scale(time_scale);
        }

        let mut line_scale = params.line_voltage_scale;
        if ui
            .add(egui::Slider::new(&mut line_scale, 1.0..=3.0).text("line voltage scale"))
            .changed()
        {
            self.controller.set_line_voltage_scale(line_scale);
        }

        let mut speed = params.animation_speed;
        if ui
            .add_enabled(
                !self.controller.is_manual(),
                egui::Slider::new(&mut speed, 0.01..=1.0).text("animation speed"),
            )
            .changed()
        {
            self.controller.set_animation_speed(speed);
        }

        ui.separator();
        ui.heading("Phases");
        for (phase, label) in [(Phase::R, "R phase"), (Phase::S, "S phase"), (Phase::T, "T phase")]
        {
            let mut enabled = self.controller.params().phase_enabled(phase);
            if ui.checkbox(&mut enabled, label).changed() {
                self.controller.set_phase_enabled(phase, enabled);
            }
        }

        ui.separator();
        let manual_label = if self.controller.is_manual() {
            "Manual mode: ON"
        } else {
            "Manual mode: OFF"
        };
        if ui.button(manual_label).clicked() {
            self.controller.toggle_manual_mode();
        }
        if self.controller.is_manual() {
            ui.label("Drag the time marker on a waveform to scrub.");
        }

        ui.horizontal(|ui| {
            if ui
                .button(if self.controller.is_running() {
                    "Pause animation"
                } else {
                    "Resume animation"
                })
                .clicked()
            {
                if self.controller.is_running() {
                    self.controller.stop();
                } else {
                    self.controller.start();
                }
            }
        });
    }

    fn draw_readout(&self, ui: &mut egui::Ui) {
        let v = self.controller.instantaneous_voltages();
        ui.horizontal(|ui| {
            ui.label(format!("R: {:.2} V", v.r_phase));
            ui.separator();
            ui.label(format!("S: {:.2} V", v.s_phase));
            ui.separator();
            ui.label(format!("T: {:.2} V", v.t_phase));
            ui.separator();
            ui.label(format!("R-S: {:.2} V", v.rs_voltage));
            ui.separator();
            ui.label(format!("S-T: {:.2} V", v.st_voltage));
            ui.separator();
            ui.label(format!("T-R: {:.2} V", v.tr_voltage));
            ui.separator();
            ui.label(format!("t: {:.4} s", self.controller.time()));
        });
    }

    /// Allocates one waveform canvas, forwards its pointer gestures to the
    /// controller, and returns the painter surface to draw into.
    fn waveform_canvas(&mut self, ui: &mut egui::Ui, height: f32) -> PainterSurface {
        let size = Vec2::new(ui.available_width(), height);
        let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
        let rect = response.rect;

        if self.controller.is_manual() {
            let local_x = |pos: Pos2| pos.x - rect.left();
            if response.drag_started() {
                if let Some(pos) = response.interact_pointer_pos() {
                    self.controller.on_pointer_down(local_x(pos), rect.width());
                }
            } else if response.dragged() {
                if let Some(pos) = response.interact_pointer_pos() {
                    if rect.contains(pos) {
                        self.controller.on_pointer_move(local_x(pos), rect.width());
                    } else {
                        self.controller.on_pointer_leave();
                    }
                }
            }
            if response.drag_stopped() {
                self.controller.on_pointer_up();
            }
            let cursor = if self.controller.is_dragging() {
                egui::CursorIcon::Grabbing
            } else {
                egui::CursorIcon::Grab
            };
            let _ = response.on_hover_cursor(cursor);
        }

        painter.rect_filled(rect, 2.0, Color32::WHITE);
        PainterSurface { painter, rect }
    }

    fn draw_visuals(&mut self, ui: &mut egui::Ui) {
        self.draw_readout(ui);
        ui.separator();

        ui.label("Phase voltages");
        let mut surface = self.waveform_canvas(ui, 180.0);
        self.controller.render_waveform(&mut surface);

        ui.label("Line voltages");
        let mut surface = self.waveform_canvas(ui, 180.0);
        self.controller.render_line_voltage_waveform(&mut surface);

        ui.label("Phasor diagram");
        let side = ui.available_width().min(ui.available_height()).max(120.0);
        let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::hover());
        painter.rect_filled(response.rect, 2.0, Color32::WHITE);
        let mut surface = PainterSurface {
            painter,
            rect: response.rect,
        };
        self.controller.render_phasor_diagram(&mut surface);
    }
}

impl eframe::App for SimulatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.tick();

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.draw_controls(ui);
                    });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_visuals(ui);
        });

        if self.controller.is_running() {
            ctx.request_repaint();
        }
    }
}

/// `Surface` over an egui painter clipped to one canvas rect.
struct PainterSurface {
    painter: egui::Painter,
    rect: Rect,
}

impl PainterSurface {
    fn to_screen(&self, pos: Pos2) -> Pos2 {
        pos + self.rect.min.to_vec2()
    }
}

impl Surface for PainterSurface {
    fn size(&self) -> (f32, f32) {
        (self.rect.width(), self.rect.height())
    }

    fn polyline(&mut self, points: &[Pos2], stroke: Stroke) {
        let screen: Vec<Pos2> = points.iter().map(|p| self.to_screen(*p)).collect();
        self.painter.add(Shape::line(screen, stroke));
    }

    fn line_segment(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.painter
            .line_segment([self.to_screen(from), self.to_screen(to)], stroke);
    }

    fn dashed_line(&mut self, from: Pos2, to: Pos2, stroke: Stroke, dash_len: f32, gap_len: f32) {
        let points = [self.to_screen(from), self.to_screen(to)];
        self.painter
            .extend(Shape::dashed_line(&points, stroke, dash_len, gap_len));
    }

    fn circle_filled(&mut self, center: Pos2, radius: f32, fill: Color32) {
        self.painter
            .circle_filled(self.to_screen(center), radius, fill);
    }

    fn circle_stroked(&mut self, center: Pos2, radius: f32, stroke: Stroke) {
        self.painter
            .circle_stroke(self.to_screen(center), radius, stroke);
    }
}
