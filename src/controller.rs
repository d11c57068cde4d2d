use eframe::egui::{pos2, Color32, Pos2, Stroke};

use crate::surface::Surface;
use crate::types::{ClockMode, InstantaneousVoltages, Phase, SimulationParams};
use crate::voltage::{compute_voltages, phase_angle};

/// Simulated seconds added per tick at `animation_speed = 1`. The frame
/// interval is host-dependent, so simulated time derives only from this
/// constant, never from measured wall-clock deltas.
pub const BASE_STEP: f32 = 0.008;

/// Horizontal band around the time marker, in pixels, within which a press
/// starts a drag in manual mode.
pub const DRAG_TOLERANCE_PX: f32 = 20.0;

/// Vertical inset of the waveform plots.
const WAVE_MARGIN: f32 = 20.0;

const R_COLOR: Color32 = Color32::from_rgb(255, 107, 107);
const S_COLOR: Color32 = Color32::from_rgb(78, 205, 196);
const T_COLOR: Color32 = Color32::from_rgb(69, 183, 209);
const RS_COLOR: Color32 = Color32::from_rgb(255, 159, 243);
const ST_COLOR: Color32 = Color32::from_rgb(84, 160, 255);
const TR_COLOR: Color32 = Color32::from_rgb(95, 39, 205);

const GRID_COLOR: Color32 = Color32::from_rgb(240, 240, 240);
const AXIS_COLOR: Color32 = Color32::from_rgb(221, 221, 221);
const CIRCLE_COLOR: Color32 = Color32::from_rgb(238, 238, 238);
const MARKER_COLOR: Color32 = Color32::from_rgb(51, 51, 51);
const TIP_LINK_COLOR: Color32 = Color32::from_rgb(102, 102, 102);

/// Owns the simulation parameters and clock, and drives the three views.
///
/// All inputs arrive through the setter and pointer-hook API; values are
/// accepted as-is, range constraints are the host's control widgets' job.
/// Keeping the frequency and scale minimums strictly positive is likewise a
/// host guarantee; a zero divisor propagates as non-finite geometry rather
/// than an error.
pub struct AnimationController {
    params: SimulationParams,
    time: f32,
    mode: ClockMode,
    dragging: bool,
    running: bool,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationController {
    pub fn new() -> Self {
        Self {
            params: SimulationParams::default(),
            time: 0.0,
            mode: ClockMode::Automatic,
            dragging: false,
            running: false,
        }
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// The fixed display window of every view: two cycles of the fundamental.
    pub fn time_range(&self) -> f32 {
        2.0 / self.params.frequency_hz
    }

    pub fn set_frequency(&mut self, hz: f32) {
        self.params.frequency_hz = hz;
    }

    pub fn set_amplitude(&mut self, volts: f32) {
        self.params.amplitude = volts;
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.params.time_scale = scale;
    }

    pub fn set_line_voltage_scale(&mut self, scale: f32) {
        self.params.line_voltage_scale = scale;
    }

    pub fn set_animation_speed(&mut self, speed: f32) {
        self.params.animation_speed = speed;
    }

    pub fn set_phase_enabled(&mut self, phase: Phase, enabled: bool) {
        self.params.set_phase_enabled(phase, enabled);
    }

    /// Switches between automatic and manual time control and returns true if
    /// the controller is now in manual mode. Leaving manual mode cancels any
    /// active drag and resumes automatic advance from the current time.
    pub fn toggle_manual_mode(&mut self) -> bool {
        self.mode = match self.mode {
            ClockMode::Automatic => ClockMode::Manual,
            ClockMode::Manual => {
                self.dragging = false;
                ClockMode::Automatic
            }
        };
        self.mode == ClockMode::Manual
    }

    pub fn is_manual(&self) -> bool {
        self.mode == ClockMode::Manual
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Halts the loop; `tick` mutates nothing until `start` is called again.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advances the clock by one animation frame. In manual mode, or while
    /// stopped, time does not move.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        if self.mode == ClockMode::Automatic {
            self.time += BASE_STEP * self.params.animation_speed;
        }
    }

    pub fn instantaneous_voltages(&self) -> InstantaneousVoltages {
        compute_voltages(&self.params, self.time)
    }

    /// Horizontal pixel position of the "now" marker within the two-cycle
    /// display window of a surface `width` pixels wide.
    pub fn marker_x(&self, width: f32) -> f32 {
        let range = self.time_range();
        (self.time % range) / range * width
    }

    /// Press at local pixel `x` on a waveform surface of the given width.
    /// Only starts a drag in manual mode, and only within the tolerance band
    /// around the current marker.
    pub fn on_pointer_down(&mut self, x: f32, width: f32) {
        if self.mode != ClockMode::Manual || self.dragging {
            return;
        }
        if (x - self.marker_x(width)).abs() <= DRAG_TOLERANCE_PX {
            self.dragging = true;
            self.scrub_to(x, width);
        }
    }

    pub fn on_pointer_move(&mut self, x: f32, width: f32) {
        if self.dragging {
            self.scrub_to(x, width);
        }
    }

    pub fn on_pointer_up(&mut self) {
        self.dragging = false;
    }

    pub fn on_pointer_leave(&mut self) {
        self.dragging = false;
    }

    fn scrub_to(&mut self, x: f32, width: f32) {
        let fraction = (x / width).clamp(0.0, 1.0);
        self.time = fraction * self.time_range();
    }

    /// Draws the three phase voltage waveforms over the two-cycle window.
    pub fn render_waveform(&self, surface: &mut dyn Surface) {
        let (width, height) = surface.size();
        draw_grid(surface, width, height);

        let strokes = [
            (Phase::R, R_COLOR),
            (Phase::S, S_COLOR),
            (Phase::T, T_COLOR),
        ];
        for (phase, color) in strokes {
            if !self.params.phase_enabled(phase) {
                continue;
            }
            let points = self.sample_wave(width, height, self.params.amplitude, |v| match phase {
                Phase::R => v.r_phase,
                Phase::S => v.s_phase,
                Phase::T => v.t_phase,
            });
            surface.polyline(&points, Stroke::new(2.0, color));
        }

        self.draw_time_marker(surface, width, height);
    }

    /// Draws the three line-to-line voltage waveforms.
    pub fn render_line_voltage_waveform(&self, surface: &mut dyn Surface) {
        let (width, height) = surface.size();
        draw_grid(surface, width, height);

        let normalizer = self.params.amplitude * self.params.line_voltage_scale;
        let pairs = [
            (Phase::R, Phase::S, RS_COLOR),
            (Phase::S, Phase::T, ST_COLOR),
            (Phase::T, Phase::R, TR_COLOR),
        ];
        for (a, b, color) in pairs {
            if !self.params.phase_enabled(a) || !self.params.phase_enabled(b) {
                continue;
            }
            let points = self.sample_wave(width, height, normalizer, |v| match (a, b) {
                (Phase::R, Phase::S) => v.rs_voltage,
                (Phase::S, Phase::T) => v.st_voltage,
                _ => v.tr_voltage,
            });
            surface.polyline(&points, Stroke::new(2.0, color));
        }

        self.draw_time_marker(surface, width, height);
    }

    /// Draws the rotating phasor diagram at the current, unscaled time.
    pub fn render_phasor_diagram(&self, surface: &mut dyn Surface) {
        let (width, height) = surface.size();
        let cx = width / 2.0;
        let cy = height / 2.0;
        let radius = width.min(height) / 2.0 - 40.0;

        surface.circle_filled(pos2(cx, cy), 3.0, MARKER_COLOR);
        surface.line_segment(
            pos2(cx - radius - 20.0, cy),
            pos2(cx + radius + 20.0, cy),
            Stroke::new(1.0, AXIS_COLOR),
        );
        surface.line_segment(
            pos2(cx, cy - radius - 20.0),
            pos2(cx, cy + radius + 20.0),
            Stroke::new(1.0, AXIS_COLOR),
        );
        surface.circle_stroked(pos2(cx, cy), radius, Stroke::new(1.0, CIRCLE_COLOR));

        let vectors = [
            (Phase::R, R_COLOR),
            (Phase::S, S_COLOR),
            (Phase::T, T_COLOR),
        ];
        let tip = |phase: Phase| {
            let angle = phase_angle(&self.params, phase, self.time);
            pos2(cx + radius * angle.cos(), cy - radius * angle.sin())
        };

        for (phase, color) in vectors {
            if self.params.phase_enabled(phase) {
                surface.line_segment(pos2(cx, cy), tip(phase), Stroke::new(3.0, color));
            }
        }
        for (phase, color) in vectors {
            if self.params.phase_enabled(phase) {
                surface.circle_filled(tip(phase), 5.0, color);
            }
        }

        // Line voltage phasors: dashed chords between the tips of each
        // enabled pair.
        let link_stroke = Stroke::new(2.0, TIP_LINK_COLOR);
        let pairs = [
            (Phase::R, Phase::S),
            (Phase::S, Phase::T),
            (Phase::T, Phase::R),
        ];
        for (a, b) in pairs {
            if self.params.phase_enabled(a) && self.params.phase_enabled(b) {
                surface.dashed_line(tip(a), tip(b), link_stroke, 8.0, 4.0);
            }
        }
    }

    fn sample_wave(
        &self,
        width: f32,
        height: f32,
        normalizer: f32,
        pick: impl Fn(&InstantaneousVoltages) -> f32,
    ) -> Vec<Pos2> {
        let range = self.time_range();
        let px_count = width.max(1.0) as usize;
        let mut points = Vec::with_capacity(px_count);
        for x in 0..px_count {
            let t = x as f32 / width * range * self.params.time_scale;
            let v = compute_voltages(&self.params, t);
            let y = height / 2.0 - pick(&v) / normalizer * (height / 2.0 - WAVE_MARGIN);
            points.push(pos2(x as f32, y));
        }
        points
    }

    fn draw_time_marker(&self, surface: &mut dyn Surface, width: f32, height: f32) {
        let x = self.marker_x(width);
        surface.dashed_line(
            pos2(x, 0.0),
            pos2(x, height),
            Stroke::new(1.0, MARKER_COLOR),
            5.0,
            5.0,
        );
    }
}

fn draw_grid(surface: &mut dyn Surface, width: f32, height: f32) {
    let stroke = Stroke::new(1.0, GRID_COLOR);
    for i in 0..=10 {
        let x = width * i as f32 / 10.0;
        surface.line_segment(pos2(x, 0.0), pos2(x, height), stroke);
    }
    for i in 0..=6 {
        let y = height * i as f32 / 6.0;
        surface.line_segment(pos2(0.0, y), pos2(width, y), stroke);
    }
    surface.line_segment(
        pos2(0.0, height / 2.0),
        pos2(width, height / 2.0),
        Stroke::new(1.0, AXIS_COLOR),
    );
}
