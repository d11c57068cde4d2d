/// One of the three conductors of the system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    R,
    S,
    T,
}

impl Phase {
    /// Phase lag relative to R, in multiples of 2π/3 (R = 0, S = 1, T = 2).
    pub fn shift_index(self) -> f32 {
        match self {
            Phase::R => 0.0,
            Phase::S => 1.0,
            Phase::T => 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SimulationParams {
    pub frequency_hz: f32,
    pub amplitude: f32,
    /// Display-only stretch of the sampled waveform time axis, decoupled
    /// from the simulation clock.
    pub time_scale: f32,
    /// Divisor applied when normalizing line voltage for display
    /// (compensates the √3 line/phase amplitude ratio).
    pub line_voltage_scale: f32,
    pub animation_speed: f32,
    pub r_enabled: bool,
    pub s_enabled: bool,
    pub t_enabled: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            frequency_hz: 50.0,
            amplitude: 220.0,
            time_scale: 2.0,
            line_voltage_scale: 2.0,
            animation_speed: 0.1,
            r_enabled: true,
            s_enabled: true,
            t_enabled: true,
        }
    }
}

impl SimulationParams {
    pub fn phase_enabled(&self, phase: Phase) -> bool {
        match phase {
            Phase::R => self.r_enabled,
            Phase::S => self.s_enabled,
            Phase::T => self.t_enabled,
        }
    }

    pub fn set_phase_enabled(&mut self, phase: Phase, enabled: bool) {
        match phase {
            Phase::R => self.r_enabled = enabled,
            Phase::S => self.s_enabled = enabled,
            Phase::T => self.t_enabled = enabled,
        }
    }
}

/// How the simulation clock advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockMode {
    /// `tick()` advances time each frame.
    Automatic,
    /// Time is frozen; only pointer drags move it.
    Manual,
}

/// Phase and line voltages at one instant, in volts.
#[derive(Clone, Copy, Debug, Default)]
pub struct InstantaneousVoltages {
    pub r_phase: f32,
    pub s_phase: f32,
    pub t_phase: f32,
    pub rs_voltage: f32,
    pub st_voltage: f32,
    pub tr_voltage: f32,
}
