use std::f32::consts::TAU;

use crate::types::{InstantaneousVoltages, Phase, SimulationParams};

/// Phase lag between consecutive phases: 120°.
pub const PHASE_SHIFT: f32 = TAU / 3.0;

/// Angular rate ω = 2π·f.
pub fn angular_frequency(params: &SimulationParams) -> f32 {
    TAU * params.frequency_hz
}

/// Instantaneous phasor angle of `phase` at time `t`, in radians.
///
/// Not reduced modulo 2π; callers feed it straight into sin/cos.
pub fn phase_angle(params: &SimulationParams, phase: Phase, t: f32) -> f32 {
    angular_frequency(params) * t - phase.shift_index() * PHASE_SHIFT
}

fn single_phase(params: &SimulationParams, phase: Phase, t: f32) -> f32 {
    if params.phase_enabled(phase) {
        params.amplitude * phase_angle(params, phase, t).sin()
    } else {
        0.0
    }
}

/// Computes all phase and line voltages at time `t`.
///
/// Pure and infallible. A disabled phase contributes exactly zero to its own
/// voltage and to both line voltages it participates in. A zero frequency is
/// degenerate but tolerated: every waveform collapses to a constant.
pub fn compute_voltages(params: &SimulationParams, t: f32) -> InstantaneousVoltages {
    let r_phase = single_phase(params, Phase::R, t);
    let s_phase = single_phase(params, Phase::S, t);
    let t_phase = single_phase(params, Phase::T, t);

    let rs_voltage = if params.r_enabled && params.s_enabled {
        r_phase - s_phase
    } else {
        0.0
    };
    let st_voltage = if params.s_enabled && params.t_enabled {
        s_phase - t_phase
    } else {
        0.0
    };
    let tr_voltage = if params.t_enabled && params.r_enabled {
        t_phase - r_phase
    } else {
        0.0
    };

    InstantaneousVoltages {
        r_phase,
        s_phase,
        t_phase,
        rs_voltage,
        st_voltage,
        tr_voltage,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const EPS: f32 = 1.0e-3;

    #[test]
    fn balanced_phases_sum_to_zero() {
        let params = SimulationParams::default();
        for i in 0..50 {
            let t = i as f32 * 0.0007;
            let v = compute_voltages(&params, t);
            assert_relative_eq!(
                v.r_phase + v.s_phase + v.t_phase,
                0.0,
                epsilon = EPS
            );
        }
    }

    #[test]
    fn line_voltages_are_pairwise_differences() {
        let params = SimulationParams::default();
        for i in 0..50 {
            let t = i as f32 * 0.0013;
            let v = compute_voltages(&params, t);
            assert_relative_eq!(v.rs_voltage, v.r_phase - v.s_phase, epsilon = EPS);
            assert_relative_eq!(v.st_voltage, v.s_phase - v.t_phase, epsilon = EPS);
            assert_relative_eq!(v.tr_voltage, v.t_phase - v.r_phase, epsilon = EPS);
            assert_relative_eq!(
                v.rs_voltage + v.st_voltage + v.tr_voltage,
                0.0,
                epsilon = EPS
            );
        }
    }

    #[test]
    fn disabling_t_zeroes_only_its_contributions() {
        let mut params = SimulationParams::default();
        let t = 0.0037;
        let balanced = compute_voltages(&params, t);

        params.t_enabled = false;
        let v = compute_voltages(&params, t);

        assert_eq!(v.t_phase, 0.0);
        assert_eq!(v.st_voltage, 0.0);
        assert_eq!(v.tr_voltage, 0.0);
        assert_relative_eq!(v.r_phase, balanced.r_phase, epsilon = EPS);
        assert_relative_eq!(v.s_phase, balanced.s_phase, epsilon = EPS);
        assert_relative_eq!(v.rs_voltage, balanced.rs_voltage, epsilon = EPS);
    }

    #[test]
    fn waveform_repeats_every_cycle() {
        let params = SimulationParams::default();
        let period = 1.0 / params.frequency_hz;
        for i in 0..20 {
            let t = i as f32 * 0.0011;
            let a = compute_voltages(&params, t);
            let b = compute_voltages(&params, t + period);
            assert_relative_eq!(a.r_phase, b.r_phase, epsilon = EPS);
            assert_relative_eq!(a.s_phase, b.s_phase, epsilon = EPS);
            assert_relative_eq!(a.t_phase, b.t_phase, epsilon = EPS);
            assert_relative_eq!(a.rs_voltage, b.rs_voltage, epsilon = EPS);
            assert_relative_eq!(a.st_voltage, b.st_voltage, epsilon = EPS);
            assert_relative_eq!(a.tr_voltage, b.tr_voltage, epsilon = EPS);
        }
    }

    #[test]
    fn reference_values_at_time_zero() {
        let params = SimulationParams::default();
        let v = compute_voltages(&params, 0.0);
        assert_relative_eq!(v.r_phase, 0.0, epsilon = EPS);
        assert_relative_eq!(v.s_phase, -190.526, epsilon = 0.01);
        assert_relative_eq!(v.t_phase, 190.526, epsilon = 0.01);
    }

    #[test]
    fn r_phase_peaks_at_quarter_cycle() {
        let params = SimulationParams::default();
        // 50 Hz quarter cycle: sin(2π·50·0.005) = sin(π/2) = 1.
        let v = compute_voltages(&params, 0.005);
        assert_relative_eq!(v.r_phase, 220.0, epsilon = EPS);
    }

    #[test]
    fn zero_frequency_collapses_to_constants() {
        let params = SimulationParams {
            frequency_hz: 0.0,
            ..SimulationParams::default()
        };
        let a = compute_voltages(&params, 0.0);
        let b = compute_voltages(&params, 123.456);
        assert_relative_eq!(a.r_phase, b.r_phase, epsilon = EPS);
        assert_relative_eq!(a.s_phase, b.s_phase, epsilon = EPS);
        assert_relative_eq!(a.rs_voltage, b.rs_voltage, epsilon = EPS);
        assert!(a.r_phase.is_finite());
    }

    #[test]
    fn phase_angles_are_a_third_turn_apart() {
        let params = SimulationParams::default();
        let t = 0.0042;
        let r = phase_angle(&params, Phase::R, t);
        let s = phase_angle(&params, Phase::S, t);
        let t_angle = phase_angle(&params, Phase::T, t);
        assert_relative_eq!(r - s, PHASE_SHIFT, epsilon = EPS);
        assert_relative_eq!(s - t_angle, PHASE_SHIFT, epsilon = EPS);
    }
}
