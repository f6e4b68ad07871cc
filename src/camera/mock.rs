// SPDX-License-Identifier: GPL-3.0-or-later
use image::{ImageBuffer, Luma};

use crate::render::TemperatureRange;

use super::thermal_sensor::ThermalSensor;
use super::{ThermalImage, GRID_HEIGHT, GRID_WIDTH};

/// How far the hot spot advances along its orbit per frame, in radians.
const PHASE_STEP: f32 = 0.1;

/// A sensor stand-in that needs no hardware.
///
/// Each frame is a warm spot orbiting the center of the grid over a floor at the lower end
/// of the configured range. The sequence is a pure function of the frame counter, so two
/// instances with the same range produce identical frames.
#[derive(Clone, Debug)]
pub(crate) struct SyntheticSensor {
    low: f32,
    high: f32,
    tick: u32,
}

impl SyntheticSensor {
    pub(crate) fn new(range: &TemperatureRange) -> Self {
        Self {
            low: range.lower(),
            high: range.upper(),
            tick: 0,
        }
    }
}

impl ThermalSensor for SyntheticSensor {
    fn thermal_image(&mut self) -> anyhow::Result<ThermalImage> {
        let phase = self.tick as f32 * PHASE_STEP;
        self.tick = self.tick.wrapping_add(1);
        let center_x = (GRID_WIDTH - 1) as f32 / 2.0 + 2.5 * phase.cos();
        let center_y = (GRID_HEIGHT - 1) as f32 / 2.0 + 2.5 * phase.sin();
        let floor = self.low;
        let span = self.high - self.low;
        Ok(ImageBuffer::from_fn(GRID_WIDTH, GRID_HEIGHT, |x, y| {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let falloff = (-(dx * dx + dy * dy) / 3.0).exp();
            Luma([floor + span * falloff])
        }))
    }
}

#[cfg(test)]
mod synthetic_test {
    use float_cmp::{approx_eq, F32Margin};

    use super::super::{GRID_HEIGHT, GRID_WIDTH};
    use super::{SyntheticSensor, ThermalSensor};
    use crate::render::TemperatureRange;

    fn test_range() -> TemperatureRange {
        TemperatureRange::new(26.0, 32.0).unwrap()
    }

    #[test]
    fn grid_dimensions() {
        let mut sensor = SyntheticSensor::new(&test_range());
        let grid = sensor.thermal_image().unwrap();
        assert_eq!(grid.width(), GRID_WIDTH);
        assert_eq!(grid.height(), GRID_HEIGHT);
    }

    #[test]
    fn values_within_range() {
        let range = test_range();
        let mut sensor = SyntheticSensor::new(&range);
        for _ in 0..100 {
            let grid = sensor.thermal_image().unwrap();
            for temperature in grid.iter() {
                assert!(
                    *temperature >= range.lower() && *temperature <= range.upper(),
                    "temperature {} outside of {:?}",
                    temperature,
                    range
                );
            }
        }
    }

    #[test]
    fn floor_is_lower_limit() {
        let range = test_range();
        let mut sensor = SyntheticSensor::new(&range);
        let grid = sensor.thermal_image().unwrap();
        // The far corner is distant enough from the hot spot that it sits on the floor.
        let coldest = grid.iter().cloned().fold(f32::INFINITY, f32::min);
        assert!(approx_eq!(
            f32,
            coldest,
            range.lower(),
            F32Margin { epsilon: 0.1, ulps: 4 }
        ));
    }

    #[test]
    fn deterministic_sequence() {
        let mut first = SyntheticSensor::new(&test_range());
        let mut second = SyntheticSensor::new(&test_range());
        for _ in 0..10 {
            assert_eq!(
                first.thermal_image().unwrap(),
                second.thermal_image().unwrap()
            );
        }
    }

    #[test]
    fn frames_change_over_time() {
        let mut sensor = SyntheticSensor::new(&test_range());
        let first = sensor.thermal_image().unwrap();
        let second = sensor.thermal_image().unwrap();
        assert_ne!(first, second);
    }
}
