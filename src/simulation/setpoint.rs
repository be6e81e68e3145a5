//! Задание усилия в виде меандра

use core::f64::consts::PI;

use crate::config::simulation::setpoint;
use crate::utils::math::{lerp, sign};

/// Меандр между двумя уровнями
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareWave {
    /// Период (с)
    pub period_s: f64,
    /// Нижний уровень (кг)
    pub lower: f64,
    /// Верхний уровень (кг)
    pub upper: f64,
}

impl SquareWave {
    pub fn new(period_s: f64, lower: f64, upper: f64) -> Self {
        Self {
            period_s,
            lower,
            upper,
        }
    }

    /// Значение задания в момент времени.
    /// Первая половина периода верхний уровень, вторая нижний; в точках
    /// переключения (где синус равен нулю) середина между уровнями.
    pub fn value_at(&self, time_s: f64) -> f64 {
        let phase = libm::sin(2.0 * PI * time_s / self.period_s);
        lerp(self.lower, self.upper, 0.5 * (1.0 + sign(phase)))
    }
}

impl Default for SquareWave {
    fn default() -> Self {
        Self::new(setpoint::PERIOD_S, setpoint::LOWER_KG, setpoint::UPPER_KG)
    }
}
