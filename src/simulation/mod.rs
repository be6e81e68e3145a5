//! Моделирование контура слежения за усилием
//!
//! Объект: усилие умножается на (1 + u) на каждом шаге, производная
//! оценивается как u / dt. Задание меандр.

pub mod setpoint;

use crate::config::simulation::{initial, DURATION_PERIODS, SAMPLING_TIME_S};
use crate::control::fuzzy::FuzzyEngine;
use crate::data::ForceSample;
use crate::error::SimulationError;

pub use setpoint::SquareWave;

/// Параметры моделирования
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    /// Шаг дискретизации (с)
    pub sampling_time_s: f64,
    /// Длительность (с)
    pub duration_s: f64,
    pub setpoint: SquareWave,
    pub initial_force_kg: f64,
    pub initial_derivative: f64,
}

impl SimulationParams {
    fn validate(&self) -> Result<(), SimulationError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if positive(self.sampling_time_s)
            && positive(self.duration_s)
            && positive(self.setpoint.period_s)
            && self.initial_force_kg.is_finite()
            && self.initial_derivative.is_finite()
        {
            Ok(())
        } else {
            Err(SimulationError::InvalidParameters)
        }
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        let setpoint = SquareWave::default();
        Self {
            sampling_time_s: SAMPLING_TIME_S,
            duration_s: DURATION_PERIODS * setpoint.period_s,
            setpoint,
            initial_force_kg: initial::FORCE_KG,
            initial_derivative: initial::FORCE_DERIVATIVE,
        }
    }
}

/// Пошаговое моделирование; регулятор только заимствуется
pub struct ForceSimulation<'a> {
    engine: &'a FuzzyEngine,
    params: SimulationParams,
    time_s: f64,
    force_kg: f64,
    derivative: f64,
    steps: usize,
    failed: bool,
}

impl<'a> ForceSimulation<'a> {
    pub fn new(engine: &'a FuzzyEngine, params: SimulationParams) -> Result<Self, SimulationError> {
        params.validate()?;

        info!(
            "Моделирование: шаг {} с, длительность {} с, начальное усилие {} кг",
            params.sampling_time_s,
            params.duration_s,
            params.initial_force_kg
        );

        Ok(Self {
            engine,
            params,
            time_s: 0.0,
            force_kg: params.initial_force_kg,
            derivative: params.initial_derivative,
            steps: 0,
            failed: false,
        })
    }

    pub fn is_finished(&self) -> bool {
        self.failed || self.time_s >= self.params.duration_s
    }

    /// Один шаг контура. `Ok(None)` после окончания моделирования.
    pub fn step(&mut self) -> Result<Option<ForceSample>, SimulationError> {
        if self.is_finished() {
            return Ok(None);
        }

        let desired = self.params.setpoint.value_at(self.time_s);
        let force_error = desired - self.force_kg;

        let actuator = match self.engine.evaluate(force_error, self.derivative) {
            Ok(u) => u,
            Err(e) => {
                self.failed = true;
                error!("Ошибка регулятора на {} с: {}", self.time_s, e);
                return Err(e.into());
            }
        };

        self.force_kg *= 1.0 + actuator;
        self.derivative = actuator / self.params.sampling_time_s;

        let sample = ForceSample {
            time_s: self.time_s,
            desired_kg: desired,
            error_kg: force_error,
            actuator,
            force_kg: self.force_kg,
            derivative: self.derivative,
        };
        trace!("Шаг {}: {}", self.steps, sample);

        self.time_s += self.params.sampling_time_s;
        self.steps += 1;

        if self.is_finished() {
            info!(
                "Моделирование завершено: {} шагов, усилие {} кг",
                self.steps,
                self.force_kg
            );
        }

        Ok(Some(sample))
    }

    pub fn time_s(&self) -> f64 {
        self.time_s
    }

    pub fn force_kg(&self) -> f64 {
        self.force_kg
    }

    pub fn steps(&self) -> usize {
        self.steps
    }
}

impl Iterator for ForceSimulation<'_> {
    type Item = Result<ForceSample, SimulationError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step().transpose()
    }
}
