//! Нечеткий регулятор усилия: полный цикл вывода Mamdani
//!
//! фаззификация -> степень срабатывания правил (min) -> импликация (срез, min)
//! -> агрегация (max) -> центроид -> ограничение выхода

use heapless::Vec;
use nalgebra::SMatrix;

use crate::config::controller::inference::{self, MAX_RULES};
use crate::config::controller::rule_table;
use crate::control::defuzz;
use crate::control::membership::MembershipFunction as MF;
use crate::control::rules::{Clause, Rule};
use crate::control::variable::{Input, LinguisticVariable, Term, Universe, TERM_COUNT};
use crate::data::{RuleText, TermDegrees};
use crate::error::{ConfigError, InferenceError};
use crate::utils::math::constrain;

/// Конфигурация вывода: две входные переменные, выходная переменная и
/// база правил. Создается один раз и далее только читается.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    force_error: LinguisticVariable,
    force_derivative: LinguisticVariable,
    actuator: LinguisticVariable,
    rules: Vec<Rule, MAX_RULES>,
    /// Число точек сетки выходной переменной
    resolution: usize,
    /// Выход ограничивается диапазоном [-output_limit, output_limit]
    output_limit: f64,
}

impl InferenceConfig {
    pub fn new(
        force_error: LinguisticVariable,
        force_derivative: LinguisticVariable,
        actuator: LinguisticVariable,
        rules: &[Rule],
        resolution: usize,
        output_limit: f64,
    ) -> Result<Self, ConfigError> {
        if resolution < 2 {
            return Err(ConfigError::InvalidResolution);
        }
        if !output_limit.is_finite() || output_limit <= 0.0 {
            return Err(ConfigError::InvalidOutputLimit);
        }
        let rules = Vec::from_slice(rules).map_err(|_| ConfigError::TooManyRules)?;

        Ok(Self {
            force_error,
            force_derivative,
            actuator,
            rules,
            resolution,
            output_limit,
        })
    }

    /// Штатная конфигурация регулятора усилия (17 правил)
    pub fn force_controller() -> Result<Self, ConfigError> {
        use crate::config::controller::actuator_variation as av;
        use crate::config::controller::force_derivative as fd;
        use crate::config::controller::force_error as fe;

        let error = LinguisticVariable::new(
            fe::NAME,
            Universe::new(fe::UNIVERSE.0, fe::UNIVERSE.1)?,
            [
                MF::zmf(fe::NL.0, fe::NL.1)?,
                MF::trimf(fe::NM.0, fe::NM.1, fe::NM.2)?,
                MF::trapmf(fe::ZE.0, fe::ZE.1, fe::ZE.2, fe::ZE.3)?,
                MF::trimf(fe::PM.0, fe::PM.1, fe::PM.2)?,
                MF::smf(fe::PL.0, fe::PL.1)?,
            ],
        )?;

        let derivative = LinguisticVariable::new(
            fd::NAME,
            Universe::new(fd::UNIVERSE.0, fd::UNIVERSE.1)?,
            [
                MF::zmf(fd::NL.0, fd::NL.1)?,
                MF::trimf(fd::NM.0, fd::NM.1, fd::NM.2)?,
                MF::trimf(fd::ZE.0, fd::ZE.1, fd::ZE.2)?,
                MF::trimf(fd::PM.0, fd::PM.1, fd::PM.2)?,
                MF::smf(fd::PL.0, fd::PL.1)?,
            ],
        )?;

        let actuator = LinguisticVariable::new(
            av::NAME,
            Universe::new(av::UNIVERSE.0, av::UNIVERSE.1)?,
            [
                MF::zmf(av::NL.0, av::NL.1)?,
                MF::trimf(av::NM.0, av::NM.1, av::NM.2)?,
                MF::trapmf(av::ZE.0, av::ZE.1, av::ZE.2, av::ZE.3)?,
                MF::trimf(av::PM.0, av::PM.1, av::PM.2)?,
                MF::smf(av::PL.0, av::PL.1)?,
            ],
        )?;

        Self::new(
            error,
            derivative,
            actuator,
            &force_rules(),
            inference::DEFUZZ_RESOLUTION,
            inference::OUTPUT_LIMIT,
        )
    }

    pub fn variable(&self, input: Input) -> &LinguisticVariable {
        match input {
            Input::ForceError => &self.force_error,
            Input::ForceDerivative => &self.force_derivative,
        }
    }

    pub fn actuator(&self) -> &LinguisticVariable {
        &self.actuator
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn output_limit(&self) -> f64 {
        self.output_limit
    }
}

/// База правил регулятора: два граничных правила по производной и
/// таблица 3x5 (производная NM/ZE/PM x ошибка NL..PL)
fn force_rules() -> Vec<Rule, MAX_RULES> {
    let mut rules = Vec::new();

    let _ = rules.push(Rule::single(
        Clause::new(Input::ForceDerivative, Term::NL),
        rule_table::DERIVATIVE_NL,
    ));
    let _ = rules.push(Rule::single(
        Clause::new(Input::ForceDerivative, Term::PL),
        rule_table::DERIVATIVE_PL,
    ));

    for (row, derivative) in rule_table::DERIVATIVE_ROWS.iter().enumerate() {
        for (col, error) in rule_table::ERROR_COLUMNS.iter().enumerate() {
            let _ = rules.push(Rule::and(
                Clause::new(Input::ForceDerivative, *derivative),
                Clause::new(Input::ForceError, *error),
                rule_table::CONSEQUENTS[row][col],
            ));
        }
    }

    rules
}

/// Нечеткий регулятор.
///
/// Не имеет изменяемого состояния: `evaluate` зависит только от входов,
/// поэтому один экземпляр можно вызывать из нескольких потоков.
#[derive(Debug, Clone)]
pub struct FuzzyEngine {
    config: InferenceConfig,
}

impl FuzzyEngine {
    /// Создание регулятора со штатной конфигурацией
    pub fn new() -> Result<Self, ConfigError> {
        InferenceConfig::force_controller().map(Self::with_config)
    }

    pub fn with_config(config: InferenceConfig) -> Self {
        info!(
            "Нечеткий регулятор: {} правил, сетка {} точек, предел {}",
            config.rules.len(),
            config.resolution,
            config.output_limit
        );
        Self { config }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Расчет изменения управляющего воздействия.
    ///
    /// Входы вне диапазона приводятся к его границам. Результат ограничен
    /// [-output_limit, output_limit]. Если ни одно правило не сработало,
    /// возвращается `InferenceError::EmptyAggregate`.
    pub fn evaluate(&self, force_error: f64, force_derivative: f64) -> Result<f64, InferenceError> {
        let raw = self.centroid(force_error, force_derivative)?;

        let limit = self.config.output_limit;
        let output = constrain(raw, -limit, limit);
        if output != raw {
            debug!("Выход ограничен: {} -> {}", raw, output);
        }

        trace!(
            "Вывод: ошибка {}, производная {} -> {}",
            force_error,
            force_derivative,
            output
        );
        Ok(output)
    }

    /// Степени принадлежности обоих входов, индекс через `Input::index`
    pub fn fuzzify(
        &self,
        force_error: f64,
        force_derivative: f64,
    ) -> Result<[TermDegrees; 2], InferenceError> {
        if force_error.is_nan() || force_derivative.is_nan() {
            return Err(InferenceError::NonFiniteInput);
        }

        Ok([
            self.config.force_error.fuzzify(force_error),
            self.config.force_derivative.fuzzify(force_derivative),
        ])
    }

    /// Степень срабатывания каждого правила в порядке базы правил
    pub fn rule_activations(
        &self,
        force_error: f64,
        force_derivative: f64,
    ) -> Result<Vec<f64, MAX_RULES>, InferenceError> {
        let degrees = self.fuzzify(force_error, force_derivative)?;
        Ok(self
            .config
            .rules
            .iter()
            .map(|rule| rule.firing_strength(&degrees))
            .collect())
    }

    /// Текст всех правил в порядке базы правил
    pub fn describe_rules(&self) -> Vec<RuleText, MAX_RULES> {
        let output_name = self.config.actuator.name();
        self.config
            .rules
            .iter()
            .map(|rule| rule.describe(|input| self.config.variable(input).name(), output_name))
            .collect()
    }

    /// Вывод таблицы правил в лог
    pub fn log_rule_table(&self) {
        info!("Таблица правил:");
        for (idx, (antecedent, consequent)) in self.describe_rules().iter().enumerate() {
            info!(
                "Rule {}: IF {} THEN {}",
                idx + 1,
                antecedent.as_str(),
                consequent.as_str()
            );
        }
    }

    /// Поверхность управления на декартовой сетке: строки по ошибке,
    /// столбцы по производной
    pub fn sample_surface<const R: usize, const C: usize>(
        &self,
        force_error_grid: &[f64; R],
        force_derivative_grid: &[f64; C],
    ) -> Result<SMatrix<f64, R, C>, InferenceError> {
        let mut surface = SMatrix::<f64, R, C>::zeros();
        for (i, &error) in force_error_grid.iter().enumerate() {
            for (j, &derivative) in force_derivative_grid.iter().enumerate() {
                surface[(i, j)] = self.evaluate(error, derivative)?;
            }
        }
        Ok(surface)
    }

    /// Центроид агрегированного выходного множества до ограничения
    fn centroid(&self, force_error: f64, force_derivative: f64) -> Result<f64, InferenceError> {
        let degrees = self.fuzzify(force_error, force_derivative)?;
        trace!(
            "Преобладающие термы: ошибка {}, производная {}",
            degrees[Input::ForceError.index()].dominant(),
            degrees[Input::ForceDerivative.index()].dominant()
        );
        let strengths = self.consequent_strengths(&degrees);

        let actuator = &self.config.actuator;
        defuzz::centroid(actuator.universe(), self.config.resolution, |x| {
            aggregate(actuator, &strengths, x)
        })
        .ok_or_else(|| {
            warn!(
                "Ни одно правило не сработало: ошибка {}, производная {}",
                force_error,
                force_derivative
            );
            InferenceError::EmptyAggregate
        })
    }

    /// Срез для каждого терма выхода: максимум степеней срабатывания
    /// правил с этим заключением
    fn consequent_strengths(&self, degrees: &[TermDegrees; 2]) -> [f64; TERM_COUNT] {
        let mut strengths = [0.0f64; TERM_COUNT];
        for rule in self.config.rules.iter() {
            let slot = &mut strengths[rule.consequent().index()];
            *slot = slot.max(rule.firing_strength(degrees));
        }
        strengths
    }
}

/// Агрегированное множество в точке x: max по термам от min(срез, μ(x))
#[inline]
fn aggregate(actuator: &LinguisticVariable, strengths: &[f64; TERM_COUNT], x: f64) -> f64 {
    let mut mu: f64 = 0.0;
    for term in Term::ALL {
        let cut = strengths[term.index()];
        if cut > 0.0 {
            mu = mu.max(cut.min(actuator.membership(term, x)));
        }
    }
    mu
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> FuzzyEngine {
        FuzzyEngine::new().unwrap()
    }

    /// Тот же регулятор, но с пределом во весь диапазон выхода
    fn unclamped() -> FuzzyEngine {
        let base = InferenceConfig::force_controller().unwrap();
        let config = InferenceConfig::new(
            base.force_error.clone(),
            base.force_derivative.clone(),
            base.actuator.clone(),
            base.rules(),
            base.resolution(),
            0.2,
        )
        .unwrap();
        FuzzyEngine::with_config(config)
    }

    #[test]
    fn test_standard_config() {
        let engine = engine();
        let config = engine.config();
        assert_eq!(config.rules().len(), 17);
        assert_eq!(config.resolution(), 1000);
        assert_eq!(config.output_limit(), 0.1);
        assert_eq!(config.variable(Input::ForceError).name(), "force_error");
        assert_eq!(config.variable(Input::ForceDerivative).universe().hi(), 2.0);
        assert_eq!(config.actuator().name(), "actuator_variation");
    }

    #[test]
    fn test_zero_inputs_give_zero() {
        let output = engine().evaluate(0.0, 0.0).unwrap();
        assert!(output.abs() < 1e-9, "output = {}", output);
    }

    #[test]
    fn test_positive_error_clamped() {
        // Сырой центроид 0.1207 выходит за предел и ограничивается
        assert_eq!(engine().evaluate(0.1, 0.0), Ok(0.1));

        let raw = unclamped().evaluate(0.1, 0.0).unwrap();
        assert!((raw - 0.1207238).abs() < 1e-6, "raw = {}", raw);
    }

    #[test]
    fn test_reference_points() {
        let engine = engine();
        let cases = [
            (0.03, 0.2, 0.0117169),
            (0.02, 0.0, 0.0079550),
            (0.04, -0.8, 0.0159884),
            (0.05, 0.7, -0.0249999),
        ];
        for (e, d, expected) in cases {
            let output = engine.evaluate(e, d).unwrap();
            assert!(
                (output - expected).abs() < 1e-6,
                "evaluate({}, {}) = {}, ожидалось {}",
                e,
                d,
                output,
                expected
            );
        }
    }

    #[test]
    fn test_output_always_within_limit() {
        let engine = engine();
        let values = [
            -1000.0,
            -2.0,
            -0.2,
            -0.11,
            -0.04,
            0.0,
            0.012,
            0.09,
            0.2,
            1.3,
            1000.0,
            f64::INFINITY,
            f64::NEG_INFINITY,
        ];
        for &e in values.iter() {
            for &d in values.iter() {
                let output = engine.evaluate(e, d).unwrap();
                assert!((-0.1..=0.1).contains(&output), "evaluate({}, {}) = {}", e, d, output);
            }
        }
        assert_eq!(engine.evaluate(1000.0, 1000.0), Ok(-0.1));
        assert_eq!(engine.evaluate(0.0, -1000.0), Ok(0.1));
    }

    #[test]
    fn test_antisymmetry() {
        let engine = unclamped();
        let points = [
            (0.03, 0.2),
            (0.01, 0.3),
            (0.05, 0.7),
            (-0.06, 1.0),
            (0.04, -0.8),
            (0.12, -1.4),
            (0.2, 2.0),
        ];
        for (e, d) in points {
            let forward = engine.evaluate(e, d).unwrap();
            let mirrored = engine.evaluate(-e, -d).unwrap();
            assert!(
                (forward + mirrored).abs() < 1e-9,
                "({}, {}): {} vs {}",
                e,
                d,
                forward,
                mirrored
            );
        }
    }

    #[test]
    fn test_continuous_at_breakpoints() {
        let engine = engine();
        let delta = 1e-7;
        let error_breakpoints = [
            -0.13, -0.1, -0.07, -0.05, -0.015, 0.0, 0.015, 0.05, 0.07, 0.1, 0.13,
        ];
        for bp in error_breakpoints {
            for d in [-1.2, 0.0, 0.3, 0.9] {
                let left = engine.evaluate(bp - delta, d).unwrap();
                let right = engine.evaluate(bp + delta, d).unwrap();
                assert!((left - right).abs() < 1e-5, "скачок по ошибке в {} (d = {})", bp, d);
            }
        }

        let derivative_breakpoints = [-1.75, -1.5, -1.25, -1.0, 0.0, 1.0, 1.25, 1.5, 1.75];
        for bp in derivative_breakpoints {
            for e in [-0.06, 0.0, 0.03, 0.11] {
                let left = engine.evaluate(e, bp - delta).unwrap();
                let right = engine.evaluate(e, bp + delta).unwrap();
                assert!((left - right).abs() < 1e-5, "скачок по производной в {} (e = {})", bp, e);
            }
        }
    }

    #[test]
    fn test_derivative_gap_at_half() {
        // При производной ±0.5 все термы производной равны нулю
        let engine = engine();
        assert_eq!(engine.evaluate(0.0, 0.5), Err(InferenceError::EmptyAggregate));
        assert_eq!(engine.evaluate(0.03, -0.5), Err(InferenceError::EmptyAggregate));

        let activations = engine.rule_activations(0.03, 0.5).unwrap();
        assert!(activations.iter().all(|&s| s == 0.0));

        // Рядом с разрывом выход конечен, но меняет знак
        let below = engine.evaluate(0.03, 0.4999).unwrap();
        let above = engine.evaluate(0.03, 0.5001).unwrap();
        assert!(below > 0.012 && above < -0.012);
    }

    #[test]
    fn test_empty_rule_base_reports_error() {
        let base = InferenceConfig::force_controller().unwrap();
        let sparse = [Rule::single(
            Clause::new(Input::ForceError, Term::PL),
            Term::PL,
        )];
        let config = InferenceConfig::new(
            base.force_error.clone(),
            base.force_derivative.clone(),
            base.actuator.clone(),
            &sparse,
            base.resolution(),
            base.output_limit(),
        )
        .unwrap();
        let engine = FuzzyEngine::with_config(config);

        assert_eq!(engine.evaluate(0.0, 0.0), Err(InferenceError::EmptyAggregate));
        assert_eq!(engine.evaluate(0.2, 0.0), Ok(0.1));
    }

    #[test]
    fn test_nan_input_rejected() {
        let engine = engine();
        assert_eq!(engine.evaluate(f64::NAN, 0.0), Err(InferenceError::NonFiniteInput));
        assert_eq!(engine.evaluate(0.0, f64::NAN), Err(InferenceError::NonFiniteInput));
    }

    #[test]
    fn test_deterministic() {
        let engine = engine();
        let first = engine.evaluate(0.037, -0.21).unwrap();
        for _ in 0..10 {
            assert_eq!(engine.evaluate(0.037, -0.21).unwrap(), first);
        }
    }

    #[test]
    fn test_concurrent_evaluation() {
        let engine = engine();
        let expected = engine.evaluate(0.03, 0.2).unwrap();
        std::thread::scope(|s| {
            let handles: std::vec::Vec<_> = (0..4)
                .map(|_| s.spawn(|| engine.evaluate(0.03, 0.2).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn test_describe_rules_table() {
        let expected = [
            ("force_derivative NL", "actuator_variation PL"),
            ("force_derivative PL", "actuator_variation NL"),
            ("force_derivative NM & force_error NL", "actuator_variation NL"),
            ("force_derivative NM & force_error NM", "actuator_variation PM"),
            ("force_derivative NM & force_error ZE", "actuator_variation ZE"),
            ("force_derivative NM & force_error PM", "actuator_variation PM"),
            ("force_derivative NM & force_error PL", "actuator_variation PL"),
            ("force_derivative ZE & force_error NL", "actuator_variation NL"),
            ("force_derivative ZE & force_error NM", "actuator_variation NM"),
            ("force_derivative ZE & force_error ZE", "actuator_variation ZE"),
            ("force_derivative ZE & force_error PM", "actuator_variation PM"),
            ("force_derivative ZE & force_error PL", "actuator_variation PL"),
            ("force_derivative PM & force_error NL", "actuator_variation NL"),
            ("force_derivative PM & force_error NM", "actuator_variation NM"),
            ("force_derivative PM & force_error ZE", "actuator_variation ZE"),
            ("force_derivative PM & force_error PM", "actuator_variation NM"),
            ("force_derivative PM & force_error PL", "actuator_variation PL"),
        ];

        let rules = engine().describe_rules();
        assert_eq!(rules.len(), expected.len());
        for ((antecedent, consequent), (want_a, want_c)) in rules.iter().zip(expected) {
            assert_eq!(antecedent.as_str(), want_a);
            assert_eq!(consequent.as_str(), want_c);
        }
    }

    #[test]
    fn test_consequent_strengths() {
        let engine = engine();
        let degrees = engine.fuzzify(0.0, 0.0).unwrap();
        assert_eq!(engine.consequent_strengths(&degrees), [0.0, 0.0, 1.0, 0.0, 0.0]);

        // Несколько правил с одним заключением: берется максимум
        let degrees = engine.fuzzify(0.03, 0.2).unwrap();
        let strengths = engine.consequent_strengths(&degrees);
        let activations = engine.rule_activations(0.03, 0.2).unwrap();
        for term in Term::ALL {
            let expected = engine
                .config()
                .rules()
                .iter()
                .zip(activations.iter())
                .filter(|(rule, _)| rule.consequent() == term)
                .fold(0.0f64, |acc, (_, &s)| acc.max(s));
            assert_eq!(strengths[term.index()], expected, "терм {}", term.label());
        }
    }

    #[test]
    fn test_rule_activations_at_zero() {
        let activations = engine().rule_activations(0.0, 0.0).unwrap();
        assert_eq!(activations.len(), 17);
        // Срабатывает только ZE & ZE -> ZE (правило 10)
        for (idx, &s) in activations.iter().enumerate() {
            let expected = if idx == 9 { 1.0 } else { 0.0 };
            assert_eq!(s, expected, "правило {}", idx + 1);
        }
    }

    #[test]
    fn test_sample_surface() {
        let engine = engine();
        let errors = [-0.1, 0.0, 0.1];
        let derivatives = [-1.0, 0.0, 1.0, 2.0];
        let surface = engine.sample_surface(&errors, &derivatives).unwrap();

        assert_eq!(surface.nrows(), 3);
        assert_eq!(surface.ncols(), 4);
        for (i, &e) in errors.iter().enumerate() {
            for (j, &d) in derivatives.iter().enumerate() {
                assert_eq!(surface[(i, j)], engine.evaluate(e, d).unwrap());
            }
        }
        assert_eq!(surface[(2, 1)], 0.1);
        assert_eq!(surface[(0, 1)], -0.1);
    }

    #[test]
    fn test_sample_surface_propagates_error() {
        let surface = engine().sample_surface(&[0.0], &[0.5]);
        assert_eq!(surface, Err(InferenceError::EmptyAggregate));
    }

    #[test]
    fn test_invalid_config() {
        let base = InferenceConfig::force_controller().unwrap();
        let build = |resolution, limit| {
            InferenceConfig::new(
                base.force_error.clone(),
                base.force_derivative.clone(),
                base.actuator.clone(),
                base.rules(),
                resolution,
                limit,
            )
            .map(|_| ())
        };
        assert_eq!(build(1, 0.1), Err(ConfigError::InvalidResolution));
        assert_eq!(build(1000, 0.0), Err(ConfigError::InvalidOutputLimit));
        assert_eq!(build(1000, f64::NAN), Err(ConfigError::InvalidOutputLimit));
        assert_eq!(build(1000, 0.1), Ok(()));
    }
}
