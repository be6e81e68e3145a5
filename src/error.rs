//! Ошибки конфигурации, вывода и моделирования

use core::fmt;

/// Тип функции принадлежности, у которой нарушены параметры
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShapeKind {
    Z,
    Triangular,
    Trapezoidal,
    S,
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Z => "zmf",
            ShapeKind::Triangular => "trimf",
            ShapeKind::Trapezoidal => "trapmf",
            ShapeKind::S => "smf",
        }
    }
}

/// Ошибки конфигурации регулятора (фатальны, возникают только при создании)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Нарушен порядок параметров функции принадлежности или параметр не конечен
    InvalidParameters { kind: ShapeKind },
    /// Пустой или неконечный диапазон переменной
    InvalidUniverse,
    /// Имя переменной не помещается в текст правила
    NameTooLong,
    /// Правило без условий
    EmptyAntecedent,
    /// В условии правила больше двух термов
    TooManyClauses,
    /// База правил переполнена
    TooManyRules,
    /// Сетка дефаззификации меньше двух точек
    InvalidResolution,
    /// Предел выхода должен быть конечным и положительным
    InvalidOutputLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParameters { kind } => {
                write!(f, "invalid {} parameters", kind.name())
            }
            ConfigError::InvalidUniverse => write!(f, "invalid universe bounds"),
            ConfigError::NameTooLong => write!(f, "variable name too long"),
            ConfigError::EmptyAntecedent => write!(f, "rule has no antecedent clauses"),
            ConfigError::TooManyClauses => write!(f, "rule has too many antecedent clauses"),
            ConfigError::TooManyRules => write!(f, "rule base is full"),
            ConfigError::InvalidResolution => write!(f, "defuzzification grid too small"),
            ConfigError::InvalidOutputLimit => write!(f, "invalid output limit"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ConfigError::InvalidParameters { kind } => {
                defmt::write!(fmt, "Config: invalid {} parameters", kind.name())
            }
            ConfigError::InvalidUniverse => defmt::write!(fmt, "Config: invalid universe"),
            ConfigError::NameTooLong => defmt::write!(fmt, "Config: name too long"),
            ConfigError::EmptyAntecedent => defmt::write!(fmt, "Config: empty antecedent"),
            ConfigError::TooManyClauses => defmt::write!(fmt, "Config: too many clauses"),
            ConfigError::TooManyRules => defmt::write!(fmt, "Config: too many rules"),
            ConfigError::InvalidResolution => defmt::write!(fmt, "Config: invalid resolution"),
            ConfigError::InvalidOutputLimit => defmt::write!(fmt, "Config: invalid output limit"),
        }
    }
}

/// Ошибки нечеткого вывода
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceError {
    /// Ни одно правило не сработало: площадь выходного множества равна нулю
    EmptyAggregate,
    /// Вход равен NaN
    NonFiniteInput,
}

impl fmt::Display for InferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferenceError::EmptyAggregate => {
                write!(f, "aggregated output set has zero area")
            }
            InferenceError::NonFiniteInput => write!(f, "input is NaN"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for InferenceError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            InferenceError::EmptyAggregate => defmt::write!(fmt, "Inference: empty aggregate"),
            InferenceError::NonFiniteInput => defmt::write!(fmt, "Inference: NaN input"),
        }
    }
}

/// Ошибки моделирования контура
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationError {
    Inference(InferenceError),
    /// Шаг, период или длительность не положительны
    InvalidParameters,
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Inference(e) => write!(f, "inference failed: {}", e),
            SimulationError::InvalidParameters => write!(f, "invalid simulation parameters"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SimulationError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            SimulationError::Inference(e) => defmt::write!(fmt, "Simulation: {}", e),
            SimulationError::InvalidParameters => {
                defmt::write!(fmt, "Simulation: invalid parameters")
            }
        }
    }
}

impl From<InferenceError> for SimulationError {
    fn from(error: InferenceError) -> Self {
        SimulationError::Inference(error)
    }
}
