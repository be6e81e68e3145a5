//! Функции принадлежности
//!
//! Все функции вычисляются аналитически и возвращают степень в [0, 1].
//! За пределами носителя значения насыщаются (0 или 1), ошибок нет.

use crate::error::{ConfigError, ShapeKind};

/// Форма функции принадлежности
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MembershipFunction {
    /// Z-образная: 1 при x <= a, квадратичный спуск до 0 при x >= b
    Z { a: f64, b: f64 },
    /// Треугольная: 0 вне [a, c], пик 1 в точке b
    Triangular { a: f64, b: f64, c: f64 },
    /// Трапециевидная: 0 вне [a, d], полка 1 на [b, c]
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
    /// S-образная: зеркальная к Z, 0 при x <= a, 1 при x >= b
    S { a: f64, b: f64 },
}

impl MembershipFunction {
    /// Z-образная функция (требуется a < b)
    pub fn zmf(a: f64, b: f64) -> Result<Self, ConfigError> {
        Self::Z { a, b }.validated()
    }

    /// Треугольная функция (требуется a <= b <= c)
    pub fn trimf(a: f64, b: f64, c: f64) -> Result<Self, ConfigError> {
        Self::Triangular { a, b, c }.validated()
    }

    /// Трапециевидная функция (требуется a <= b <= c <= d)
    pub fn trapmf(a: f64, b: f64, c: f64, d: f64) -> Result<Self, ConfigError> {
        Self::Trapezoidal { a, b, c, d }.validated()
    }

    /// S-образная функция (требуется a < b)
    pub fn smf(a: f64, b: f64) -> Result<Self, ConfigError> {
        Self::S { a, b }.validated()
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Z { .. } => ShapeKind::Z,
            Self::Triangular { .. } => ShapeKind::Triangular,
            Self::Trapezoidal { .. } => ShapeKind::Trapezoidal,
            Self::S { .. } => ShapeKind::S,
        }
    }

    /// Проверка параметров
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = match *self {
            Self::Z { a, b } | Self::S { a, b } => a.is_finite() && b.is_finite() && a < b,
            Self::Triangular { a, b, c } => {
                a.is_finite() && b.is_finite() && c.is_finite() && a <= b && b <= c
            }
            Self::Trapezoidal { a, b, c, d } => {
                a.is_finite()
                    && b.is_finite()
                    && c.is_finite()
                    && d.is_finite()
                    && a <= b
                    && b <= c
                    && c <= d
            }
        };

        if ok {
            Ok(())
        } else {
            Err(ConfigError::InvalidParameters { kind: self.kind() })
        }
    }

    fn validated(self) -> Result<Self, ConfigError> {
        self.validate().map(|_| self)
    }

    /// Степень принадлежности четкого значения
    pub fn evaluate(&self, x: f64) -> f64 {
        match *self {
            Self::Z { a, b } => 1.0 - s_curve(x, a, b),
            Self::S { a, b } => s_curve(x, a, b),
            Self::Triangular { a, b, c } => {
                if x == b {
                    1.0
                } else if x <= a || x >= c {
                    0.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (c - x) / (c - b)
                }
            }
            Self::Trapezoidal { a, b, c, d } => {
                if x >= b && x <= c {
                    1.0
                } else if x <= a || x >= d {
                    0.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (d - x) / (d - c)
                }
            }
        }
    }
}

/// Квадратичная S-кривая: 0 при x <= a, 1 при x >= b, 0.5 в середине
#[inline]
fn s_curve(x: f64, a: f64, b: f64) -> f64 {
    if x <= a {
        return 0.0;
    }
    if x >= b {
        return 1.0;
    }

    let mid = (a + b) / 2.0;
    let width = b - a;
    if x <= mid {
        let t = (x - a) / width;
        2.0 * t * t
    } else {
        let t = (x - b) / width;
        1.0 - 2.0 * t * t
    }
}
