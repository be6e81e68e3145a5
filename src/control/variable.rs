//! Лингвистические переменные: диапазон, термы и их функции принадлежности

use crate::config::controller::inference::MAX_NAME_LEN;
use crate::control::membership::MembershipFunction;
use crate::data::TermDegrees;
use crate::error::ConfigError;
use crate::utils::math::{constrain, grid_point};

/// Число термов у каждой переменной
pub const TERM_COUNT: usize = 5;

/// Лингвистический терм
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Term {
    /// Отрицательное большое
    NL = 0,
    /// Отрицательное среднее
    NM = 1,
    /// Около нуля
    ZE = 2,
    /// Положительное среднее
    PM = 3,
    /// Положительное большое
    PL = 4,
}

impl Term {
    pub const ALL: [Term; TERM_COUNT] = [Term::NL, Term::NM, Term::ZE, Term::PM, Term::PL];

    pub fn label(&self) -> &'static str {
        match self {
            Term::NL => "NL",
            Term::NM => "NM",
            Term::ZE => "ZE",
            Term::PM => "PM",
            Term::PL => "PL",
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Входная переменная регулятора
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Input {
    /// Ошибка усилия (кг)
    ForceError = 0,
    /// Производная усилия (кг/с)
    ForceDerivative = 1,
}

impl Input {
    pub const ALL: [Input; 2] = [Input::ForceError, Input::ForceDerivative];

    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Замкнутый диапазон значений переменной [lo, hi]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Universe {
    lo: f64,
    hi: f64,
}

impl Universe {
    pub fn new(lo: f64, hi: f64) -> Result<Self, ConfigError> {
        if lo.is_finite() && hi.is_finite() && lo < hi {
            Ok(Self { lo, hi })
        } else {
            Err(ConfigError::InvalidUniverse)
        }
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// Приведение значения к диапазону (бесконечности тоже)
    #[inline]
    pub fn clip(&self, value: f64) -> f64 {
        constrain(value, self.lo, self.hi)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lo && value <= self.hi
    }
}

/// Лингвистическая переменная с пятью термами NL..PL
#[derive(Debug, Clone)]
pub struct LinguisticVariable {
    name: &'static str,
    universe: Universe,
    terms: [MembershipFunction; TERM_COUNT],
}

impl LinguisticVariable {
    /// Создание переменной; термы передаются в порядке NL, NM, ZE, PM, PL
    pub fn new(
        name: &'static str,
        universe: Universe,
        terms: [MembershipFunction; TERM_COUNT],
    ) -> Result<Self, ConfigError> {
        if name.len() > MAX_NAME_LEN {
            return Err(ConfigError::NameTooLong);
        }
        for mf in terms.iter() {
            mf.validate()?;
        }

        Ok(Self {
            name,
            universe,
            terms,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn universe(&self) -> Universe {
        self.universe
    }

    pub fn term(&self, term: Term) -> &MembershipFunction {
        &self.terms[term.index()]
    }

    /// Степень принадлежности значения терму (без приведения к диапазону)
    #[inline]
    pub fn membership(&self, term: Term, x: f64) -> f64 {
        self.terms[term.index()].evaluate(x)
    }

    /// Фаззификация: степени всех термов для четкого значения.
    /// Значение предварительно приводится к диапазону переменной.
    pub fn fuzzify(&self, value: f64) -> TermDegrees {
        if !self.universe.contains(value) {
            trace!("{}: значение {} вне диапазона, приводится к границе", self.name, value);
        }
        let x = self.universe.clip(value);
        let mut degrees = [0.0; TERM_COUNT];
        for term in Term::ALL {
            degrees[term.index()] = self.membership(term, x);
        }
        TermDegrees::new(degrees)
    }

    /// Заполнение буфера значениями терма на равномерной сетке диапазона
    /// (для графиков функций принадлежности)
    pub fn sample_term(&self, term: Term, out: &mut [f64]) {
        let count = out.len();
        let mf = self.term(term);
        for (i, y) in out.iter_mut().enumerate() {
            *y = mf.evaluate(grid_point(self.universe.lo, self.universe.hi, count, i));
        }
    }
}
