// src/data/mod.rs
use heapless::String;

use crate::control::variable::{Term, TERM_COUNT};

/// Емкость текста условия правила
pub const ANTECEDENT_TEXT_LEN: usize = 64;
/// Емкость текста заключения правила
pub const CONSEQUENT_TEXT_LEN: usize = 32;

/// Текст правила для диагностики: (условие, заключение)
pub type RuleText = (String<ANTECEDENT_TEXT_LEN>, String<CONSEQUENT_TEXT_LEN>);

/// Степени принадлежности четкого значения всем термам переменной
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TermDegrees([f64; TERM_COUNT]);

impl TermDegrees {
    pub fn new(degrees: [f64; TERM_COUNT]) -> Self {
        Self(degrees)
    }

    #[inline]
    pub fn get(&self, term: Term) -> f64 {
        self.0[term.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Терм с наибольшей степенью (при равенстве первый по порядку)
    pub fn dominant(&self) -> Term {
        let mut best = Term::NL;
        for term in Term::ALL {
            if self.get(term) > self.get(best) {
                best = term;
            }
        }
        best
    }
}

/// Один шаг моделирования контура усилия
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ForceSample {
    pub time_s: f64,       // Время шага (с)
    pub desired_kg: f64,   // Задание усилия (кг)
    pub error_kg: f64,     // Ошибка усилия (кг)
    pub actuator: f64,     // Выход регулятора (-0.1 - 0.1)
    pub force_kg: f64,     // Усилие после воздействия (кг)
    pub derivative: f64,   // Производная усилия после воздействия (кг/с)
}
