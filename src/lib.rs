//! Нечеткий регулятор усилия (Mamdani, дефаззификация по центроиду)
//!
//! Два входа: ошибка усилия (кг) и ее производная (кг/с), один выход:
//! относительное изменение управляющего воздействия.

#![cfg_attr(not(test), no_std)]

// Макросы логирования должны быть объявлены до остальных модулей
#[macro_use]
mod fmt;

pub mod config;
pub mod control;
pub mod data;
pub mod error;
pub mod simulation;
pub mod utils;

pub use control::fuzzy::{FuzzyEngine, InferenceConfig};
pub use control::membership::MembershipFunction;
pub use control::rules::{Clause, Rule};
pub use control::variable::{Input, LinguisticVariable, Term, Universe};
pub use data::{ForceSample, RuleText, TermDegrees};
pub use error::{ConfigError, InferenceError, SimulationError};
