//! Нечеткие правила: условие из одного или двух термов (И = минимум)
//! и заключение по выходной переменной

use core::fmt::Write;

use heapless::{String, Vec};

use crate::config::controller::inference::MAX_CLAUSES;
use crate::control::variable::{Input, Term};
use crate::data::{RuleText, TermDegrees};
use crate::error::ConfigError;

/// Условие вида "переменная терм"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Clause {
    pub input: Input,
    pub term: Term,
}

impl Clause {
    pub const fn new(input: Input, term: Term) -> Self {
        Self { input, term }
    }
}

/// Правило: ЕСЛИ условие ТО выход = терм (вес 1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    antecedent: Vec<Clause, MAX_CLAUSES>,
    consequent: Term,
}

impl Rule {
    /// Правило с одним условием
    pub fn single(clause: Clause, consequent: Term) -> Self {
        let mut antecedent = Vec::new();
        let _ = antecedent.push(clause);
        Self {
            antecedent,
            consequent,
        }
    }

    /// Правило с двумя условиями, объединенными через И
    pub fn and(first: Clause, second: Clause, consequent: Term) -> Self {
        let mut antecedent = Vec::new();
        let _ = antecedent.push(first);
        let _ = antecedent.push(second);
        Self {
            antecedent,
            consequent,
        }
    }

    /// Правило из произвольного списка условий (от 1 до MAX_CLAUSES)
    pub fn new(clauses: &[Clause], consequent: Term) -> Result<Self, ConfigError> {
        if clauses.is_empty() {
            return Err(ConfigError::EmptyAntecedent);
        }
        let antecedent =
            Vec::from_slice(clauses).map_err(|_| ConfigError::TooManyClauses)?;

        Ok(Self {
            antecedent,
            consequent,
        })
    }

    pub fn antecedent(&self) -> &[Clause] {
        &self.antecedent
    }

    pub fn consequent(&self) -> Term {
        self.consequent
    }

    /// Степень срабатывания: минимум степеней всех условий.
    /// `degrees` индексируется через `Input::index`.
    pub fn firing_strength(&self, degrees: &[TermDegrees; 2]) -> f64 {
        self.antecedent
            .iter()
            .map(|clause| degrees[clause.input.index()].get(clause.term))
            .fold(1.0, f64::min)
    }

    /// Текст правила, например ("force_derivative NM & force_error NL",
    /// "actuator_variation NL")
    pub fn describe<'a>(
        &self,
        input_name: impl Fn(Input) -> &'a str,
        output_name: &str,
    ) -> RuleText {
        let mut antecedent = String::new();
        for (i, clause) in self.antecedent.iter().enumerate() {
            if i > 0 {
                let _ = antecedent.push_str(" & ");
            }
            // Емкость строк рассчитана на MAX_NAME_LEN, проверенный при создании переменных
            let _ = write!(antecedent, "{} {}", input_name(clause.input), clause.term.label());
        }

        let mut consequent = String::new();
        let _ = write!(consequent, "{} {}", output_name, self.consequent.label());

        (antecedent, consequent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(input: Input) -> &'static str {
        match input {
            Input::ForceError => "force_error",
            Input::ForceDerivative => "force_derivative",
        }
    }

    #[test]
    fn test_firing_strength_min() {
        let rule = Rule::and(
            Clause::new(Input::ForceDerivative, Term::ZE),
            Clause::new(Input::ForceError, Term::PM),
            Term::PM,
        );
        let degrees = [
            TermDegrees::new([0.0, 0.0, 0.3, 0.6, 0.0]),
            TermDegrees::new([0.0, 0.0, 0.8, 0.1, 0.0]),
        ];
        assert_eq!(rule.firing_strength(&degrees), 0.6);
    }

    #[test]
    fn test_single_clause_uses_degree_directly() {
        let rule = Rule::single(Clause::new(Input::ForceDerivative, Term::NL), Term::PL);
        let degrees = [
            TermDegrees::new([1.0; 5]),
            TermDegrees::new([0.25, 0.0, 0.0, 0.0, 0.0]),
        ];
        assert_eq!(rule.firing_strength(&degrees), 0.25);
    }

    #[test]
    fn test_new_validates_clause_count() {
        assert_eq!(Rule::new(&[], Term::ZE), Err(ConfigError::EmptyAntecedent));

        let c = Clause::new(Input::ForceError, Term::ZE);
        assert_eq!(Rule::new(&[c, c, c], Term::ZE), Err(ConfigError::TooManyClauses));
        assert_eq!(Rule::new(&[c], Term::ZE), Ok(Rule::single(c, Term::ZE)));
    }

    #[test]
    fn test_describe() {
        let rule = Rule::and(
            Clause::new(Input::ForceDerivative, Term::NM),
            Clause::new(Input::ForceError, Term::NL),
            Term::NL,
        );
        let (antecedent, consequent) = rule.describe(names, "actuator_variation");
        assert_eq!(antecedent.as_str(), "force_derivative NM & force_error NL");
        assert_eq!(consequent.as_str(), "actuator_variation NL");

        let rule = Rule::single(Clause::new(Input::ForceDerivative, Term::PL), Term::NL);
        let (antecedent, _) = rule.describe(names, "actuator_variation");
        assert_eq!(antecedent.as_str(), "force_derivative PL");
    }
}
