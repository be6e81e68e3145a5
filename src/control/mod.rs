//! Нечеткий вывод: функции принадлежности, переменные, правила, регулятор

pub mod defuzz;
pub mod fuzzy;
pub mod membership;
pub mod rules;
pub mod variable;
