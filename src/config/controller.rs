//! Параметры нечеткого регулятора усилия
//!
//! Функции принадлежности задаются тройками/четверками точек:
//! zmf/smf (a, b), trimf (a, b, c), trapmf (a, b, c, d).

/// Ошибка усилия (кг)
pub mod force_error {
    pub const NAME: &str = "force_error";
    pub const UNIVERSE: (f64, f64) = (-0.2, 0.2);

    pub const NL: (f64, f64) = (-0.13, -0.07); // zmf
    pub const NM: (f64, f64, f64) = (-0.1, -0.05, 0.0); // trimf
    pub const ZE: (f64, f64, f64, f64) = (-0.05, -0.015, 0.015, 0.05); // trapmf
    pub const PM: (f64, f64, f64) = (0.0, 0.05, 0.1); // trimf
    pub const PL: (f64, f64) = (0.07, 0.13); // smf
}

/// Производная усилия (кг/с)
pub mod force_derivative {
    pub const NAME: &str = "force_derivative";
    pub const UNIVERSE: (f64, f64) = (-2.0, 2.0);

    pub const NL: (f64, f64) = (-1.75, -1.25); // zmf
    pub const NM: (f64, f64, f64) = (-1.5, -1.0, -0.5); // trimf
    pub const ZE: (f64, f64, f64) = (-0.5, 0.0, 0.5); // trimf
    pub const PM: (f64, f64, f64) = (0.5, 1.0, 1.5); // trimf
    pub const PL: (f64, f64) = (1.25, 1.75); // smf
}

/// Относительное изменение управляющего воздействия (безразмерное)
pub mod actuator_variation {
    pub const NAME: &str = "actuator_variation";
    pub const UNIVERSE: (f64, f64) = (-0.2, 0.2);

    pub const NL: (f64, f64) = (-0.075, -0.025); // zmf
    pub const NM: (f64, f64, f64) = (-0.05, -0.025, 0.0); // trimf
    pub const ZE: (f64, f64, f64, f64) = (-0.025, -0.0075, 0.0075, 0.025); // trapmf
    pub const PM: (f64, f64, f64) = (0.0, 0.025, 0.05); // trimf
    pub const PL: (f64, f64) = (0.025, 0.075); // smf
}

/// Параметры механизма вывода
pub mod inference {
    /// Число точек сетки выходной переменной для дефаззификации
    pub const DEFUZZ_RESOLUTION: usize = 1000;

    /// Ограничение выхода регулятора (-0.1 до 0.1)
    pub const OUTPUT_LIMIT: f64 = 0.1;

    /// Максимальное число правил в базе
    pub const MAX_RULES: usize = 32;

    /// Максимальное число термов в условии правила
    pub const MAX_CLAUSES: usize = 2;

    /// Максимальная длина имени лингвистической переменной
    pub const MAX_NAME_LEN: usize = 24;
}

/// Таблица правил для строк NM, ZE, PM производной усилия.
///
/// Строка выбирается термом производной, столбец термом ошибки
/// (NL, NM, ZE, PM, PL), значение это терм выхода.
pub mod rule_table {
    use crate::control::variable::Term::{self, *};

    pub const DERIVATIVE_ROWS: [Term; 3] = [NM, ZE, PM];

    pub const ERROR_COLUMNS: [Term; 5] = [NL, NM, ZE, PM, PL];

    pub const CONSEQUENTS: [[Term; 5]; 3] = [
        [NL, PM, ZE, PM, PL], // производная NM
        [NL, NM, ZE, PM, PL], // производная ZE
        [NL, NM, ZE, NM, PL], // производная PM
    ];

    /// Граничное правило: производная NL -> выход PL
    pub const DERIVATIVE_NL: Term = PL;

    /// Граничное правило: производная PL -> выход NL
    pub const DERIVATIVE_PL: Term = NL;
}
