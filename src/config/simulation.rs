//! Параметры моделирования контура слежения за усилием

/// Шаг дискретизации (с)
pub const SAMPLING_TIME_S: f64 = 0.1;

/// Задание в виде меандра
pub mod setpoint {
    /// Период меандра (с)
    pub const PERIOD_S: f64 = 10.0;

    /// Нижний уровень (кг)
    pub const LOWER_KG: f64 = 0.2;

    /// Верхний уровень (кг)
    pub const UPPER_KG: f64 = 0.6;
}

/// Начальное состояние объекта
pub mod initial {
    /// Начальное усилие (кг)
    pub const FORCE_KG: f64 = 0.4;

    /// Начальная производная усилия (кг/с)
    pub const FORCE_DERIVATIVE: f64 = 0.0;
}

/// Длительность моделирования в периодах задания
pub const DURATION_PERIODS: f64 = 4.0;
