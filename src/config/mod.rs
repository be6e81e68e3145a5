//! Конфигурация регулятора и моделирования

pub mod controller;
pub mod simulation;
