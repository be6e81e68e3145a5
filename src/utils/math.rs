//! Математические функции и утилиты

/// Ограничение значения в заданных пределах
#[inline(always)]
pub fn constrain(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Линейная интерполяция между двумя значениями
/// t: 0.0 = a, 1.0 = b
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * constrain(t, 0.0, 1.0)
}

/// Точка `index` равномерной сетки из `count` точек на [lo, hi]
///
/// Последняя точка всегда равна `hi` (без накопленной ошибки шага).
#[inline]
pub fn grid_point(lo: f64, hi: f64, count: usize, index: usize) -> f64 {
    if count < 2 || index + 1 >= count {
        return if count < 2 { lo } else { hi };
    }
    let step = (hi - lo) / (count - 1) as f64;
    lo + step * index as f64
}

/// Знак числа: -1, 0 или 1 (для нуля возвращает 0)
#[inline]
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
