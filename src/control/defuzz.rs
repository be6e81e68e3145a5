//! Дефаззификация по центру тяжести (центроид)

use crate::control::variable::Universe;
use crate::utils::math::grid_point;

/// Центроид нечеткого множества на равномерной сетке из `resolution` точек.
///
/// Между соседними точками функция считается линейной, площадь и момент
/// каждого отрезка (трапеции) вычисляются точно. Возвращает `None`, если
/// площадь множества равна нулю.
pub fn centroid<F>(universe: Universe, resolution: usize, membership: F) -> Option<f64>
where
    F: Fn(f64) -> f64,
{
    let (lo, hi) = (universe.lo(), universe.hi());

    let mut x_prev = grid_point(lo, hi, resolution, 0);
    let mut y_prev = membership(x_prev);
    let mut area = 0.0;
    let mut moment = 0.0;

    for i in 1..resolution {
        let x = grid_point(lo, hi, resolution, i);
        let y = membership(x);

        if y_prev != 0.0 || y != 0.0 {
            let h = x - x_prev;
            let segment_area = h * (y_prev + y) / 2.0;
            // Момент трапеции относительно нуля: S·x1 + h²·(y1 + 2·y2) / 6
            area += segment_area;
            moment += segment_area * x_prev + h * h * (y_prev + 2.0 * y) / 6.0;
        }

        x_prev = x;
        y_prev = y;
    }

    if area > 0.0 {
        Some(moment / area)
    } else {
        None
    }
}
