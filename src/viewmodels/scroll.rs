// Detección de "final de lista" para el scroll infinito

/// Margen por defecto antes del final, en píxeles
pub const DEFAULT_SCROLL_MARGIN: f64 = 5.0;

/// `true` cuando la parte visible llega a `margin` píxeles del final del contenido.
pub fn near_end(scroll_top: f64, viewport_height: f64, scroll_height: f64, margin: f64) -> bool {
    scroll_top + viewport_height >= scroll_height - margin
}
