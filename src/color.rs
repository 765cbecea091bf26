use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Fixed chart colours
// ---------------------------------------------------------------------------

/// Wedge colours of the performance pie, in slice order.
pub const PIE_COLORS: [Color32; 3] = [
    Color32::from_rgb(0xff, 0x99, 0x99),
    Color32::from_rgb(0x66, 0xb3, 0xff),
    Color32::from_rgb(0x99, 0xff, 0x99),
];

pub const EMPLOYEE_BAR: Color32 = Color32::from_rgb(0, 0, 255);

/// Red at 60% opacity, drawn over the employee bars.
pub const DEPARTMENT_AVERAGE_BAR: Color32 = Color32::from_rgba_premultiplied(153, 0, 0, 153);

// ---------------------------------------------------------------------------
// Gradients
// ---------------------------------------------------------------------------

const VIRIDIS_STOPS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

const COOLWARM_STOPS: [(u8, u8, u8); 3] = [(59, 76, 192), (221, 221, 221), (180, 4, 38)];

/// Sample `n` colours from a piecewise-linear gradient, mixing in linear RGB.
/// With `n > 1` the endpoints are the first and last stop.
fn sample_gradient(stops: &[(u8, u8, u8)], n: usize) -> Vec<Color32> {
    let linear: Vec<LinSrgb> = stops
        .iter()
        .map(|&(r, g, b)| Srgb::new(r, g, b).into_format::<f32>().into_linear())
        .collect();
    let segments = (linear.len() - 1) as f32;

    (0..n)
        .map(|i| {
            let t = if n > 1 { i as f32 / (n - 1) as f32 } else { 0.5 };
            let pos = t * segments;
            let seg = (pos.floor() as usize).min(linear.len() - 2);
            let mixed = linear[seg].mix(linear[seg + 1], pos - seg as f32);
            let rgb: Srgb<u8> = Srgb::from_linear(mixed);
            Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

/// `n` colours along the viridis colormap.
pub fn viridis(n: usize) -> Vec<Color32> {
    sample_gradient(&VIRIDIS_STOPS, n)
}

/// `n` colours along the diverging coolwarm colormap.
pub fn coolwarm(n: usize) -> Vec<Color32> {
    sample_gradient(&COOLWARM_STOPS, n)
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Department → Color32
// ---------------------------------------------------------------------------

/// Maps each department to a distinct colour for labels in the side panel.
#[derive(Debug, Clone, Default)]
pub struct DepartmentColors {
    mapping: BTreeMap<String, Color32>,
}

impl DepartmentColors {
    pub fn new(departments: &[String]) -> Self {
        let mapping = departments
            .iter()
            .cloned()
            .zip(generate_palette(departments.len()))
            .collect();
        DepartmentColors { mapping }
    }

    pub fn color_for(&self, department: &str) -> Color32 {
        self.mapping
            .get(department)
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_endpoints() {
        let colors = viridis(4);
        assert_eq!(colors.len(), 4);
        assert_eq!(colors[0], Color32::from_rgb(68, 1, 84));
        assert_eq!(colors[3], Color32::from_rgb(253, 231, 37));

        let cw = coolwarm(2);
        assert_eq!(cw[0], Color32::from_rgb(59, 76, 192));
        assert_eq!(cw[1], Color32::from_rgb(180, 4, 38));
    }

    #[test]
    fn empty_gradient() {
        assert!(viridis(0).is_empty());
        assert_eq!(coolwarm(1).len(), 1);
    }

    #[test]
    fn palette_is_distinct() {
        let p = generate_palette(5);
        assert_eq!(p.len(), 5);
        for i in 0..p.len() {
            for j in (i + 1)..p.len() {
                assert_ne!(p[i], p[j]);
            }
        }
    }

    #[test]
    fn department_lookup() {
        let depts = vec!["IT".to_string(), "Sales".to_string()];
        let colors = DepartmentColors::new(&depts);
        assert_ne!(colors.color_for("IT"), colors.color_for("Sales"));
        assert_eq!(colors.color_for("Legal"), Color32::GRAY);
    }
}
