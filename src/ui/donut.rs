use std::f32::consts::TAU;

use eframe::egui::{self, Align2, Color32, FontId, Mesh, Pos2, Sense, Shape, Ui};

use crate::charts::{Chart, ChartBody};

const SHADOW: Color32 = Color32::from_gray(40);
const SHADOW_OFFSET: egui::Vec2 = egui::vec2(4.0, 4.0);

/// Angular span of one wedge, in radians, counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    start: f32,
    end: f32,
}

impl Span {
    fn mid(self) -> f32 {
        (self.start + self.end) / 2.0
    }
}

/// Split the full circle by `fractions`, counter-clockwise from
/// `start_degrees`.
fn spans(fractions: &[f64], start_degrees: f32) -> Vec<Span> {
    let mut angle = start_degrees.to_radians();
    fractions
        .iter()
        .map(|&f| {
            let sweep = f as f32 * TAU;
            let span = Span {
                start: angle,
                end: angle + sweep,
            };
            angle += sweep;
            span
        })
        .collect()
}

/// Screen point at `radius` and counter-clockwise `angle` around `center`.
fn polar(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + egui::vec2(radius * angle.cos(), -radius * angle.sin())
}

/// Triangulated ring segment between `inner` and `outer` radius.
fn ring_segment(center: Pos2, inner: f32, outer: f32, span: Span, color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    let steps = (((span.end - span.start) / TAU * 128.0).ceil() as u32).max(2);
    for k in 0..=steps {
        let a = span.start + (span.end - span.start) * k as f32 / steps as f32;
        mesh.colored_vertex(polar(center, outer, a), color);
        mesh.colored_vertex(polar(center, inner, a), color);
        if k > 0 {
            let i = 2 * k;
            mesh.add_triangle(i - 2, i - 1, i);
            mesh.add_triangle(i - 1, i + 1, i);
        }
    }
    mesh
}

// ---------------------------------------------------------------------------
// Donut chart
// ---------------------------------------------------------------------------

/// Paint a [`ChartBody::Donut`] with the egui painter.
pub fn donut(ui: &mut Ui, chart: &Chart, height: f32) {
    let ChartBody::Donut {
        wedges,
        width,
        start_angle,
        shadow,
    } = &chart.body
    else {
        return;
    };

    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(ui.available_width(), height), Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let outer = rect.height().min(rect.width()) * 0.38;
    let inner = outer * (1.0 - width);

    let fractions: Vec<f64> = wedges.iter().map(|w| w.fraction).collect();
    let spans = spans(&fractions, *start_angle);

    let offsets: Vec<egui::Vec2> = wedges
        .iter()
        .zip(&spans)
        .map(|(w, span)| polar(Pos2::ZERO, w.explode * outer, span.mid()).to_vec2())
        .collect();

    if *shadow {
        for (span, offset) in spans.iter().zip(&offsets) {
            let c = center + *offset + SHADOW_OFFSET;
            painter.add(Shape::mesh(ring_segment(c, inner, outer, *span, SHADOW)));
        }
    }

    let text_color = chart.theme.text;
    let font = FontId::proportional(14.0);
    for ((wedge, span), offset) in wedges.iter().zip(&spans).zip(&offsets) {
        let c = center + *offset;
        painter.add(Shape::mesh(ring_segment(c, inner, outer, *span, wedge.color)));

        let mid = span.mid();
        let label_pos = polar(c, outer * 1.1, mid);
        let anchor = if mid.cos() >= 0.0 {
            Align2::LEFT_CENTER
        } else {
            Align2::RIGHT_CENTER
        };
        painter.text(label_pos, anchor, &wedge.label, font.clone(), text_color);
        painter.text(
            polar(c, (outer + inner) / 2.0, mid),
            Align2::CENTER_CENTER,
            wedge.percent_label(),
            font.clone(),
            text_color,
        );
    }

    response.on_hover_ui(|ui: &mut Ui| {
        for w in wedges {
            ui.label(format!("{}: {} ({})", w.label, w.count, w.percent_label()));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_cover_the_circle_from_the_top() {
        let s = spans(&[2.0 / 3.0, 1.0 / 3.0], 90.0);
        assert_eq!(s.len(), 2);
        assert!((s[0].start - 90f32.to_radians()).abs() < 1e-6);
        assert!((s[0].end - s[1].start).abs() < 1e-6);
        assert!((s[1].end - s[0].start - TAU).abs() < 1e-5);
    }

    #[test]
    fn ring_segment_is_a_strip() {
        let span = Span {
            start: 0.0,
            end: TAU / 4.0,
        };
        let mesh = ring_segment(Pos2::ZERO, 7.0, 10.0, span, Color32::WHITE);
        let steps = mesh.vertices.len() / 2 - 1;
        assert_eq!(mesh.indices.len(), steps * 6);
        assert!(mesh.vertices.iter().all(|v| {
            let r = v.pos.to_vec2().length();
            (6.99..=10.01).contains(&r)
        }));
    }
}
