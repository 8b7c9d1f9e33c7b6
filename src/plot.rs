use std::ops::Range;
use std::path::Path;

use plotters::element::DashedPathElement;
use plotters::prelude::*;

use crate::dataset::LabeledPoint;
use crate::error::{MoonvizError, Result};
use crate::grid::GridField;

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 800;

/// Render the decision-boundary figure: filled sign regions from the score
/// field, the zero-level contour, the data points colored by class, origin
/// reference lines and a legend. Writes a PNG to `out_path`, overwriting any
/// previous figure.
pub fn render(points: &[LabeledPoint], field: &GridField, out_path: &Path) -> Result<()> {
    let (x_range, y_range) = view_extents(points, field);

    let root = BitMapBackend::new(out_path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("MLP Decision Boundary on Moon Dataset", ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range.clone(), y_range.clone())
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc("X")
        .y_desc("Y")
        .draw()
        .map_err(render_err)?;

    // Filled decision regions: one cell per grid sample, colored by the sign
    // of its score
    chart.draw_series(region_cells(field)).map_err(render_err)?;

    // Zero-level contour marking the boundary itself
    chart
        .draw_series(
            zero_contour(field)
                .into_iter()
                .map(|(a, b)| PathElement::new(vec![a, b], YELLOW.stroke_width(2))),
        )
        .map_err(render_err)?;

    chart
        .draw_series(
            points
                .iter()
                .filter(|p| p.y == -1)
                .map(|p| Circle::new((p.x1, p.x2), 4, BLUE.filled())),
        )
        .map_err(render_err)?
        .label("Class -1")
        .legend(|(x, y)| Circle::new((x, y), 4, BLUE.filled()));

    chart
        .draw_series(
            points
                .iter()
                .filter(|p| p.y == 1)
                .map(|p| Circle::new((p.x1, p.x2), 4, RED.filled())),
        )
        .map_err(render_err)?
        .label("Class 1")
        .legend(|(x, y)| Circle::new((x, y), 4, RED.filled()));

    // Dashed reference lines through the origin, spanning the final extents
    chart
        .draw_series(std::iter::once(DashedPathElement::new(
            vec![(x_range.start, 0.0), (x_range.end, 0.0)],
            5,
            5,
            BLACK.mix(0.5),
        )))
        .map_err(render_err)?;
    chart
        .draw_series(std::iter::once(DashedPathElement::new(
            vec![(0.0, y_range.start), (0.0, y_range.end)],
            5,
            5,
            BLACK.mix(0.5),
        )))
        .map_err(render_err)?;

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;

    Ok(())
}

fn render_err<E: std::fmt::Display>(e: E) -> MoonvizError {
    MoonvizError::Render {
        message: e.to_string(),
    }
}

/// Axis ranges covering both the grid and the data points, with a margin so
/// edge points do not sit on the frame
fn view_extents(points: &[LabeledPoint], field: &GridField) -> (Range<f64>, Range<f64>) {
    let (mut x_min, mut x_max) = field.x_extent();
    let (mut y_min, mut y_max) = field.y_extent();

    for p in points {
        x_min = x_min.min(p.x1);
        x_max = x_max.max(p.x1);
        y_min = y_min.min(p.x2);
        y_max = y_max.max(p.x2);
    }

    let x_pad = pad(x_min, x_max);
    let y_pad = pad(y_min, y_max);

    (
        x_min - x_pad..x_max + x_pad,
        y_min - y_pad..y_max + y_pad,
    )
}

fn pad(min: f64, max: f64) -> f64 {
    if max > min {
        (max - min) * 0.05
    } else {
        0.5
    }
}

/// One semi-transparent rectangle per grid sample, bounded by the midpoints
/// toward its neighbors
fn region_cells(field: &GridField) -> Vec<Rectangle<(f64, f64)>> {
    let mut cells = Vec::with_capacity(field.xs.len() * field.ys.len());

    for i in 0..field.xs.len() {
        let (x0, x1) = cell_bounds(&field.xs, i);

        for j in 0..field.ys.len() {
            let (y0, y1) = cell_bounds(&field.ys, j);
            let color = if field.z[[i, j]] > 0.0 {
                RED.mix(0.25)
            } else {
                BLUE.mix(0.25)
            };

            cells.push(Rectangle::new([(x0, y0), (x1, y1)], color.filled()));
        }
    }

    cells
}

fn cell_bounds(axis: &[f64], i: usize) -> (f64, f64) {
    let lo = if i == 0 {
        axis[0] - half_step(axis, 0)
    } else {
        (axis[i - 1] + axis[i]) / 2.0
    };
    let hi = if i + 1 == axis.len() {
        axis[i] + half_step(axis, axis.len().saturating_sub(2))
    } else {
        (axis[i] + axis[i + 1]) / 2.0
    };

    (lo, hi)
}

fn half_step(axis: &[f64], i: usize) -> f64 {
    if axis.len() < 2 {
        0.5
    } else {
        (axis[i + 1] - axis[i]) / 2.0
    }
}

/// Marching squares over the field: for every cell whose corner scores change
/// sign, interpolate the zero crossings along its edges and connect them.
fn zero_contour(field: &GridField) -> Vec<((f64, f64), (f64, f64))> {
    let mut segments = Vec::new();

    for i in 0..field.xs.len().saturating_sub(1) {
        for j in 0..field.ys.len().saturating_sub(1) {
            let corners = [
                (field.xs[i], field.ys[j], field.z[[i, j]]),
                (field.xs[i + 1], field.ys[j], field.z[[i + 1, j]]),
                (field.xs[i + 1], field.ys[j + 1], field.z[[i + 1, j + 1]]),
                (field.xs[i], field.ys[j + 1], field.z[[i, j + 1]]),
            ];

            let mut crossings = Vec::new();

            for k in 0..4 {
                let (ax, ay, az) = corners[k];
                let (bx, by, bz) = corners[(k + 1) % 4];

                if (az > 0.0) != (bz > 0.0) {
                    let t = az / (az - bz);
                    crossings.push((ax + t * (bx - ax), ay + t * (by - ay)));
                }
            }

            // Two crossings in the common case; the saddle case yields four,
            // paired in edge order
            for pair in crossings.chunks(2) {
                if let [a, b] = pair {
                    segments.push((*a, *b));
                }
            }
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ScoredGridSample;

    fn field_3x3(f: impl Fn(f64, f64) -> f64) -> GridField {
        let axis = [0.0, 1.0, 2.0];
        let mut samples = Vec::new();

        for &x in &axis {
            for &y in &axis {
                samples.push(ScoredGridSample { x, y, z: f(x, y) });
            }
        }

        GridField::from_samples(&samples).unwrap()
    }

    /// z negative in the bottom-left 2x2 block, positive elsewhere
    fn split_field() -> GridField {
        field_3x3(|x, y| if x <= 1.0 && y <= 1.0 { -1.0 } else { 1.0 })
    }

    #[test]
    fn renders_two_class_scene_to_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boundary.png");
        let points = vec![
            LabeledPoint { x1: 0.2, x2: 0.3, y: -1 },
            LabeledPoint { x1: 0.8, x2: 0.6, y: -1 },
            LabeledPoint { x1: 1.6, x2: 1.4, y: 1 },
            LabeledPoint { x1: 1.9, x2: 0.2, y: 1 },
        ];

        render(&points, &split_field(), &path).unwrap();

        let size = std::fs::metadata(&path).unwrap().len();
        assert!(size > 0);
    }

    #[test]
    fn contour_separates_the_sign_regions() {
        let segments = zero_contour(&split_field());

        assert!(!segments.is_empty());

        // Every crossing sits strictly between grid lines of opposite sign,
        // inside the sampled area
        for ((ax, ay), (bx, by)) in segments {
            for (x, y) in [(ax, ay), (bx, by)] {
                assert!((0.0..=2.0).contains(&x));
                assert!((0.0..=2.0).contains(&y));
                assert!(x > 1.0 || y > 1.0);
                assert!(x < 2.0 && y < 2.0);
            }
        }
    }

    #[test]
    fn uniform_sign_field_has_no_contour() {
        let segments = zero_contour(&field_3x3(|_, _| 1.0));

        assert!(segments.is_empty());
    }

    #[test]
    fn cell_bounds_meet_at_midpoints() {
        let axis = [0.0, 1.0, 3.0];

        assert_eq!(cell_bounds(&axis, 0), (-0.5, 0.5));
        assert_eq!(cell_bounds(&axis, 1), (0.5, 2.0));
        assert_eq!(cell_bounds(&axis, 2), (2.0, 4.0));
    }

    #[test]
    fn render_fails_on_unwritable_destination() {
        let points = vec![LabeledPoint { x1: 0.0, x2: 0.0, y: 1 }];

        assert!(matches!(
            render(&points, &split_field(), Path::new("no_such_dir/out.png")),
            Err(MoonvizError::Render { .. })
        ));
    }
}
