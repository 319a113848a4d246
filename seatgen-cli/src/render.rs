//! SVG preview of sections and their generated seats.

use std::fmt::Write;

use seatgen_core::{polygon::Bounds, GeneratedSeat, Section};

/// SVG rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Canvas width in pixels
    pub width: f64,
    /// Canvas height in pixels
    pub height: f64,
    /// Padding around sections (fraction of extent)
    pub padding: f64,
    /// Stroke width for section outlines
    pub stroke_width: f64,
    /// Fill opacity for sections (0.0 - 1.0)
    pub fill_opacity: f64,
    /// Whether to print seat numbers
    pub show_numbers: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            padding: 0.05,
            stroke_width: 1.0,
            fill_opacity: 0.15,
            show_numbers: true,
        }
    }
}

/// Color palette for sections
const COLORS: &[&str] = &[
    "#e41a1c", // red
    "#377eb8", // blue
    "#4daf4a", // green
    "#984ea3", // purple
    "#ff7f00", // orange
    "#a65628", // brown
    "#f781bf", // pink
];

/// A section to draw, with its seats and an optional color from the venue file.
pub struct Drawn<'a> {
    pub section: &'a Section,
    pub seats: &'a [GeneratedSeat],
    pub color: Option<&'a str>,
}

fn extent(drawn: &[Drawn]) -> Bounds {
    drawn
        .iter()
        .map(|d| d.section.polygon.bounds())
        .reduce(|a, b| a.union(&b))
        .unwrap_or(Bounds { min_x: -1.0, max_x: 1.0, min_y: -1.0, max_y: 1.0 })
}

/// Render sections and seats to an SVG string
pub fn render_svg(drawn: &[Drawn], config: &RenderConfig) -> String {
    let bounds = extent(drawn);
    let pad_x = bounds.width() * config.padding;
    let pad_y = bounds.height() * config.padding;
    let view_min_x = bounds.min_x - pad_x;
    let view_min_y = bounds.min_y - pad_y;
    let view_width = bounds.width() + 2.0 * pad_x;
    let view_height = bounds.height() + 2.0 * pad_y;

    let mut svg = String::new();

    writeln!(
        &mut svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
        config.width, config.height, view_min_x, view_min_y, view_width, view_height
    ).unwrap();

    writeln!(
        &mut svg,
        r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="white"/>"#,
        view_min_x, view_min_y, view_width, view_height
    ).unwrap();

    for (idx, d) in drawn.iter().enumerate() {
        let color = d.color.unwrap_or(COLORS[idx % COLORS.len()]);
        let vertices = &d.section.polygon.vertices;
        if vertices.is_empty() {
            continue;
        }

        let mut path = format!("M {} {}", vertices[0].x, vertices[0].y);
        for v in &vertices[1..] {
            write!(&mut path, " L {} {}", v.x, v.y).unwrap();
        }
        path.push_str(" Z");

        writeln!(&mut svg, r#"  <g id="{}">"#, d.section.id).unwrap();
        writeln!(
            &mut svg,
            r#"    <path d="{}" fill="{}" fill-opacity="{}" stroke="{}" stroke-width="{}"/>"#,
            path, color, config.fill_opacity, color, config.stroke_width
        ).unwrap();

        for seat in d.seats {
            let w = seat.size.width;
            let h = seat.size.height;
            let (x, y) = (seat.position.x, seat.position.y);
            let transform = match seat.rotation {
                Some(deg) => format!(r#" transform="rotate({} {} {})""#, deg, x, y),
                None => String::new(),
            };
            writeln!(
                &mut svg,
                r#"    <rect x="{}" y="{}" width="{}" height="{}" rx="1" fill="{}"{}><title>{}</title></rect>"#,
                x - w / 2.0, y - h / 2.0, w, h, color, transform, seat.label
            ).unwrap();
            if config.show_numbers {
                writeln!(
                    &mut svg,
                    r#"    <text x="{}" y="{}" font-size="{}" text-anchor="middle" dominant-baseline="central" fill="white">{}</text>"#,
                    x, y, h * 0.5, seat.seat_number
                ).unwrap();
            }
        }

        let c = d.section.polygon.centroid();
        writeln!(
            &mut svg,
            r#"    <text x="{}" y="{}" font-size="{}" text-anchor="middle" fill="{}" fill-opacity="0.6">{}</text>"#,
            c.x, c.y, config.stroke_width * 12.0, color, d.section.name
        ).unwrap();
        writeln!(&mut svg, "  </g>").unwrap();
    }

    writeln!(&mut svg, "</svg>").unwrap();

    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatgen_core::{generate, Direction, LayoutOptions, Polygon, RowSpec, R2};

    #[test]
    fn test_render_section() {
        let section = Section::new(
            "palco",
            "Palco",
            Polygon::new(vec![
                R2 { x: 0.0, y: 0.0 },
                R2 { x: 100.0, y: 0.0 },
                R2 { x: 100.0, y: 50.0 },
                R2 { x: 0.0, y: 50.0 },
            ]),
        );
        let rows = vec![RowSpec::new("A", 4, 1, Direction::LeftToRight)];
        let layout = generate(&section, &rows, &LayoutOptions::default()).unwrap();
        let drawn = [Drawn { section: &section, seats: &layout.seats, color: None }];

        let svg = render_svg(&drawn, &RenderConfig::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"<g id="palco">"#));
        assert_eq!(svg.matches("<title>").count(), 4);
        assert!(svg.contains("<title>PA-A-1</title>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
