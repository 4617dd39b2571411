use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }
}

/// Point at `angle_degrees` on a circle. Angles grow clockwise on screen
/// because the SVG y axis points down.
pub fn point_on_circle(center: Point, radius: f64, angle_degrees: f64) -> Point {
    let theta = angle_degrees.to_radians();
    Point::new(
        snap(center.x + radius * theta.cos()),
        snap(center.y + radius * theta.sin()),
    )
}

// cos(90°) is ~6e-17, not 0. Pull those back onto the grid.
fn snap(value: f64) -> f64 {
    let rounded = value.round();
    if (value - rounded).abs() < 1e-9 {
        rounded
    } else {
        value
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Relative vertical line, `v dy`.
    VerticalBy(f64),
    Arc {
        rx: f64,
        ry: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    /// Relative arc, `a rx ry 0 large sweep dx dy`.
    ArcBy {
        rx: f64,
        ry: f64,
        large_arc: bool,
        sweep: bool,
        dx: f64,
        dy: f64,
    },
    CubicTo {
        c1: Point,
        c2: Point,
        to: Point,
    },
    Close,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, p: Point) -> Self {
        self.commands.push(PathCommand::MoveTo(p));
        self
    }

    pub fn line_to(mut self, p: Point) -> Self {
        self.commands.push(PathCommand::LineTo(p));
        self
    }

    pub fn vertical_by(mut self, dy: f64) -> Self {
        self.commands.push(PathCommand::VerticalBy(dy));
        self
    }

    pub fn arc_to(mut self, radius: f64, sweep: bool, to: Point) -> Self {
        self.commands.push(PathCommand::Arc {
            rx: radius,
            ry: radius,
            large_arc: false,
            sweep,
            to,
        });
        self
    }

    pub fn arc_by(mut self, radius: f64, sweep: bool, dx: f64, dy: f64) -> Self {
        self.commands.push(PathCommand::ArcBy {
            rx: radius,
            ry: radius,
            large_arc: false,
            sweep,
            dx,
            dy,
        });
        self
    }

    pub fn cubic_to(mut self, c1: Point, c2: Point, to: Point) -> Self {
        self.commands.push(PathCommand::CubicTo { c1, c2, to });
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }
}

/// Closed pie wedge covering the quarter turn that starts at
/// `start_angle_degrees`: centre, out to the rim, clockwise arc, back.
pub fn quadrant_wedge_path(center: Point, radius: f64, start_angle_degrees: f64) -> PathData {
    PathData::new()
        .move_to(center)
        .line_to(point_on_circle(center, radius, start_angle_degrees))
        .arc_to(
            radius,
            true,
            point_on_circle(center, radius, start_angle_degrees + 90.0),
        )
        .close()
}

/// Rectangle outline as an absolute `M H V H Z` subpath.
pub fn rect_subpath(path: PathData, x0: f64, y0: f64, x1: f64, y1: f64) -> PathData {
    path.move_to(Point::new(x0, y0))
        .line_to(Point::new(x1, y0))
        .line_to(Point::new(x1, y1))
        .line_to(Point::new(x0, y1))
        .close()
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PathCommand::MoveTo(p) => write!(f, "M {} {}", fmt_num(p.x), fmt_num(p.y)),
            PathCommand::LineTo(p) => write!(f, "L {} {}", fmt_num(p.x), fmt_num(p.y)),
            PathCommand::VerticalBy(dy) => write!(f, "v {}", fmt_num(dy)),
            PathCommand::Arc {
                rx,
                ry,
                large_arc,
                sweep,
                to,
            } => write!(
                f,
                "A {} {} 0 {} {} {} {}",
                fmt_num(rx),
                fmt_num(ry),
                u8::from(large_arc),
                u8::from(sweep),
                fmt_num(to.x),
                fmt_num(to.y)
            ),
            PathCommand::ArcBy {
                rx,
                ry,
                large_arc,
                sweep,
                dx,
                dy,
            } => write!(
                f,
                "a {} {} 0 {} {} {} {}",
                fmt_num(rx),
                fmt_num(ry),
                u8::from(large_arc),
                u8::from(sweep),
                fmt_num(dx),
                fmt_num(dy)
            ),
            PathCommand::CubicTo { c1, c2, to } => write!(
                f,
                "C {} {}, {} {}, {} {}",
                fmt_num(c1.x),
                fmt_num(c1.y),
                fmt_num(c2.x),
                fmt_num(c2.y),
                fmt_num(to.x),
                fmt_num(to.y)
            ),
            PathCommand::Close => f.write_str("Z"),
        }
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, cmd) in self.commands.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{cmd}")?;
        }
        Ok(())
    }
}

/// Integral values print without a fraction, everything else with at most
/// three decimals.
pub fn fmt_num(value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() < 1e-9 {
        // avoid "-0"
        return format!("{}", rounded as i64);
    }
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Point = Point::new(250.0, 250.0);

    #[test]
    fn points_on_circle_hit_the_axes() {
        assert_eq!(point_on_circle(CENTER, 220.0, 0.0), Point::new(470.0, 250.0));
        assert_eq!(point_on_circle(CENTER, 220.0, 90.0), Point::new(250.0, 470.0));
        assert_eq!(point_on_circle(CENTER, 220.0, 180.0), Point::new(30.0, 250.0));
        assert_eq!(point_on_circle(CENTER, 220.0, 270.0), Point::new(250.0, 30.0));
    }

    #[test]
    fn off_axis_points_keep_their_radius() {
        let p = point_on_circle(CENTER, 150.0, 33.0);
        assert!((p.distance(CENTER) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn wedge_path_matches_quadrant_template() {
        let d = quadrant_wedge_path(CENTER, 150.0, 270.0).to_string();
        assert_eq!(d, "M 250 250 L 250 100 A 150 150 0 0 1 400 250 Z");
        let d = quadrant_wedge_path(CENTER, 150.0, 90.0).to_string();
        assert_eq!(d, "M 250 250 L 250 400 A 150 150 0 0 1 100 250 Z");
    }

    #[test]
    fn relative_commands_render_lowercase() {
        let d = PathData::new()
            .move_to(Point::new(0.0, 0.0))
            .vertical_by(-10.0)
            .arc_by(10.0, true, 10.0, 10.0)
            .to_string();
        assert_eq!(d, "M 0 0 v -10 a 10 10 0 0 1 10 10");
    }

    #[test]
    fn numbers_drop_needless_fractions() {
        assert_eq!(fmt_num(250.0), "250");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(0.3), "0.3");
        assert_eq!(fmt_num(19.177_469_56), "19.177");
        assert_eq!(fmt_num(-0.000_1), "0");
    }
}
