//! Assembly of the club logo as a drawing tree.
//!
//! The figure is a disc split into four wedge sections inside a gradient
//! ring, with optional glyph groups on top and dashed connector curves that
//! animate through CSS. Everything is placed relative to the canvas centre.

use crate::config::{Icon, LogoConfig};
use crate::error::{Error, Result};
use crate::geometry::{
    PathData, Point, fmt_num, point_on_circle, quadrant_wedge_path, rect_subpath,
};
use crate::ir::{Document, Gradient, Node, NodeKind};
use crate::random::RandomSource;
use crate::theme::Theme;

pub const RING_GRADIENT_ID: &str = "ringGradient";
pub const CIRCUIT_GRADIENT_ID: &str = "circuitGradient";

const MARKER_ANGLES: [f64; 4] = [0.0, 90.0, 180.0, 270.0];
const CONNECTOR_INSET: f64 = 30.0;

/// Geometry derived once from the canvas size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoLayout {
    pub width: u32,
    pub height: u32,
    pub center: Point,
    pub ring_radius: f64,
    pub section_radius: f64,
}

impl LogoLayout {
    pub fn new(config: &LogoConfig) -> Result<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(Error::InvalidCanvas {
                width: config.width,
                height: config.height,
            });
        }
        Ok(Self {
            width: config.width,
            height: config.height,
            center: Point::new(f64::from(config.width / 2), f64::from(config.height / 2)),
            ring_radius: config.ring_radius,
            section_radius: config.section_radius,
        })
    }
}

/// Wedge sections, clockwise from twelve o'clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Pcb,
    Iot,
    SignalProcessing,
    Electronics,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Pcb,
        Section::Iot,
        Section::SignalProcessing,
        Section::Electronics,
    ];

    pub fn start_angle(self) -> f64 {
        match self {
            Self::Pcb => 270.0,
            Self::Iot => 0.0,
            Self::SignalProcessing => 90.0,
            Self::Electronics => 180.0,
        }
    }

    fn color(self, theme: &Theme) -> &str {
        match self {
            Self::Pcb => &theme.pcb_color,
            Self::Iot => &theme.iot_color,
            Self::SignalProcessing => &theme.signal_color,
            Self::Electronics => &theme.electronics_color,
        }
    }
}

/// Builds the logo tree. The only random draws are the pcb glyph's circuit
/// traces; everything else depends on `config` and `theme` alone.
pub fn build_logo(
    config: &LogoConfig,
    theme: &Theme,
    rng: &mut impl RandomSource,
) -> Result<Document> {
    let layout = LogoLayout::new(config)?;
    let center = layout.center;
    let mut doc = Document::new(layout.width, layout.height);

    doc.push(
        Node::new(NodeKind::Rect)
            .attr("x", 0)
            .attr("y", 0)
            .attr("width", layout.width)
            .attr("height", layout.height)
            .attr("fill", &theme.background),
    );

    let circuit = Gradient::diagonal(
        CIRCUIT_GRADIENT_ID,
        &theme.circuit_gradient.from,
        &theme.circuit_gradient.to,
    );
    let ring = Gradient::diagonal(
        RING_GRADIENT_ID,
        &theme.ring_gradient.from,
        &theme.ring_gradient.to,
    );
    doc.push(
        Node::new(NodeKind::Defs)
            .child(circuit.to_node())
            .child(ring.to_node()),
    );

    doc.push(
        Node::new(NodeKind::Circle)
            .attr("cx", center.x)
            .attr("cy", center.y)
            .attr("r", layout.ring_radius)
            .attr("fill", "none")
            .attr("stroke", ring.reference())
            .attr("stroke-width", 5),
    );

    for angle in MARKER_ANGLES {
        let p = point_on_circle(center, layout.ring_radius, angle).round();
        doc.push(
            Node::new(NodeKind::Circle)
                .attr("cx", p.x)
                .attr("cy", p.y)
                .attr("r", config.marker_radius)
                .attr("fill", &theme.marker_fill),
        );
    }

    doc.push(
        Node::new(NodeKind::Group)
            .attr("id", "main")
            .children(Section::ALL.iter().map(|section| {
                Node::new(NodeKind::Path)
                    .attr(
                        "d",
                        quadrant_wedge_path(center, layout.section_radius, section.start_angle())
                            .to_string(),
                    )
                    .attr("fill", section.color(theme))
                    .attr("stroke", &theme.section_stroke)
                    .attr("stroke-width", 2)
            })),
    );

    for icon in &config.icons {
        doc.push(icon_group(*icon, center, theme, rng));
    }

    let mut circuits = Node::new(NodeKind::Group).attr("id", "circuits");
    if config.connectors {
        circuits = circuits.children(connector_paths(center).into_iter().map(|d| {
            Node::new(NodeKind::Path)
                .attr("d", d.to_string())
                .attr("fill", "none")
                .attr("stroke", circuit.reference())
                .attr("stroke-width", 2)
                .attr("stroke-dasharray", "5,5")
        }));
    }
    doc.push(circuits);

    doc.push(Node::new(NodeKind::Style).text(animation_css(&config.icons)));

    log::debug!(
        "assembled logo {}x{} with {} nodes",
        layout.width,
        layout.height,
        doc.nodes().len()
    );
    Ok(doc)
}

fn icon_group(icon: Icon, center: Point, theme: &Theme, rng: &mut impl RandomSource) -> Node {
    let glyph = theme.glyph_color.as_str();
    let group = |dx: f64, dy: f64, scale: f64| {
        Node::new(NodeKind::Group)
            .attr("id", icon.group_id())
            .attr(
                "transform",
                format!(
                    "translate({} {}) scale({})",
                    fmt_num(center.x + dx),
                    fmt_num(center.y + dy),
                    fmt_num(scale)
                ),
            )
    };

    match icon {
        Icon::Pcb => {
            let mut board = PathData::new();
            for (x0, y0, x1, y1) in [
                (10.0, 10.0, 50.0, 50.0),
                (15.0, 15.0, 45.0, 45.0),
                (20.0, 20.0, 30.0, 30.0),
                (35.0, 35.0, 40.0, 40.0),
            ] {
                board = rect_subpath(board, x0, y0, x1, y1);
            }
            let traces: Vec<Node> = (0..3)
                .map(|_| {
                    let x1 = rng.int_inclusive(15, 45);
                    let y1 = rng.int_inclusive(15, 45);
                    let x2 = rng.int_inclusive(15, 45);
                    let y2 = rng.int_inclusive(15, 45);
                    line(x1 as f64, y1 as f64, x2 as f64, y2 as f64, glyph)
                })
                .collect();
            group(-15.0, -90.0, 0.3)
                .child(
                    Node::new(NodeKind::Path)
                        .attr("d", board.to_string())
                        .attr("fill", glyph),
                )
                .children(traces)
        }
        Icon::Iot => {
            let arcs = (0..3_i32).map(|i| {
                let radius = f64::from(10 + i * 10);
                let d = PathData::new()
                    .move_to(Point::new(0.0, 0.0))
                    .vertical_by(-radius)
                    .arc_by(radius, true, radius, radius);
                Node::new(NodeKind::Path)
                    .attr("d", d.to_string())
                    .attr("fill", "none")
                    .attr("stroke", glyph)
                    .attr("stroke-width", 3)
            });
            group(90.0, 15.0, 0.3).children(arcs).child(
                Node::new(NodeKind::Circle)
                    .attr("cx", 0)
                    .attr("cy", 0)
                    .attr("r", 5)
                    .attr("fill", glyph),
            )
        }
        Icon::Signal => {
            let points: Vec<String> = (0..=60_i32)
                .step_by(5)
                .map(|x| {
                    let x = f64::from(x);
                    format!(
                        "{},{}",
                        fmt_num(x),
                        fmt_num(20.0 * (x / 10.0).sin())
                    )
                })
                .collect();
            group(-90.0, 15.0, 0.3).child(
                Node::new(NodeKind::Polyline)
                    .attr("points", points.join(" "))
                    .attr("fill", "none")
                    .attr("stroke", glyph)
                    .attr("stroke-width", 3),
            )
        }
        Icon::Electronics => {
            let mut node = group(-15.0, -15.0, 0.4).child(
                Node::new(NodeKind::Rect)
                    .attr("x", -25)
                    .attr("y", -25)
                    .attr("width", 50)
                    .attr("height", 50)
                    .attr("fill", &theme.chip_fill)
                    .attr("stroke", glyph)
                    .attr("stroke-width", 2),
            );
            for offset in (-20..=20_i32).step_by(10) {
                let o = f64::from(offset);
                node = node
                    .child(line(-30.0, o, -25.0, o, glyph))
                    .child(line(25.0, o, 30.0, o, glyph))
                    .child(line(o, -30.0, o, -25.0, glyph))
                    .child(line(o, 25.0, o, 30.0, glyph));
            }
            node.child(
                Node::new(NodeKind::Circle)
                    .attr("cx", 0)
                    .attr("cy", 0)
                    .attr("r", 10)
                    .attr("fill", "none")
                    .attr("stroke", glyph)
                    .attr("stroke-width", 2),
            )
        }
        Icon::CenterChip => Node::new(NodeKind::Group).attr("id", icon.group_id()).child(
            Node::new(NodeKind::Rect)
                .attr("x", center.x - 40.0)
                .attr("y", center.y - 40.0)
                .attr("width", 80)
                .attr("height", 80)
                .attr("fill", &theme.placeholder_fill)
                .attr("stroke", glyph)
                .attr("stroke-width", 2),
        ),
    }
}

fn line(x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str) -> Node {
    Node::new(NodeKind::Line)
        .attr("x1", x1)
        .attr("y1", y1)
        .attr("x2", x2)
        .attr("y2", y2)
        .attr("stroke", stroke)
        .attr("stroke-width", 2)
}

/// Connector curves between the wedge midpoints, clockwise from the pcb/iot
/// corner. Each curve ends where the next one starts.
pub fn connector_paths(center: Point) -> [PathData; 4] {
    let k = CONNECTOR_INSET;
    let at = |dx: f64, dy: f64| center.offset(dx, dy);
    let curve = |from: Point, c1: Point, c2: Point, to: Point| {
        PathData::new().move_to(from).cubic_to(c1, c2, to)
    };
    [
        curve(at(k, -k), at(50.0, -50.0), at(50.0, 50.0), at(k, k)),
        curve(at(k, k), at(20.0, 60.0), at(-20.0, 60.0), at(-k, k)),
        curve(at(-k, k), at(-50.0, 50.0), at(-50.0, -50.0), at(-k, -k)),
        curve(at(-k, -k), at(-20.0, -60.0), at(20.0, -60.0), at(k, -k)),
    ]
}

/// Dash animation for the connectors and a pulse on every glyph group.
pub fn animation_css(icons: &[Icon]) -> String {
    let mut css = String::from(
        r#"
    @keyframes dash {
        to {
            stroke-dashoffset: 100;
        }
    }
    #circuits path {
        animation: dash 5s linear infinite;
    }
    @keyframes pulse {
        0% { opacity: 0.7; }
        50% { opacity: 1; }
        100% { opacity: 0.7; }
    }
"#,
    );
    if !icons.is_empty() {
        let selectors: Vec<String> = icons
            .iter()
            .map(|icon| format!("#{}", icon.group_id()))
            .collect();
        css.push_str(&format!(
            "    {} {{\n        animation: pulse 2s infinite;\n    }}\n",
            selectors.join(", ")
        ));
    }
    css
}
