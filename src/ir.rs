use serde::Serialize;
use std::fmt;

use crate::geometry::fmt_num;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Svg,
    Rect,
    Circle,
    Path,
    Line,
    Polyline,
    Group,
    Defs,
    LinearGradient,
    Stop,
    Style,
}

impl NodeKind {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Path => "path",
            Self::Line => "line",
            Self::Polyline => "polyline",
            Self::Group => "g",
            Self::Defs => "defs",
            Self::LinearGradient => "linearGradient",
            Self::Stop => "stop",
            Self::Style => "style",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(value) => f.write_str(&fmt_num(*value)),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

/// One element of the drawing tree. Children are owned by their parent and
/// kept in insertion order; attributes keep insertion order too so output is
/// stable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub kind: NodeKind,
    pub attrs: Vec<(String, AttrValue)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attrs: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    pub fn attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn get_number(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            AttrValue::Number(value) => Some(*value),
            AttrValue::Text(text) => text.parse().ok(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self.get("id")? {
            AttrValue::Text(text) => Some(text.as_str()),
            AttrValue::Number(_) => None,
        }
    }

    /// Depth-first, pre-order walk over this node and its descendants.
    pub fn walk(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        self.walk().into_iter().find(|node| node.id() == Some(id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset_percent: f64,
    pub color: String,
    pub opacity: f64,
}

/// Linear gradient referenced from `fill`/`stroke` as `url(#id)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gradient {
    pub id: String,
    /// x1, y1, x2, y2 in percent of the bounding box.
    pub direction: [f64; 4],
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    pub fn diagonal(id: &str, from: &str, to: &str) -> Self {
        Self {
            id: id.to_string(),
            direction: [0.0, 0.0, 100.0, 100.0],
            stops: vec![
                GradientStop {
                    offset_percent: 0.0,
                    color: from.to_string(),
                    opacity: 1.0,
                },
                GradientStop {
                    offset_percent: 100.0,
                    color: to.to_string(),
                    opacity: 1.0,
                },
            ],
        }
    }

    pub fn reference(&self) -> String {
        format!("url(#{})", self.id)
    }

    pub fn to_node(&self) -> Node {
        let [x1, y1, x2, y2] = self.direction;
        let percent = |v: f64| format!("{}%", fmt_num(v));
        Node::new(NodeKind::LinearGradient)
            .attr("id", &self.id)
            .attr("x1", percent(x1))
            .attr("y1", percent(y1))
            .attr("x2", percent(x2))
            .attr("y2", percent(y2))
            .children(self.stops.iter().map(|stop| {
                Node::new(NodeKind::Stop)
                    .attr("offset", percent(stop.offset_percent))
                    .attr(
                        "style",
                        format!(
                            "stop-color:{};stop-opacity:{}",
                            stop.color,
                            fmt_num(stop.opacity)
                        ),
                    )
            }))
    }
}

/// Rooted drawing tree; `root` is always an `svg` node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub width: u32,
    pub height: u32,
    pub root: Node,
}

impl Document {
    pub fn new(width: u32, height: u32) -> Self {
        let root = Node::new(NodeKind::Svg)
            .attr("width", width)
            .attr("height", height)
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("viewBox", format!("0 0 {width} {height}"));
        Self {
            width,
            height,
            root,
        }
    }

    pub fn push(&mut self, node: Node) {
        self.root.children.push(node);
    }

    pub fn nodes(&self) -> Vec<&Node> {
        self.root.walk()
    }

    /// Ids of every gradient definition in the tree.
    pub fn gradient_ids(&self) -> Vec<&str> {
        self.nodes()
            .into_iter()
            .filter(|node| node.kind == NodeKind::LinearGradient)
            .filter_map(Node::id)
            .collect()
    }

    /// `(attribute, id)` for every `fill`/`stroke` of the form `url(#id)`.
    pub fn gradient_references(&self) -> Vec<(&str, &str)> {
        let mut refs = Vec::new();
        for node in self.nodes() {
            for (name, value) in &node.attrs {
                if name != "fill" && name != "stroke" {
                    continue;
                }
                if let AttrValue::Text(text) = value {
                    if let Some(id) = parse_url_reference(text) {
                        refs.push((name.as_str(), id));
                    }
                }
            }
        }
        refs
    }
}

fn parse_url_reference(value: &str) -> Option<&str> {
    value
        .trim()
        .strip_prefix("url(#")
        .and_then(|rest| rest.strip_suffix(')'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_is_preorder() {
        let node = Node::new(NodeKind::Group)
            .attr("id", "a")
            .child(
                Node::new(NodeKind::Group)
                    .attr("id", "b")
                    .child(Node::new(NodeKind::Rect).attr("id", "c")),
            )
            .child(Node::new(NodeKind::Circle).attr("id", "d"));
        let ids: Vec<_> = node.walk().into_iter().filter_map(Node::id).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn gradient_node_carries_stops() {
        let gradient = Gradient::diagonal("ringGradient", "#00FF9F", "#4845D3");
        let node = gradient.to_node();
        assert_eq!(node.id(), Some("ringGradient"));
        assert_eq!(node.get("x2"), Some(&AttrValue::from("100%")));
        assert_eq!(node.children.len(), 2);
        assert_eq!(
            node.children[1].get("style"),
            Some(&AttrValue::from("stop-color:#4845D3;stop-opacity:1"))
        );
        assert_eq!(gradient.reference(), "url(#ringGradient)");
    }

    #[test]
    fn finds_url_references() {
        let mut doc = Document::new(10, 10);
        doc.push(Node::new(NodeKind::Circle).attr("stroke", "url(#ring)").attr("fill", "none"));
        doc.push(Node::new(NodeKind::Rect).attr("fill", "#fff"));
        assert_eq!(doc.gradient_references(), vec![("stroke", "ring")]);
        assert!(doc.gradient_ids().is_empty());
    }
}
