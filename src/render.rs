use crate::error::{Error, Result};
use crate::ir::{Document, Node};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[cfg(feature = "png")]
use crate::config::RenderConfig;

const INDENT: &str = "  ";

/// Fails if any `fill`/`stroke` points at a gradient id missing from the tree.
pub fn check_gradient_references(doc: &Document) -> Result<()> {
    let defined = doc.gradient_ids();
    for (attribute, id) in doc.gradient_references() {
        if !defined.contains(&id) {
            return Err(Error::UnresolvedGradient {
                id: id.to_string(),
                attribute: attribute.to_string(),
            });
        }
    }
    Ok(())
}

/// Serializes the tree as an indented, UTF-8 SVG document.
pub fn render_svg(doc: &Document) -> Result<String> {
    check_gradient_references(doc)?;
    let mut svg = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    write_node(&mut svg, &doc.root, 0);
    Ok(svg)
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    let pad = INDENT.repeat(depth);
    out.push_str(&pad);
    out.push('<');
    out.push_str(node.kind.tag());
    for (name, value) in &node.attrs {
        out.push_str(&format!(" {}=\"{}\"", name, escape_xml(&value.to_string())));
    }

    if node.children.is_empty() && node.text.is_none() {
        out.push_str("/>\n");
        return;
    }
    out.push_str(">\n");

    if let Some(text) = &node.text {
        let text_pad = INDENT.repeat(depth + 1);
        let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
        // re-indent under the element, keeping the text's own nesting
        let common = lines
            .iter()
            .map(|line| line.len() - line.trim_start().len())
            .min()
            .unwrap_or(0);
        for line in lines {
            out.push_str(&text_pad);
            out.push_str(&escape_text(line[common..].trim_end()));
            out.push('\n');
        }
    }
    for child in &node.children {
        write_node(out, child, depth + 1);
    }

    out.push_str(&pad);
    out.push_str("</");
    out.push_str(node.kind.tag());
    out.push_str(">\n");
}

/// Writes `text` to `path`, replacing whatever was there. The file handle is
/// dropped on every path out of this function.
pub fn write_output(text: &str, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|err| Error::io(path, err))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(text.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|err| Error::io(path, err))?;
    log::debug!("wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}

/// Rasterizes the serialized logo to PNG.
#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opt).map_err(|err| Error::Raster(err.to_string()))?;
    let scale = render_cfg.png_scale.max(0.01);
    let size = tree.size().to_int_size();
    let width = ((size.width() as f32) * scale).ceil() as u32;
    let height = ((size.height() as f32) * scale).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width.max(1), height.max(1))
        .ok_or_else(|| Error::Raster("failed to allocate pixmap".to_string()))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    pixmap
        .save_png(output)
        .map_err(|err| Error::Raster(format!("{}: {err}", output.display())))?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogoConfig;
    use crate::ir::NodeKind;
    use crate::logo::build_logo;
    use crate::random::make_rng;
    use crate::theme::Theme;

    fn logo_svg(seed: u64) -> String {
        let doc = build_logo(
            &LogoConfig::default(),
            &Theme::default(),
            &mut make_rng(Some(seed)),
        )
        .expect("build failed");
        render_svg(&doc).expect("render failed")
    }

    #[test]
    fn render_svg_basic() {
        let svg = logo_svg(1);
        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg "));
        assert!(svg.contains(concat!(
            "<svg width=\"500\" height=\"500\" xmlns=\"http://www.w3.org/2000/svg\" ",
            "viewBox=\"0 0 500 500\">"
        )));
        assert!(svg.contains(
            "  <rect x=\"0\" y=\"0\" width=\"500\" height=\"500\" fill=\"#121212\"/>"
        ));
        assert!(svg.contains("stroke=\"url(#ringGradient)\""));
        assert!(svg.contains("\n    @keyframes pulse {\n        0% { opacity: 0.7; }\n"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn rendering_a_document_twice_is_identical() {
        let doc = build_logo(&LogoConfig::default(), &Theme::default(), &mut make_rng(Some(9)))
            .expect("build failed");
        assert_eq!(render_svg(&doc).expect("first"), render_svg(&doc).expect("second"));
    }

    #[test]
    fn nested_nodes_are_indented() {
        let svg = logo_svg(2);
        assert!(svg.contains("\n  <defs>\n    <linearGradient id=\"circuitGradient\""));
        assert!(svg.contains(
            "\n      <stop offset=\"0%\" style=\"stop-color:#4845D3;stop-opacity:1\"/>"
        ));
    }

    #[test]
    fn dangling_gradient_reference_is_an_error() {
        let mut doc = Document::new(100, 100);
        doc.push(Node::new(NodeKind::Circle).attr("fill", "url(#missing)"));
        let err = render_svg(&doc).unwrap_err();
        assert!(matches!(
            err,
            Error::UnresolvedGradient { ref id, ref attribute }
                if id == "missing" && attribute == "fill"
        ));
    }

    #[test]
    fn attribute_values_are_escaped() {
        let mut doc = Document::new(10, 10);
        doc.push(Node::new(NodeKind::Group).attr("id", "a<b&\"c\""));
        let svg = render_svg(&doc).expect("render failed");
        assert!(svg.contains("id=\"a&lt;b&amp;&quot;c&quot;\""));
    }

    #[test]
    fn write_output_replaces_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("logo.svg");
        std::fs::write(&path, "old contents that are longer than the new ones").expect("seed file");
        write_output("<svg/>", &path).expect("write");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "<svg/>");
    }

    #[test]
    fn write_output_reports_the_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("logo.svg");
        let err = write_output("<svg/>", &path).unwrap_err();
        assert!(err.to_string().contains("logo.svg"));
    }
}
