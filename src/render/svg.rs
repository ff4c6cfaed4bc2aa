use std::fmt::Write as _;

use crate::scene::{
    eval::{EvaluatedFrame, EvaluatedNode},
    model::{ObjectKind, Scene, TextAlign},
};

const BOX_STROKE: &str = "#58C4DD";
const HIGHLIGHT_STROKE: &str = "#FFFF00";
const TEXT_FILL: &str = "#FFFFFF";
const FONT_FAMILY: &str = "DejaVu Sans, Arial, Helvetica, sans-serif";

/// Baseline offset below the top of a line, as a fraction of the font size.
const ASCENT: f64 = 0.8;
/// Baseline offset below the vertical centre of a line, as a fraction of the font size.
const HALF_X_HEIGHT: f64 = 0.35;

/// Serialize one evaluated frame as a standalone SVG document in pixel space.
pub fn scene_to_svg(scene: &Scene, frame: &EvaluatedFrame) -> String {
    let (w, h) = (scene.canvas.width, scene.canvas.height);
    let [r, g, b, a] = scene.background_rgba8;

    let mut out = String::with_capacity(256 + frame.nodes.len() * 192);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    let _ = write!(
        out,
        r#"<rect width="{w}" height="{h}" fill="rgb({r},{g},{b})" fill-opacity="{}"/>"#,
        f64::from(a) / 255.0
    );
    for node in &frame.nodes {
        write_node(&mut out, scene, node);
    }
    out.push_str("</svg>");
    out
}

fn write_node(out: &mut String, scene: &Scene, node: &EvaluatedNode) {
    let _ = write!(out, r#"<g opacity="{:.4}">"#, node.opacity);
    let stroke_px = (0.04 * scene.unit_px).max(1.0);
    let x0 = node.anchor.x - node.size.x / 2.0;
    let y0 = node.anchor.y - node.size.y / 2.0;

    match &node.kind {
        ObjectKind::Box { label, text_size } => {
            let _ = write!(
                out,
                r#"<rect x="{x0:.3}" y="{y0:.3}" width="{:.3}" height="{:.3}" fill="none" stroke="{BOX_STROKE}" stroke-width="{stroke_px:.3}"/>"#,
                node.size.x, node.size.y
            );
            let font_px = text_size * scene.unit_px;
            write_text(
                out,
                label,
                node.anchor.x,
                node.anchor.y + HALF_X_HEIGHT * font_px,
                font_px,
                "middle",
            );
        }
        ObjectKind::Highlight => {
            let _ = write!(
                out,
                r#"<rect x="{x0:.3}" y="{y0:.3}" width="{:.3}" height="{:.3}" fill="{HIGHLIGHT_STROKE}" fill-opacity="0.2" stroke="{HIGHLIGHT_STROKE}" stroke-width="{stroke_px:.3}"/>"#,
                node.size.x, node.size.y
            );
        }
        ObjectKind::Text {
            content,
            text_size,
            align,
        } => {
            let font_px = text_size * scene.unit_px;
            let (y, anchor) = match align {
                TextAlign::Start => (node.anchor.y + ASCENT * font_px, "start"),
                TextAlign::Middle => (node.anchor.y + HALF_X_HEIGHT * font_px, "middle"),
            };
            write_text(out, content, node.anchor.x, y, font_px, anchor);
        }
    }
    out.push_str("</g>");
}

fn write_text(out: &mut String, content: &str, x: f64, y: f64, font_px: f64, anchor: &str) {
    let _ = write!(
        out,
        r#"<text x="{x:.3}" y="{y:.3}" font-family="{FONT_FAMILY}" font-size="{font_px:.3}" fill="{TEXT_FILL}" text-anchor="{anchor}" xml:space="preserve">{}</text>"#,
        xml_escape(content)
    );
}

pub(crate) fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
