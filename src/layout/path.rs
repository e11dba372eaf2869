use super::types::{LinkId, SankeyGraph};

/// Cubic ribbon for one link band, running from the source node's right edge
/// to the target node's left edge through the band's center line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkPath {
    pub start: (f32, f32),
    pub control_start: (f32, f32),
    pub control_end: (f32, f32),
    pub end: (f32, f32),
    /// Stroke width of the ribbon, equal to the link's `dy`.
    pub thickness: f32,
}

impl LinkPath {
    pub fn to_svg_path(&self) -> String {
        format!(
            "M{},{}C{},{} {},{} {},{}",
            fmt_num(self.start.0),
            fmt_num(self.start.1),
            fmt_num(self.control_start.0),
            fmt_num(self.control_start.1),
            fmt_num(self.control_end.0),
            fmt_num(self.control_end.1),
            fmt_num(self.end.0),
            fmt_num(self.end.1),
        )
    }
}

impl SankeyGraph {
    pub fn link_path(&self, id: LinkId, curvature: f32) -> LinkPath {
        let link = self.link(id);
        let source = self.node(link.source);
        let target = self.node(link.target);
        let x0 = source.x + source.width;
        let x1 = target.x;
        let lerp = |t: f32| x0 + (x1 - x0) * t;
        let y0 = source.y + link.sy + link.dy / 2.0;
        let y1 = target.y + link.ty + link.dy / 2.0;
        LinkPath {
            start: (x0, y0),
            control_start: (lerp(curvature), y0),
            control_end: (lerp(1.0 - curvature), y1),
            end: (x1, y1),
            thickness: link.dy,
        }
    }
}

fn fmt_num(value: f32) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}
