use crate::foundation::core::Point;

/// A circular joint marker.
///
/// Serialized with the `cx`/`cy`/`r` keys of the SVG `<circle>` element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JointMarker {
    /// Centre x.
    #[serde(rename = "cx")]
    pub x: f64,
    /// Centre y.
    #[serde(rename = "cy")]
    pub y: f64,
    /// Radius.
    #[serde(rename = "r")]
    pub radius: f64,
}

impl JointMarker {
    /// Marker at `p` with radius `radius`.
    pub fn at(p: Point, radius: f64) -> Self {
        Self {
            x: p.x,
            y: p.y,
            radius,
        }
    }

    /// Centre as a point.
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Generated skeleton: SVG path descriptors plus joint markers.
///
/// Coordinates are baked in at generation time; rendering never recomputes them.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SilhouetteData {
    /// Path descriptors, drawn first, in order.
    pub paths: Vec<String>,
    /// Joint markers, drawn after the paths, in order.
    #[serde(rename = "circles")]
    pub joints: Vec<JointMarker>,
}

impl SilhouetteData {
    /// Parse from the `{ "paths": [...], "circles": [...] }` JSON payload.
    pub fn from_json_str(s: &str) -> crate::ShotmateResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| crate::ShotmateError::serde(format!("parse silhouette json: {e}")))
    }

    /// Serialize to the JSON payload.
    pub fn to_json_string(&self) -> crate::ShotmateResult<String> {
        serde_json::to_string(self)
            .map_err(|e| crate::ShotmateError::serde(format!("serialize silhouette json: {e}")))
    }

    /// Bounding box of all joint markers (including their radii), if any.
    pub fn joint_bounds(&self) -> Option<crate::Rect> {
        let mut it = self.joints.iter();
        let first = it.next()?;
        let mut r = marker_rect(first);
        for j in it {
            r = r.union(marker_rect(j));
        }
        Some(r)
    }
}

fn marker_rect(j: &JointMarker) -> crate::Rect {
    crate::Rect::new(j.x - j.radius, j.y - j.radius, j.x + j.radius, j.y + j.radius)
}

pub(crate) fn circle_path(center: Point, radius: f64) -> String {
    format!(
        "M{},{} a{},{} 0 1,0 0.1,0 z",
        center.x, center.y, radius, radius
    )
}

pub(crate) fn segment_path(from: Point, to: Point) -> String {
    format!("M{},{} L{},{}", from.x, from.y, to.x, to.y)
}

pub(crate) fn quad_path(corners: [Point; 4]) -> String {
    let [a, b, c, d] = corners;
    format!(
        "M{},{} L{},{} L{},{} L{},{} Z",
        a.x, a.y, b.x, b.y, c.x, c.y, d.x, d.y
    )
}
