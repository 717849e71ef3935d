//! XML exchange format.
//!
//! Input documents look like:
//!
//! ```xml
//! <data>
//!   <placement_zone>
//!     <rect><min_point x="0" y="0"/><max_point x="10" y="10"/></rect>
//!     <alarms>
//!       <alarms><min_point x="4" y="0"/><max_point x="6" y="10"/></alarms>
//!     </alarms>
//!   </placement_zone>
//!   <circles>
//!     <circle id="1" inner_rad="1" outter_rad="1.5"/>
//!   </circles>
//! </data>
//! ```
//!
//! Exclusions and circles are optional; the zone is not. Results are written as
//! `data/circles/circle` elements carrying `id`, `x` and `y`.

use crate::error::{LoadError, SaveError};
use limpet::{Circle, Point, Rectangle, ResultData, Scene, point};
use roxmltree::Node;
use std::fmt::Write as _;
use std::path::Path;

const ZONE_PATH: &str = "data/placement_zone/rect";
const EXCLUSIONS_PATH: &str = "data/placement_zone/alarms/alarms";
const CIRCLES_PATH: &str = "data/circles/circle";
const MIN_POINT: &str = "min_point";
const MAX_POINT: &str = "max_point";
const X: &str = "x";
const Y: &str = "y";
const ID: &str = "id";
const INNER_RADIUS: &str = "inner_rad";
// Historical spelling kept for compatibility with existing scene files.
const OUTER_RADIUS: &str = "outter_rad";

pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let scene = parse_scene(&text)?;
    tracing::debug!(
        path = %path.display(),
        exclusions = scene.exclusion_areas().len(),
        circles = scene.circles().len(),
        "loaded scene"
    );
    Ok(scene)
}

pub fn parse_scene(text: &str) -> Result<Scene, LoadError> {
    let doc = roxmltree::Document::parse(text)?;

    let zone = select(doc.root(), ZONE_PATH)
        .into_iter()
        .next()
        .ok_or(LoadError::MissingNode { path: ZONE_PATH })?;
    let zone = load_rectangle(zone)?;

    let exclusions = select(doc.root(), EXCLUSIONS_PATH)
        .into_iter()
        .map(load_rectangle)
        .collect::<Result<Vec<_>, _>>()?;
    let circles = select(doc.root(), CIRCLES_PATH)
        .into_iter()
        .map(load_circle)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Scene::new(zone, exclusions, circles)?)
}

/// Serializes placed circles in result order.
pub fn result_to_xml(result: &ResultData) -> String {
    let mut out = String::from("<?xml version=\"1.0\"?>\n<data>\n  <circles>\n");
    for c in &result.circles {
        let _ = writeln!(
            out,
            "    <circle id=\"{}\" x=\"{}\" y=\"{}\" />",
            c.id(),
            c.position.x,
            c.position.y
        );
    }
    out.push_str("  </circles>\n</data>\n");
    out
}

pub fn save_result(result: &ResultData, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let path = path.as_ref();
    std::fs::write(path, result_to_xml(result)).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), circles = result.circles.len(), "saved result");
    Ok(())
}

/// All elements reached by following `path` (slash-separated tag names) from `root`.
fn select<'a, 'input>(root: Node<'a, 'input>, path: &str) -> Vec<Node<'a, 'input>> {
    let mut nodes = vec![root];
    for name in path.split('/') {
        nodes = nodes
            .into_iter()
            .flat_map(|n| n.children().filter(move |c| c.has_tag_name(name)))
            .collect();
    }
    nodes
}

fn load_rectangle(node: Node<'_, '_>) -> Result<Rectangle, LoadError> {
    let min = load_point(node, MIN_POINT)?;
    let max = load_point(node, MAX_POINT)?;
    Ok(Rectangle::new(min, max)?)
}

fn load_point(node: Node<'_, '_>, name: &'static str) -> Result<Point, LoadError> {
    let child = node
        .children()
        .find(|c| c.has_tag_name(name))
        .ok_or(LoadError::MissingNode { path: name })?;
    Ok(point(float_attribute(child, X)?, float_attribute(child, Y)?))
}

fn load_circle(node: Node<'_, '_>) -> Result<Circle, LoadError> {
    let raw = attribute(node, ID)?;
    let id = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| LoadError::MalformedAttribute {
            attribute: ID,
            value: raw.to_string(),
        })?;
    let inner = float_attribute(node, INNER_RADIUS)?;
    let outer = float_attribute(node, OUTER_RADIUS)?;
    Ok(Circle::new(id, inner, outer)?)
}

fn attribute<'a>(node: Node<'a, '_>, name: &'static str) -> Result<&'a str, LoadError> {
    node.attribute(name)
        .ok_or_else(|| LoadError::MissingAttribute {
            node: node.tag_name().name().to_string(),
            attribute: name,
        })
}

fn float_attribute(node: Node<'_, '_>, name: &'static str) -> Result<f64, LoadError> {
    let raw = attribute(node, name)?;
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(LoadError::MalformedAttribute {
            attribute: name,
            value: raw.to_string(),
        }),
    }
}
