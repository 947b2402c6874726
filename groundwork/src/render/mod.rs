//! Map figure rendering.
//!
//! Composites fetched feature layers onto a single raster figure in a fixed
//! stacking order: place boundary as a background fill, building footprints,
//! street edges, street nodes, then point-of-interest markers. The visible
//! extent is exactly the bounding box the layers were fetched for.

use std::path::Path;

use geo_types::{LineString, Polygon};
use thiserror::Error;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::coord::BoundingBox;
use crate::features::MapLayers;

/// Errors that can occur while rendering a map figure.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The bounding box has zero or negative extent.
    #[error("bounding box {0} has no drawable extent")]
    InvalidExtent(BoundingBox),

    /// The canvas dimensions are unusable.
    #[error("cannot allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },

    /// Writing the figure to disk failed.
    #[error("failed to encode figure: {0}")]
    Encode(String),
}

/// Canvas dimensions for the rendered figure.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
        }
    }
}

/// Colors and mark sizes for each layer.
///
/// Defaults mirror the classic figure: tan boundary fill at half opacity,
/// gray buildings, semi-transparent black street edges and nodes, green
/// point-of-interest markers.
#[derive(Debug, Clone)]
pub struct MapStyle {
    pub background: Color,
    pub area_fill: Color,
    pub building_fill: Color,
    pub edge_stroke: Color,
    pub node_fill: Color,
    pub poi_fill: Color,
    pub edge_width: f32,
    pub node_radius: f32,
    pub poi_radius: f32,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            area_fill: Color::from_rgba8(210, 180, 140, 128),
            building_fill: Color::from_rgba8(128, 128, 128, 255),
            edge_stroke: Color::from_rgba8(0, 0, 0, 77),
            node_fill: Color::from_rgba8(0, 0, 0, 77),
            poi_fill: Color::from_rgba8(0, 128, 0, 255),
            edge_width: 1.0,
            node_radius: 1.0,
            poi_radius: 3.0,
        }
    }
}

/// Linear projection from geographic coordinates to canvas pixels.
struct Projection {
    bbox: BoundingBox,
    width: f32,
    height: f32,
}

impl Projection {
    fn x(&self, lon: f64) -> f32 {
        (((lon - self.bbox.west) / self.bbox.width_deg()) as f32) * self.width
    }

    // Canvas y grows downward, latitude grows upward.
    fn y(&self, lat: f64) -> f32 {
        (((self.bbox.north - lat) / self.bbox.height_deg()) as f32) * self.height
    }
}

/// Renders the feature layers onto one figure.
///
/// # Errors
///
/// Returns `RenderError` if the bounding box is degenerate or the canvas
/// cannot be allocated.
pub fn render_map(
    layers: &MapLayers,
    bbox: &BoundingBox,
    config: &RenderConfig,
    style: &MapStyle,
) -> Result<Pixmap, RenderError> {
    if bbox.width_deg() <= 0.0 || bbox.height_deg() <= 0.0 {
        return Err(RenderError::InvalidExtent(*bbox));
    }

    let mut pixmap = Pixmap::new(config.width, config.height).ok_or(RenderError::Canvas {
        width: config.width,
        height: config.height,
    })?;
    pixmap.fill(style.background);

    let projection = Projection {
        bbox: *bbox,
        width: config.width as f32,
        height: config.height as f32,
    };

    for polygon in &layers.boundary.polygons.0 {
        fill_polygon(&mut pixmap, &projection, polygon, style.area_fill);
    }

    for building in &layers.buildings {
        fill_polygon(&mut pixmap, &projection, &building.footprint, style.building_fill);
    }

    for edge in &layers.streets.edges {
        stroke_line(&mut pixmap, &projection, edge, style.edge_stroke, style.edge_width);
    }

    for node in &layers.streets.nodes {
        fill_circle(&mut pixmap, &projection, node.x, node.y, style.node_radius, style.node_fill);
    }

    for poi in &layers.pois {
        fill_circle(
            &mut pixmap,
            &projection,
            poi.location.x(),
            poi.location.y(),
            style.poi_radius,
            style.poi_fill,
        );
    }

    Ok(pixmap)
}

/// Writes a rendered figure to a PNG file.
pub fn save_png(pixmap: &Pixmap, path: &Path) -> Result<(), RenderError> {
    pixmap
        .save_png(path)
        .map_err(|e| RenderError::Encode(e.to_string()))
}

fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

fn ring_path(builder: &mut PathBuilder, projection: &Projection, ring: &LineString<f64>) {
    let mut coords = ring.0.iter();
    let Some(first) = coords.next() else {
        return;
    };
    builder.move_to(projection.x(first.x), projection.y(first.y));
    for coord in coords {
        builder.line_to(projection.x(coord.x), projection.y(coord.y));
    }
    builder.close();
}

fn fill_polygon(pixmap: &mut Pixmap, projection: &Projection, polygon: &Polygon<f64>, color: Color) {
    let mut builder = PathBuilder::new();
    ring_path(&mut builder, projection, polygon.exterior());
    for interior in polygon.interiors() {
        ring_path(&mut builder, projection, interior);
    }

    if let Some(path) = builder.finish() {
        pixmap.fill_path(
            &path,
            &solid_paint(color),
            FillRule::EvenOdd,
            Transform::identity(),
            None,
        );
    }
}

fn stroke_line(
    pixmap: &mut Pixmap,
    projection: &Projection,
    line: &LineString<f64>,
    color: Color,
    width: f32,
) {
    let mut coords = line.0.iter();
    let Some(first) = coords.next() else {
        return;
    };

    let mut builder = PathBuilder::new();
    builder.move_to(projection.x(first.x), projection.y(first.y));
    for coord in coords {
        builder.line_to(projection.x(coord.x), projection.y(coord.y));
    }

    if let Some(path) = builder.finish() {
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &solid_paint(color), &stroke, Transform::identity(), None);
    }
}

fn fill_circle(
    pixmap: &mut Pixmap,
    projection: &Projection,
    lon: f64,
    lat: f64,
    radius: f32,
    color: Color,
) {
    let mut builder = PathBuilder::new();
    builder.push_circle(projection.x(lon), projection.y(lat), radius);

    if let Some(path) = builder.finish() {
        pixmap.fill_path(
            &path,
            &solid_paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
}
