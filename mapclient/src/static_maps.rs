//! Static map image URLs.
//!
//! These functions only build URLs; fetching the image is left to the
//! caller.

use crate::{
    request::{fmt_coord, fmt_num},
    styles::{find_style, find_variant},
    ClientConfig, ClientError,
};
use geo::Coord;
use log::debug;
use terrain::simplify;
use url::Url;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const MAX_SIZE: u32 = 2048;
pub const DEFAULT_STYLE: &str = "streets-v2";

/// Upper bound on the length of the encoded `path` parameter.
pub const MAX_PATH_CHARS: usize = 3000;

/// Starting simplification tolerance in degrees.
const PATH_TOLERANCE: f64 = 0.000_01;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpg,
    Webp,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Webp => "webp",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttributionPosition {
    #[default]
    BottomRight,
    BottomLeft,
    TopLeft,
    TopRight,
    Hidden,
}

impl AttributionPosition {
    fn param(self) -> Option<&'static str> {
        match self {
            AttributionPosition::BottomRight => None,
            AttributionPosition::BottomLeft => Some("bottomleft"),
            AttributionPosition::TopLeft => Some("topleft"),
            AttributionPosition::TopRight => Some("topright"),
            AttributionPosition::Hidden => Some("false"),
        }
    }
}

/// Which point of the marker icon sits on the marker position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Anchor {
    fn param(self) -> &'static str {
        match self {
            Anchor::Center => "center",
            Anchor::Top => "top",
            Anchor::Bottom => "bottom",
            Anchor::Left => "left",
            Anchor::Right => "right",
            Anchor::TopLeft => "topleft",
            Anchor::TopRight => "topright",
            Anchor::BottomLeft => "bottomleft",
            Anchor::BottomRight => "bottomright",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coord,
    /// CSS color, e.g. `#ff0000` or `red`.
    pub color: Option<String>,
}

impl Marker {
    pub fn new(position: Coord) -> Self {
        Self {
            position,
            color: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticPath {
    pub coords: Vec<Coord>,
    pub stroke: Option<String>,
    pub fill: Option<String>,
    /// Stroke width in pixels.
    pub width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaticMapOptions {
    /// Style id, variant id, or family reference.
    pub style: String,
    pub width: u32,
    pub height: u32,
    /// Double the pixel density.
    pub hidpi: bool,
    pub format: ImageFormat,
    pub attribution_position: AttributionPosition,
    pub markers: Vec<Marker>,
    /// URL of a custom marker icon.
    pub marker_icon: Option<String>,
    pub marker_anchor: Option<Anchor>,
    pub path: Option<StaticPath>,
    /// Extra space around a bounded or automatic extent, as a
    /// fraction of the map size.
    pub padding: Option<f64>,
}

impl Default for StaticMapOptions {
    fn default() -> Self {
        Self {
            style: DEFAULT_STYLE.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            hidpi: false,
            format: ImageFormat::default(),
            attribution_position: AttributionPosition::default(),
            markers: Vec::new(),
            marker_icon: None,
            marker_anchor: None,
            path: None,
            padding: None,
        }
    }
}

/// Map centered on `center` at `zoom`.
pub fn centered(
    config: &ClientConfig,
    center: Coord,
    zoom: f64,
    options: &StaticMapOptions,
) -> Result<Url, ClientError> {
    if !(0.0..=22.0).contains(&zoom) {
        return Err(ClientError::Invalid(format!("zoom {zoom}")));
    }
    let extent = format!("{},{}", fmt_coord(center), fmt_num(zoom));
    build(config, &extent, options, false)
}

/// Map fitted to `[west, south, east, north]`.
pub fn bounded(
    config: &ClientConfig,
    bbox: [f64; 4],
    options: &StaticMapOptions,
) -> Result<Url, ClientError> {
    let [west, south, east, north] = bbox;
    if south >= north || bbox.iter().any(|v| !v.is_finite()) {
        return Err(ClientError::Invalid(format!("bbox {bbox:?}")));
    }
    let extent = [west, south, east, north].map(fmt_num).join(",");
    build(config, &extent, options, true)
}

/// Map fitted to its markers and path.
pub fn automatic(config: &ClientConfig, options: &StaticMapOptions) -> Result<Url, ClientError> {
    if options.markers.is_empty() && options.path.is_none() {
        return Err(ClientError::Config("markers or path"));
    }
    build(config, "auto", options, true)
}

fn build(
    config: &ClientConfig,
    extent: &str,
    options: &StaticMapOptions,
    fitted: bool,
) -> Result<Url, ClientError> {
    let (width, height) = (options.width, options.height);
    if !(1..=MAX_SIZE).contains(&width) || !(1..=MAX_SIZE).contains(&height) {
        return Err(ClientError::Invalid(format!(
            "size {width}x{height}, max is {MAX_SIZE}"
        )));
    }

    let file = format!(
        "{width}x{height}{}.{}",
        if options.hidpi { "@2x" } else { "" },
        options.format.extension()
    );
    let style = style_id(&options.style);
    let mut url = config.endpoint(&["maps", style, "static", extent, file.as_str()])?;

    let path = options.path.as_ref().map(encode_path).transpose()?;
    {
        let mut pairs = url.query_pairs_mut();
        if let Some(position) = options.attribution_position.param() {
            pairs.append_pair("attribution", position);
        }
        if !options.markers.is_empty() {
            pairs.append_pair("markers", &encode_markers(options));
        }
        if let Some(path) = &path {
            pairs.append_pair("path", path);
        }
        if let (true, Some(padding)) = (fitted, options.padding) {
            pairs.append_pair("padding", &fmt_num(padding));
        }
    }
    Ok(url)
}

/// Resolves family references to their default style id.
fn style_id(style: &str) -> &str {
    match (find_variant(style), find_style(style)) {
        (Some(variant), _) => variant.id,
        (None, Some(family)) => family.id,
        (None, None) => style,
    }
}

fn encode_markers(options: &StaticMapOptions) -> String {
    let mut parts = Vec::with_capacity(options.markers.len() + 2);
    if let Some(icon) = &options.marker_icon {
        parts.push(format!("icon:{icon}"));
    }
    if let Some(anchor) = options.marker_anchor {
        parts.push(format!("anchor:{}", anchor.param()));
    }
    for marker in &options.markers {
        match &marker.color {
            Some(color) => parts.push(format!("{},{color}", fmt_coord(marker.position))),
            None => parts.push(fmt_coord(marker.position)),
        }
    }
    parts.join("|")
}

/// Encodes `path`, simplifying its coordinates with a doubling
/// tolerance until the result fits in [`MAX_PATH_CHARS`].
fn encode_path(path: &StaticPath) -> Result<String, ClientError> {
    if path.coords.len() < 2 {
        return Err(ClientError::Invalid(format!(
            "path needs at least 2 coordinates, got {}",
            path.coords.len()
        )));
    }

    let mut style = Vec::new();
    if let Some(stroke) = &path.stroke {
        style.push(format!("stroke:{stroke}"));
    }
    if let Some(width) = path.width {
        style.push(format!("width:{}", fmt_num(width)));
    }
    if let Some(fill) = &path.fill {
        style.push(format!("fill:{fill}"));
    }
    let encode = |coords: &[Coord]| {
        style
            .iter()
            .cloned()
            .chain(coords.iter().copied().map(fmt_coord))
            .collect::<Vec<_>>()
            .join("|")
    };

    let mut encoded = encode(&path.coords);
    let mut points = path.coords.len();
    let mut tolerance = PATH_TOLERANCE;
    while encoded.len() > MAX_PATH_CHARS && points > 2 {
        let simplified = simplify(&path.coords, Some(tolerance));
        points = simplified.len();
        encoded = encode(&simplified);
        tolerance *= 2.0;
    }
    if points < path.coords.len() {
        debug!(
            "simplified static map path from {} to {points} points, tolerance {}",
            path.coords.len(),
            tolerance / 2.0
        );
    }
    Ok(encoded)
}
