use std::fmt::Write as _;

use crate::{
    foundation::{
        core::{Affine, BezPath},
        error::{MotionError, MotionResult},
    },
    render::targets::route_curve,
    timeline::config::TimelineConfig,
};

const MAX_DIM: u32 = 16_384;
const POSTER_ROUTES: usize = 3;

const BACKGROUND: &str = "#0b1020";
const CARD_FILL: &str = "#5b6cff";
const ROUTE_STROKE: &str = "#8fa2ff";
const MARKER_FILL: &str = "#e8ecff";

/// Premultiplied RGBA8 pixels of the static-tier poster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PosterImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

fn check_dims(width: u32, height: u32) -> MotionResult<()> {
    if width == 0 || height == 0 {
        return Err(MotionError::render("poster width/height must be > 0"));
    }
    if width > MAX_DIM || height > MAX_DIM {
        return Err(MotionError::render(format!(
            "poster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    Ok(())
}

/// The single non-animated illustration shown by the static tier: the card, a few settled
/// routes, and one marker per phase along a progress track.
pub fn poster_svg(config: &TimelineConfig, width: u32, height: u32) -> String {
    let w = f64::from(width);
    let h = f64::from(height);
    let to_px = Affine::scale_non_uniform(w, h);

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    let _ = write!(
        svg,
        r#"<rect x="0" y="0" width="{width}" height="{height}" fill="{BACKGROUND}"/>"#
    );

    for k in 0..POSTER_ROUTES {
        let q = route_curve(k, POSTER_ROUTES);
        let mut path = BezPath::new();
        path.move_to(q.p0);
        path.quad_to(q.p1, q.p2);
        path.apply_affine(to_px);
        let _ = write!(
            svg,
            r#"<path d="{}" fill="none" stroke="{ROUTE_STROKE}" stroke-width="{:.2}" stroke-opacity="0.7"/>"#,
            path.to_svg(),
            (h * 0.006).max(1.0)
        );
    }

    let card_w = w * 0.16;
    let card_h = card_w * 0.63;
    let _ = write!(
        svg,
        r#"<rect x="{:.2}" y="{:.2}" width="{card_w:.2}" height="{card_h:.2}" rx="{:.2}" fill="{CARD_FILL}"/>"#,
        w * 0.18 - card_w / 2.0,
        h * 0.5 - card_h / 2.0,
        card_w * 0.08
    );

    let track_y = h * 0.88;
    let (x0, x1) = (w * 0.1, w * 0.9);
    let mut track = BezPath::new();
    track.move_to((x0, track_y));
    track.line_to((x1, track_y));
    let _ = write!(
        svg,
        r#"<path d="{}" stroke="{MARKER_FILL}" stroke-opacity="0.3" stroke-width="{:.2}"/>"#,
        track.to_svg(),
        (h * 0.004).max(1.0)
    );

    let mut acc = 0.0;
    for phase in &config.phases {
        let mid = acc + phase.weight / 2.0;
        acc += phase.weight;
        let _ = write!(
            svg,
            r#"<circle cx="{:.2}" cy="{track_y:.2}" r="{:.2}" fill="{MARKER_FILL}"/>"#,
            x0 + (x1 - x0) * mid,
            (h * 0.012).max(1.5)
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Rasterize poster SVG markup at `width x height`.
pub fn rasterize_poster(svg: &str, width: u32, height: u32) -> MotionResult<PosterImage> {
    check_dims(width, height)?;

    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| MotionError::render(format!("parse poster svg: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| MotionError::render("failed to allocate poster pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(&tree, xform, &mut pixmap.as_mut());
    Ok(PosterImage {
        width,
        height,
        data: pixmap.data().to_vec(),
    })
}

/// Build and rasterize the static-tier poster for `config`.
#[tracing::instrument(skip(config))]
pub fn render_static_poster(
    config: &TimelineConfig,
    width: u32,
    height: u32,
) -> MotionResult<PosterImage> {
    check_dims(width, height)?;
    rasterize_poster(&poster_svg(config, width, height), width, height)
}

#[cfg(test)]
#[path = "../../tests/unit/render/poster.rs"]
mod tests;
