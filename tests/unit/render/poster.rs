use super::*;

#[test]
fn svg_has_one_marker_per_phase() {
    let cfg = TimelineConfig::payment_flow();
    let svg = poster_svg(&cfg, 640, 360);
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert_eq!(svg.matches("<circle").count(), cfg.phase_count());
    assert_eq!(svg.matches("<path").count(), POSTER_ROUTES + 1);
}

#[test]
fn rasterizes_opaque_background() {
    let cfg = TimelineConfig::payment_flow();
    let img = render_static_poster(&cfg, 64, 36).unwrap();
    assert_eq!(img.width, 64);
    assert_eq!(img.height, 36);
    assert_eq!(img.data.len(), 64 * 36 * 4);
    // Top-left corner is pure background.
    assert_eq!(&img.data[0..4], &[0x0b, 0x10, 0x20, 0xff]);
}

#[test]
fn rejects_degenerate_sizes() {
    let cfg = TimelineConfig::payment_flow();
    assert!(matches!(
        render_static_poster(&cfg, 0, 10),
        Err(MotionError::Render(_))
    ));
    assert!(render_static_poster(&cfg, MAX_DIM + 1, 10).is_err());
}

#[test]
fn malformed_svg_is_a_render_error() {
    assert!(matches!(
        rasterize_poster("<svg", 10, 10),
        Err(MotionError::Render(_))
    ));
}
