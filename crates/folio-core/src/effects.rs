#![forbid(unsafe_code)]

//! Pure scroll-effect math.
//!
//! Each function maps the instantaneous scroll offset (plus static layout) to
//! a visual decision. No state, no hysteresis.

/// Navbar `scrolled` marker: strictly above the threshold.
#[must_use]
pub fn navbar_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Hero translation in pixels.
///
/// `scroll_y * rate` while the hero is still on screen (`scroll_y <
/// hero_height`), otherwise zero.
#[must_use]
pub fn parallax_offset(scroll_y: f64, hero_height: f64, rate: f64) -> f64 {
    if scroll_y < hero_height {
        scroll_y * rate
    } else {
        0.0
    }
}

/// `transform` value for a vertical translation.
#[must_use]
pub fn translate_y(px: f64) -> String {
    // Avoid printing "-0px" for a negative zero product.
    let px = if px == 0.0 { 0.0 } else { px };
    format!("translateY({px}px)")
}

/// Whether a section is the current one.
///
/// The section's band starts `offset` pixels above its top and is
/// `height` pixels tall; the start is inclusive and the end exclusive.
#[must_use]
pub fn section_active(scroll_y: f64, top: f64, height: f64, offset: f64) -> bool {
    let start = top - offset;
    scroll_y >= start && scroll_y < start + height
}
