// src/effects.rs
//! Cosmetic page effects. The browser runs them through the embedded page
//! script, which is generated from the constants here.

use std::fmt::Display;

/// Fraction of an element that must be visible before it is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.18;
/// Vertical scroll offset in px past which the navbar shrinks.
pub const NAV_SHRINK_OFFSET: f64 = 40.0;
/// Largest background displacement in px on either axis.
pub const PARALLAX_MAX_PX: f64 = 12.0;
pub const PARALLAX_SCALE: f64 = 1.08;

pub const REVEAL_CLASS: &str = "reveal";
pub const REVEAL_VISIBLE_CLASS: &str = "reveal-visible";
pub const NAV_SHRINK_CLASS: &str = "nav--shrink";

/// CSS transform for a background offset. The page uses it for the resting
/// position and, with JS interpolations as the offsets, for the script.
pub fn parallax_transform(x: impl Display, y: impl Display) -> String {
    format!("translate3d({}px, {}px, 0) scale({})", x, y, PARALLAX_SCALE)
}
