//! Core domain: arena bounds, containment and boundary projection.

use bevy::prelude::*;

use crate::content::ArenaDef;

/// Immutable play area. Bodies are kept inside by projecting them back onto
/// the boundary, so movement slides along the wall instead of stopping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arena {
    Circle { center: Vec2, radius: f32 },
    Rect { min: Vec2, max: Vec2 },
}

impl Arena {
    pub fn center(&self) -> Vec2 {
        match *self {
            Arena::Circle { center, .. } => center,
            Arena::Rect { min, max } => (min + max) * 0.5,
        }
    }

    /// True when a body of `body_radius` at `point` lies fully inside.
    pub fn contains(&self, point: Vec2, body_radius: f32) -> bool {
        match *self {
            Arena::Circle { center, radius } => point.distance(center) <= radius - body_radius,
            Arena::Rect { min, max } => {
                point.x >= min.x + body_radius
                    && point.x <= max.x - body_radius
                    && point.y >= min.y + body_radius
                    && point.y <= max.y - body_radius
            }
        }
    }

    /// True when `point` is no further than `margin` outside the bound.
    pub fn within_margin(&self, point: Vec2, margin: f32) -> bool {
        match *self {
            Arena::Circle { center, radius } => point.distance(center) <= radius + margin,
            Arena::Rect { min, max } => {
                point.x >= min.x - margin
                    && point.x <= max.x + margin
                    && point.y >= min.y - margin
                    && point.y <= max.y + margin
            }
        }
    }

    /// Project a body back inside the bound.
    pub fn clamp(&self, point: Vec2, body_radius: f32) -> Vec2 {
        match *self {
            Arena::Circle { center, radius } => {
                let limit = (radius - body_radius).max(0.0);
                let offset = point - center;
                let distance = offset.length();
                if distance <= limit {
                    point
                } else {
                    // distance > limit >= 0, so the offset is never zero here
                    center + offset / distance * limit
                }
            }
            Arena::Rect { min, max } => {
                let lo = min + Vec2::splat(body_radius);
                let hi = max - Vec2::splat(body_radius);
                Vec2::new(clamp_axis(point.x, lo.x, hi.x), clamp_axis(point.y, lo.y, hi.y))
            }
        }
    }
}

/// Clamp that collapses to the midpoint when the body is wider than the bound.
fn clamp_axis(value: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        (lo + hi) * 0.5
    } else {
        value.clamp(lo, hi)
    }
}

impl From<&ArenaDef> for Arena {
    fn from(def: &ArenaDef) -> Self {
        match *def {
            ArenaDef::Circle { center, radius } => Arena::Circle {
                center: Vec2::new(center.0, center.1),
                radius,
            },
            ArenaDef::Rect { min, max } => Arena::Rect {
                min: Vec2::new(min.0, min.1),
                max: Vec2::new(max.0, max.1),
            },
        }
    }
}
