//! Core domain: read-only view of the fight for renderers and tooling.

use serde::Serialize;

use crate::combat::attacks::AttackStage;
use crate::combat::hazards::{Hazard, HazardShape};
use crate::core::events::TerminalState;

/// Kind-specific hazard geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum HazardView {
    Orb {
        position: [f32; 2],
        radius: f32,
    },
    Beam {
        origin: [f32; 2],
        angle: f32,
        length: f32,
        width: f32,
    },
    MultiBeam {
        origin: [f32; 2],
        angles: Vec<f32>,
        length: f32,
        width: f32,
    },
    Pulsation {
        center: [f32; 2],
        radius: f32,
        inner: f32,
        outer: f32,
        active: bool,
    },
    SpinningRing {
        center: [f32; 2],
        orbs: Vec<[f32; 2]>,
        orb_radius: f32,
    },
}

impl From<&Hazard> for HazardView {
    fn from(hazard: &Hazard) -> Self {
        match &hazard.shape {
            HazardShape::RadialOrb(orb) => HazardView::Orb {
                position: orb.position.to_array(),
                radius: orb.radius,
            },
            HazardShape::LineBeam(beam) => HazardView::Beam {
                origin: beam.origin.to_array(),
                angle: beam.angle,
                length: beam.length,
                width: beam.width,
            },
            HazardShape::MultiBeam(beams) => HazardView::MultiBeam {
                origin: beams.origin.to_array(),
                angles: beams.angles.clone(),
                length: beams.length,
                width: beams.width,
            },
            HazardShape::PulsationRing(ring) => {
                let (inner, outer) = ring.band();
                HazardView::Pulsation {
                    center: ring.center.to_array(),
                    radius: ring.radius,
                    inner,
                    outer,
                    active: ring.active,
                }
            }
            HazardShape::SpinningOrbRing(ring) => HazardView::SpinningRing {
                center: ring.center.to_array(),
                orbs: ring.orb_positions().map(|p| p.to_array()).collect(),
                orb_radius: ring.orb_radius,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BossSnapshot {
    pub position: [f32; 2],
    pub radius: f32,
    pub phase: u8,
    pub health_fraction: f32,
    pub stage: AttackStage,
    pub attack_pattern: Option<u32>,
    /// Telegraph progress in [0, 1]
    pub windup_progress: f32,
    pub final_phase_remaining: f32,
    pub hazards: Vec<HazardView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpellView {
    pub position: [f32; 2],
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub position: [f32; 2],
    pub radius: f32,
    pub facing: f32,
    pub health_fraction: f32,
    pub invulnerable: bool,
    pub blocking: bool,
    pub parry_open: bool,
    pub rolling: bool,
    pub spell: Option<SpellView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StunSnapshot {
    pub fraction: f32,
    pub active: bool,
    pub remaining: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSnapshot {
    pub elapsed: f32,
    pub seed: u64,
    pub terminal: Option<TerminalState>,
    pub boss: BossSnapshot,
    pub player: PlayerSnapshot,
    pub stun: StunSnapshot,
}
