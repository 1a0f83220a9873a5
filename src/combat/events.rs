//! Combat domain: messages published to the host app after each tick.

use bevy::ecs::message::Message;

use crate::core::{Target, TerminalState};

/// Health changed after a successful damage application
#[derive(Debug, Clone, Copy)]
pub struct HealthChangedEvent {
    pub target: Target,
    pub current: f32,
    pub max: f32,
}

impl Message for HealthChangedEvent {}

#[derive(Debug, Clone, Copy)]
pub struct BossPhaseChangeEvent {
    pub from: u8,
    pub new_phase: u8,
}

impl Message for BossPhaseChangeEvent {}

/// Event emitted when a parry deflects a boss strike
#[derive(Debug, Clone, Copy)]
pub struct ParrySuccessEvent {
    pub reflected: f32,
}

impl Message for ParrySuccessEvent {}

/// Stagger window opened (`active`) or closed
#[derive(Debug, Clone, Copy)]
pub struct StaggerEvent {
    pub active: bool,
}

impl Message for StaggerEvent {}

#[derive(Debug, Clone, Copy)]
pub struct FightEndedEvent {
    pub result: TerminalState,
}

impl Message for FightEndedEvent {}
