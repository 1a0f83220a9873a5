//! Combat domain: forwarding engine events to the host app.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::events::{
    BossPhaseChangeEvent, FightEndedEvent, HealthChangedEvent, ParrySuccessEvent, StaggerEvent,
};
use crate::core::{CombatEvent, CombatSimulation, TerminalState};

/// Drain the tick's events and republish the ones other plugins listen to.
pub(crate) fn publish_combat_events(
    mut simulation: ResMut<CombatSimulation>,
    mut health_events: MessageWriter<HealthChangedEvent>,
    mut phase_events: MessageWriter<BossPhaseChangeEvent>,
    mut parry_events: MessageWriter<ParrySuccessEvent>,
    mut stagger_events: MessageWriter<StaggerEvent>,
    mut fight_events: MessageWriter<FightEndedEvent>,
) {
    for event in simulation.drain_events() {
        match event {
            CombatEvent::HealthChanged {
                target,
                current,
                max,
            } => {
                health_events.write(HealthChangedEvent {
                    target,
                    current,
                    max,
                });
            }
            CombatEvent::PhaseChanged { from, to } => {
                phase_events.write(BossPhaseChangeEvent {
                    from,
                    new_phase: to,
                });
            }
            CombatEvent::Parried { reflected } => {
                parry_events.write(ParrySuccessEvent { reflected });
            }
            CombatEvent::StaggerStarted => {
                stagger_events.write(StaggerEvent { active: true });
            }
            CombatEvent::StaggerEnded => {
                stagger_events.write(StaggerEvent { active: false });
            }
            CombatEvent::FightEnded(result) => {
                match result {
                    TerminalState::Victory => info!(
                        "Boss defeated after {:.1}s",
                        simulation.elapsed()
                    ),
                    TerminalState::Defeat => info!(
                        "Player fell after {:.1}s, boss at {:.0} health",
                        simulation.elapsed(),
                        simulation.boss().health.current
                    ),
                }
                fight_events.write(FightEndedEvent { result });
            }
            _ => {}
        }
    }
}
