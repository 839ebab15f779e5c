//! Tests for the turn sequencer.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::ecs::system::RunSystemOnce;
    use bevy::prelude::*;

    use crate::config::GameConfig;
    use crate::launch::{LaunchAnchor, Projectile, ProjectileLaunched, ProjectilePhase};
    use crate::physics::{BodyMode, PhysicsBody};
    use crate::sequencer::{
        advance_turn_sequencer, LossTriggered, ProjectileAssigned, QueuedProjectile,
        SequencerPhase, TurnSequencer,
    };
    use crate::session::{Outcome, SessionState};

    const ANCHOR: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    const DT: f32 = 0.25;

    fn rest(index: usize) -> Transform {
        Transform::from_xyz(-2.0 - index as f32, 0.0, 0.0)
    }

    fn setup(count: usize, max_projectiles: usize) -> (World, Vec<Entity>) {
        let mut world = World::new();
        world.init_resource::<Events<ProjectileLaunched>>();
        world.init_resource::<Events<ProjectileAssigned>>();
        world.init_resource::<Events<LossTriggered>>();
        world.init_resource::<Time>();

        let mut config = GameConfig::default();
        config.sequencer.transition_duration = 1.0;
        config.sequencer.destroy_delay = 0.5;
        config.sequencer.next_spawn_delay = 0.5;
        world.insert_resource(config);

        world.insert_resource(SessionState {
            total_targets: Some(2),
            ..default()
        });

        let anchor = world
            .spawn((LaunchAnchor, Transform::from_translation(ANCHOR)))
            .id();

        let mut queue = Vec::new();
        let mut entities = Vec::new();
        for index in 0..count {
            let entity = world
                .spawn((Projectile::default(), rest(index), PhysicsBody::default()))
                .id();
            queue.push(QueuedProjectile {
                entity,
                rest: rest(index),
            });
            entities.push(entity);
        }

        let mut sequencer = TurnSequencer::default();
        sequencer.configure(anchor, queue, max_projectiles);
        world.insert_resource(sequencer);

        (world, entities)
    }

    fn tick(world: &mut World) {
        world
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(DT));
        world.run_system_once(advance_turn_sequencer).unwrap();
    }

    fn phase(world: &World) -> SequencerPhase {
        world.resource::<TurnSequencer>().phase
    }

    fn assigned(world: &mut World) -> Vec<ProjectileAssigned> {
        world
            .resource_mut::<Events<ProjectileAssigned>>()
            .drain()
            .collect()
    }

    fn losses(world: &mut World) -> Vec<LossTriggered> {
        world
            .resource_mut::<Events<LossTriggered>>()
            .drain()
            .collect()
    }

    /// Idle → Transitioning → Aiming за transition_duration
    fn bring_to_anchor(world: &mut World) {
        tick(world);
        for _ in 0..4 {
            tick(world);
        }
    }

    #[test]
    fn test_first_projectile_assigned() {
        let (mut world, projectiles) = setup(3, 3);

        tick(&mut world);

        assert!(matches!(
            phase(&world),
            SequencerPhase::Transitioning { projectile, .. } if projectile == projectiles[0]
        ));
        assert_eq!(
            world.get::<Projectile>(projectiles[0]).unwrap().phase,
            ProjectilePhase::Transitioning
        );

        let events = assigned(&mut world);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].projectile, projectiles[0]);
        assert_eq!(events[0].remaining, 2);
        assert_eq!(world.resource::<TurnSequencer>().remaining(), 2);
    }

    #[test]
    fn test_transition_eases_to_anchor() {
        let (mut world, projectiles) = setup(3, 3);

        tick(&mut world);
        tick(&mut world);
        tick(&mut world);

        // t = 0.5 → ease(0.5) = 0.5, ровно середина
        let halfway = rest(0).translation.lerp(ANCHOR, 0.5);
        let position = world.get::<Transform>(projectiles[0]).unwrap().translation;
        assert!((position - halfway).length() < 1e-4, "position = {:?}", position);

        tick(&mut world);
        tick(&mut world);

        assert_eq!(phase(&world), SequencerPhase::Aiming { projectile: projectiles[0] });
        assert_eq!(world.get::<Transform>(projectiles[0]).unwrap().translation, ANCHOR);

        let projectile = world.get::<Projectile>(projectiles[0]).unwrap();
        assert_eq!(projectile.phase, ProjectilePhase::Ready);
        assert_eq!(projectile.start_position, ANCHOR);
    }

    #[test]
    fn test_waits_for_launch() {
        let (mut world, projectiles) = setup(3, 3);
        bring_to_anchor(&mut world);

        for _ in 0..20 {
            tick(&mut world);
        }

        assert_eq!(phase(&world), SequencerPhase::Aiming { projectile: projectiles[0] });
    }

    #[test]
    fn test_launch_cycle_retires_and_assigns_next() {
        let (mut world, projectiles) = setup(3, 3);
        bring_to_anchor(&mut world);
        assigned(&mut world);

        world.send_event(ProjectileLaunched {
            projectile: projectiles[0],
            velocity: Vec3::new(0.0, 5.0, 10.0),
        });
        tick(&mut world);
        assert!(matches!(phase(&world), SequencerPhase::Launched { .. }));

        // destroy delay 0.5
        tick(&mut world);
        tick(&mut world);
        assert!(world.get::<Projectile>(projectiles[0]).is_none());
        assert!(matches!(phase(&world), SequencerPhase::Cooldown { .. }));

        // next spawn delay 0.5
        tick(&mut world);
        tick(&mut world);
        assert_eq!(phase(&world), SequencerPhase::Idle);

        tick(&mut world);
        let events = assigned(&mut world);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].projectile, projectiles[1]);
        assert_eq!(events[0].remaining, 1);
    }

    #[test]
    fn test_launch_of_other_projectile_ignored() {
        let (mut world, projectiles) = setup(3, 3);
        bring_to_anchor(&mut world);

        world.send_event(ProjectileLaunched {
            projectile: projectiles[2],
            velocity: Vec3::X,
        });
        tick(&mut world);

        assert_eq!(phase(&world), SequencerPhase::Aiming { projectile: projectiles[0] });
    }

    #[test]
    fn test_exhausted_queue_with_targets_left_triggers_loss() {
        let (mut world, _) = setup(3, 3);
        world.resource_mut::<TurnSequencer>().next_index = 3;
        world.resource_mut::<SessionState>().destroyed_targets = 1;

        tick(&mut world);

        assert_eq!(phase(&world), SequencerPhase::GameOver);
        let events = losses(&mut world);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].remaining_targets, 1);

        // GameOver терминальный
        tick(&mut world);
        assert_eq!(phase(&world), SequencerPhase::GameOver);
        assert!(losses(&mut world).is_empty());
    }

    #[test]
    fn test_exhausted_queue_after_clearing_level_is_not_a_loss() {
        let (mut world, _) = setup(3, 3);
        world.resource_mut::<TurnSequencer>().next_index = 3;
        world.resource_mut::<SessionState>().destroyed_targets = 2;

        tick(&mut world);

        assert_eq!(phase(&world), SequencerPhase::GameOver);
        assert!(losses(&mut world).is_empty());
    }

    #[test]
    fn test_max_projectiles_limits_queue() {
        let (mut world, _) = setup(5, 2);

        let sequencer = world.resource::<TurnSequencer>();
        assert_eq!(sequencer.limit(), 2);
        assert_eq!(sequencer.remaining(), 2);

        tick(&mut world);
        assert_eq!(assigned(&mut world)[0].remaining, 1);
    }

    #[test]
    fn test_missing_projectile_is_skipped() {
        let (mut world, projectiles) = setup(3, 3);
        world.despawn(projectiles[0]);

        tick(&mut world);
        assert_eq!(phase(&world), SequencerPhase::Idle);
        assert!(assigned(&mut world).is_empty());

        tick(&mut world);
        let events = assigned(&mut world);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].projectile, projectiles[1]);
    }

    #[test]
    fn test_no_assignment_after_level_outcome() {
        let (mut world, projectiles) = setup(3, 3);
        world.resource_mut::<SessionState>().outcome = Outcome::Won;

        tick(&mut world);

        assert_eq!(phase(&world), SequencerPhase::Idle);
        assert!(assigned(&mut world).is_empty());
        assert_eq!(
            world.get::<Projectile>(projectiles[0]).unwrap().phase,
            ProjectilePhase::Queued
        );
    }

    #[test]
    fn test_assignment_resets_body_to_kinematic() {
        let (mut world, projectiles) = setup(3, 3);
        world
            .get_mut::<PhysicsBody>(projectiles[0])
            .unwrap()
            .launch(Vec3::X);

        tick(&mut world);

        assert_eq!(
            world.get::<PhysicsBody>(projectiles[0]).unwrap().mode,
            BodyMode::Kinematic
        );
    }
}
