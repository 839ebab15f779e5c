//! Tests for contact damage.

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;
    use bevy::prelude::*;

    use crate::damage::{apply_contact_damage, HitKind, Target, TargetDestroyed, TargetHit};
    use crate::physics::{BodyKind, ContactImpulse};

    fn setup() -> (World, Entity, Entity, Entity) {
        let mut world = World::new();
        world.init_resource::<Events<ContactImpulse>>();
        world.init_resource::<Events<TargetHit>>();
        world.init_resource::<Events<TargetDestroyed>>();
        world.init_resource::<Time>();

        let target = world
            .spawn((Target::default(), Transform::from_xyz(3.0, 0.5, 10.0)))
            .id();
        let projectile = world.spawn(BodyKind::Projectile).id();
        let debris = world.spawn(BodyKind::Debris).id();

        (world, target, projectile, debris)
    }

    fn contact(world: &mut World, target: Entity, other: Entity, impulse: f32) {
        world.send_event(ContactImpulse {
            target,
            other,
            impulse,
        });
    }

    fn run(world: &mut World) {
        world.run_system_once(apply_contact_damage).unwrap();
    }

    fn hits(world: &mut World) -> Vec<TargetHit> {
        world.resource_mut::<Events<TargetHit>>().drain().collect()
    }

    fn destroyed(world: &mut World) -> Vec<TargetDestroyed> {
        world
            .resource_mut::<Events<TargetDestroyed>>()
            .drain()
            .collect()
    }

    #[test]
    fn test_weak_contact_no_damage() {
        let (mut world, target, projectile, _) = setup();

        contact(&mut world, target, projectile, 1.0);
        run(&mut world);

        assert!(hits(&mut world).is_empty());
        assert_eq!(world.get::<Target>(target).unwrap().health, 10.0);
    }

    #[test]
    fn test_direct_and_indirect_damage() {
        let (mut world, target, projectile, debris) = setup();

        contact(&mut world, target, projectile, 3.0);
        contact(&mut world, target, debris, 4.0);
        run(&mut world);

        let events = hits(&mut world);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, HitKind::Direct);
        assert_eq!(events[0].damage, 3.0);
        assert_eq!(events[1].kind, HitKind::Indirect);
        assert_eq!(events[1].damage, 2.0);
        assert_eq!(events[1].remaining_health, 5.0);

        // Второй cue в тот же момент подавлен cooldown'ом
        assert!(events[0].play_cue);
        assert!(!events[1].play_cue);
    }

    #[test]
    fn test_destruction_emitted_once_and_despawns() {
        let (mut world, target, projectile, debris) = setup();

        // Два смертельных контакта в одном тике
        contact(&mut world, target, projectile, 12.0);
        contact(&mut world, target, debris, 30.0);
        run(&mut world);

        let events = destroyed(&mut world);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].target, target);
        assert_eq!(events[0].score_value, 100);
        assert_eq!(events[0].position, Vec3::new(3.0, 0.5, 10.0));

        assert!(world.get::<Target>(target).is_none());
    }

    #[test]
    fn test_contact_with_despawned_target_ignored() {
        let (mut world, target, projectile, _) = setup();

        contact(&mut world, target, projectile, 12.0);
        run(&mut world);
        destroyed(&mut world);
        hits(&mut world);

        contact(&mut world, target, projectile, 12.0);
        run(&mut world);

        assert!(destroyed(&mut world).is_empty());
    }

    #[test]
    fn test_untagged_other_is_indirect() {
        let (mut world, target, _, _) = setup();
        let rock = world.spawn_empty().id();

        contact(&mut world, target, rock, 10.0);
        run(&mut world);

        let events = hits(&mut world);
        assert_eq!(events[0].kind, HitKind::Indirect);
        assert_eq!(events[0].damage, 5.0);
    }

    #[test]
    fn test_contact_on_non_target_ignored() {
        let (mut world, _, projectile, debris) = setup();

        contact(&mut world, debris, projectile, 50.0);
        run(&mut world);

        assert!(hits(&mut world).is_empty());
        assert!(destroyed(&mut world).is_empty());
    }
}
