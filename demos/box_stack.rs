use octree_physics::*;

fn main() {
    let mut world = PhysicsWorld::new(WorldConfig::default().with_integrator(IntegratorKind::Rk4));

    let floor = world.spawn(Transform::from_position(Vec3::new(0.0, -0.5, 0.0)));
    world.make_bounding_box(floor, false, Vec3::new(8.0, 0.5, 8.0));

    let recorder = ContactRecorder::new();
    let mut crates = Vec::new();
    for level in 0..4 {
        let crate_box = world.spawn(Transform::from_position(Vec3::new(
            0.0,
            0.6 + level as f32 * 1.2,
            0.0,
        )));
        world.make_physics_object(crate_box, Vec3::ZERO, 2.0, 0.1);
        world.make_bounding_box(crate_box, true, Vec3::splat(0.5));
        if let Some(volume) = world.scene_mut().volume_mut(crate_box) {
            volume.channel_mut().subscribe(recorder.subscriber());
        }
        crates.push(crate_box);
    }

    for _ in 0..120 {
        world.step(1.0 / 60.0);
    }

    for (level, id) in crates.iter().enumerate() {
        if let Some(transform) = world.scene().transform(*id) {
            println!("crate {level}: y = {:.3}", transform.position.y);
        }
    }
    println!("contacts observed: {}", recorder.drain().len());
}
