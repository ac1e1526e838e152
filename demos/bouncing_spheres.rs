use octree_physics::*;

fn main() {
    let mut engine = PhysicsEngine::new(1.0 / 60.0);
    engine.set_parallel_enabled(true);

    engine.add_static_box(
        Transform::from_position(Vec3::new(0.0, -0.5, 0.0)),
        Vec3::new(10.0, 0.5, 10.0),
    );

    let balls: Vec<EntityId> = (0..5)
        .map(|i| {
            let x = i as f32 * 1.5 - 3.0;
            engine.add_sphere(Vec3::new(x, 2.0 + i as f32, 0.0), Vec3::ZERO, 0.5, 1.0, 0.0)
        })
        .collect();

    for frame in 0..180 {
        engine.step(1.0 / 60.0);
        if frame % 30 == 0 {
            let heights: Vec<f32> = balls
                .iter()
                .filter_map(|id| engine.position(*id))
                .map(|p| p.y)
                .collect();
            println!("frame {frame:3}: heights {heights:.2?}");
        }
    }

    engine.world().profiler().report();
}
