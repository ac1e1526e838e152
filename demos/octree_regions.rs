use octree_physics::*;

fn main() {
    let octree = OctreeConfig::default().with_split_threshold(4);
    let mut world = PhysicsWorld::new(WorldConfig::default().with_octree(octree));

    for i in 0..64 {
        let t = i as f32;
        let position = Vec3::new((t * 5.3) % 40.0 - 20.0, (t * 2.9) % 30.0, (t * 7.7) % 40.0 - 20.0);
        let entity = world.spawn(Transform::from_position(position));
        world.make_physics_object(entity, Vec3::ZERO, 1.0, 0.5);
        world.make_bounding_sphere(entity, true, 0.4);
    }
    world.fixed_step();

    let regions = world.debug_regions(true);
    let deepest = regions.iter().map(|r| r.depth).max().unwrap_or(0);
    println!(
        "{} regions, deepest level {}, {} unbound",
        regions.len(),
        deepest,
        world.tree().unbound_items().len()
    );
    for region in regions.iter().filter(|r| r.item_count > 0) {
        println!(
            "depth {} centre {:?} half {:?}: {} items",
            region.depth, region.bounds.position, region.bounds.half_size, region.item_count
        );
    }
}
