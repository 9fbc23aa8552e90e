//! Bullet Pool
//!
//! A weapon that fires faster than bullets expire. The pool is capped, so
//! once every bullet is in flight the oldest one is recycled and fired
//! again.
//!
//! Key concepts:
//! - Pool configuration loaded from JSON
//! - `Poolable` hooks for visibility and reset
//! - Placing an item before it is activated with `get_at`
//! - A batched prewarm pass stepped from the frame loop
//! - Pool events and counters
//!
//! Run with: cargo run --example bullet_pool

use tickkit::pool::{ObjectPool, Placeable, PoolConfig, PoolEvent, Poolable, PrewarmStep};

#[derive(Debug, Default)]
struct Bullet {
    position: (f32, f32),
    velocity: (f32, f32),
    visible: bool,
}

impl Poolable for Bullet {
    fn set_active(&mut self, active: bool) {
        self.visible = active;
    }

    fn on_recycled(&mut self) {
        self.velocity = (0.0, 0.0);
    }
}

impl Placeable for Bullet {
    type Placement = ((f32, f32), (f32, f32));

    fn place(&mut self, (position, velocity): Self::Placement) {
        self.position = position;
        self.velocity = velocity;
    }
}

fn main() {
    println!("=== Bullet Pool Example ===\n");

    let config = PoolConfig::from_json(
        r#"{
            "prewarm_count": 0,
            "max_pool_size": 4,
            "activation_batch_size": 2,
            "allow_recycling": true
        }"#,
    )
    .unwrap();

    let mut bullets = ObjectPool::new(config, Bullet::default).unwrap();
    bullets.subscribe(|event| match event {
        PoolEvent::Recycled { handle } => println!("  recycled {}", handle),
        PoolEvent::PrewarmCompleted { handles } => {
            println!("  prewarm done, {} bullets ready", handles.len())
        }
        _ => {}
    });

    println!("Prewarming over several frames:");
    let mut cursor = bullets.prewarm_batched(4);
    let mut frame = 0;
    while cursor.step(&mut bullets) == PrewarmStep::Pending {
        frame += 1;
        println!("  frame {}: {:?} processed", frame, cursor.progress());
    }

    println!("\nFiring six shots:");
    for shot in 0..6 {
        let origin = (0.0, shot as f32);
        let handle = bullets.get_at((origin, (10.0, 0.0))).unwrap();
        println!("  shot {} -> {} at {:?}", shot, handle, origin);

        for active in bullets.active_handles().collect::<Vec<_>>() {
            if let Some(bullet) = bullets.item_mut(active) {
                bullet.position.0 += bullet.velocity.0;
            }
        }
    }

    let expired: Vec<_> = bullets.active_handles().take(2).collect();
    for handle in expired {
        bullets.return_to_pool(handle).unwrap();
    }

    let visible = bullets
        .active_handles()
        .filter(|&h| bullets.item(h).is_some_and(|b| b.visible))
        .count();
    println!(
        "\nActive: {} ({} visible), ready: {}",
        bullets.active_count(),
        visible,
        bullets.ready_count()
    );
    println!("Stats: {:?}", bullets.stats());

    println!("\n=== Example Complete ===");
}
