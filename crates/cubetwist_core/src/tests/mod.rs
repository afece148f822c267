use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::*;

mod cube_api;

fn new_cube(layer_count: u8) -> Cube {
    Cube::new(layer_count).expect("valid layer count")
}

fn twist(cube: &mut Cube, axis: i32, layers: LayerMaskUint, angle: i32) {
    cube.twist(axis, layers, angle).expect("valid twist");
}

/// Applies a fixed sequence that moves every category.
fn scramble(cube: &mut Cube) {
    let n = cube.layer_count() as u32;
    let outer = 1 << (n - 1);
    let inner = if n > 2 { 1 << (n / 2) } else { 1 };
    for (axis, layers, angle) in [
        (0, outer, 1),
        (1, outer, -1),
        (2, inner, 1),
        (0, inner | 1, 2),
        (1, 1, 1),
        (2, outer, -1),
        (1, inner, -2),
    ] {
        twist(cube, axis, layers, angle);
    }
}

/// Listener that counts notifications.
#[derive(Debug, Default)]
struct CountingListener {
    twisted: AtomicUsize,
    changed: AtomicUsize,
}
impl CubeListener for CountingListener {
    fn cube_twisted(&self, _event: &CubeEvent) {
        self.twisted.fetch_add(1, Ordering::SeqCst);
    }
    fn cube_changed(&self, _event: &CubeEvent) {
        self.changed.fetch_add(1, Ordering::SeqCst);
    }
}
impl CountingListener {
    fn counts(&self) -> (usize, usize) {
        (
            self.twisted.load(Ordering::SeqCst),
            self.changed.load(Ordering::SeqCst),
        )
    }
}

fn counting_listener(cube: &mut Cube) -> Arc<CountingListener> {
    let listener = Arc::new(CountingListener::default());
    cube.add_listener(listener.clone());
    listener
}
