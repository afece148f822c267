use std::collections::HashSet;

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_part_location_round_trip() {
    for layer_count in [2, 3, 6] {
        let mut cube = new_cube(layer_count);
        scramble(&mut cube);
        let layout = cube.layout();
        for part in layout.parts() {
            let location = cube.part_location(part).expect("valid part");
            assert_eq!(Ok(part), cube.part_at(location));
            let orientation = cube.part_orientation(part).expect("valid part");
            let modulus = cube
                .part_type(part)
                .expect("valid part")
                .category()
                .map_or(1, PartCategory::modulus);
            assert!(orientation < modulus);
        }
        let center = layout.center_part();
        assert_eq!(Ok(PartType::Center), cube.part_type(center));
        assert_eq!(Ok(Location(center.0)), cube.part_location(center));
        assert!(cube.part_location(Part(center.0 + 1)).is_err());
        assert!(cube.part_at(Location(center.0 + 1)).is_err());
    }
}

#[test]
fn test_part_types() {
    let cube = new_cube(4);
    assert_eq!(Ok(PartType::Corner), cube.part_type(Part(7)));
    assert_eq!(Ok(PartType::Edge), cube.part_type(Part(8)));
    assert_eq!(Ok(PartType::Side), cube.part_type(Part(32)));
    assert_eq!(Ok(PartType::Center), cube.part_type(Part(56)));
    assert_eq!(
        Err(CubeError::OutOfRange(IndexOutOfRange {
            type_name: "Part",
            index: 57,
            count: 57,
        })),
        cube.part_type(Part(57)),
    );
}

#[test]
fn test_sticker_queries() {
    let cube = new_cube(6);
    let urf = Part(0);
    assert_eq!(Ok(Some(Face::U)), cube.part_face(urf, 0));
    assert_eq!(Ok(Some(Face::R)), cube.part_face(urf, 1));
    assert_eq!(Ok(Some(Face::F)), cube.part_face(urf, 2));
    assert_eq!(Ok(Some(Axis::X)), cube.part_axis(urf, 1));
    assert_eq!(Ok(1), cube.part_angle(urf, 2));
    assert_eq!(Ok(LayerMask(0b100000)), cube.part_layer_mask(urf, 0));

    let ulb = Part(4);
    assert_eq!(Ok(Some(Face::L)), cube.part_face(ulb, 1));
    assert_eq!(Ok(-1), cube.part_angle(ulb, 1));
    assert_eq!(Ok(LayerMask(1)), cube.part_layer_mask(ulb, 1));

    // The "ur" edge in band 1 runs along Z and sits in layer 3.
    let ur = cube.layout().part(PartCategory::Edge, 12);
    assert_eq!(Ok(Some(Face::R)), cube.part_face(ur, 1));
    assert_eq!(Ok(Some(Axis::Z)), cube.part_axis(ur, 0));
    assert_eq!(Ok(-1), cube.part_angle(ur, 1));
    assert_eq!(Ok(LayerMask(0b1000)), cube.part_layer_mask(ur, 0));

    let side = cube.layout().part(PartCategory::Side, 3);
    assert_eq!(Ok(Some(Face::L)), cube.part_face(side, 0));
    assert_eq!(Ok(LayerMask(1)), cube.part_layer_mask(side, 0));
    assert!(cube.part_face(side, 1).is_err());

    let center = cube.layout().center_part();
    assert_eq!(Ok(None), cube.part_face(center, 0));
    assert_eq!(Ok(LayerMask::NONE), cube.part_layer_mask(center, 0));
    assert_eq!(Ok(0), cube.part_angle(center, 0));

    assert_eq!(
        Err(CubeError::InvalidArgument(InvalidArgument::StickerOrientation {
            orientation: 3,
            sticker_count: 3,
        })),
        cube.part_face(urf, 3),
    );
}

#[test]
fn test_sticker_faces_follow_twists() {
    // R takes the up sticker of urf to the back face.
    let mut cube = new_cube(3);
    twist(&mut cube, 0, 0b100, 1);
    assert_eq!(Ok(Some(Face::B)), cube.part_face(Part(0), 0));
    assert_eq!(Ok(Some(Face::R)), cube.part_face(Part(0), 1));
    assert_eq!(Ok(Some(Face::U)), cube.part_face(Part(0), 2));
    assert_eq!(Ok(LayerMask(0b001)), cube.part_layer_mask(Part(0), 0));
}

#[test]
fn test_unsolved_parts() {
    let mut cube = new_cube(3);
    assert!(cube.unsolved_parts().is_empty());
    twist(&mut cube, 0, 0b100, 1);
    let expected: Vec<Part> = [0, 1, 2, 3, 8, 9, 10, 12, 20].into_iter().map(Part).collect();
    assert_eq!(expected, cube.unsolved_parts());
    assert!(!cube.is_solved());
}

#[test]
fn test_listeners() {
    let mut cube = new_cube(3);
    let listener = counting_listener(&mut cube);

    twist(&mut cube, 0, 1, 1);
    assert_eq!((1, 0), listener.counts());

    cube.set_quiet(true);
    assert!(cube.is_quiet());
    twist(&mut cube, 0, 1, -1);
    cube.reset();
    assert_eq!((1, 0), listener.counts());
    cube.set_quiet(false);
    assert_eq!((1, 1), listener.counts());

    cube.reset();
    assert_eq!((1, 2), listener.counts());

    let as_dyn: Arc<dyn CubeListener> = listener.clone();
    assert!(cube.remove_listener(&as_dyn));
    assert!(!cube.remove_listener(&as_dyn));
    twist(&mut cube, 0, 1, 1);
    assert_eq!((1, 2), listener.counts());
}

#[test]
fn test_default_twist_notification_is_a_change() {
    #[derive(Default)]
    struct ChangeOnly(AtomicUsize);
    impl CubeListener for ChangeOnly {
        fn cube_changed(&self, event: &CubeEvent) {
            assert_eq!(4, event.layer_count);
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    let mut cube = new_cube(4);
    let listener = Arc::new(ChangeOnly::default());
    cube.add_listener(listener.clone());
    twist(&mut cube, 2, 0b0110, 2);
    assert_eq!(1, listener.0.load(Ordering::SeqCst));
}

#[test]
fn test_set_state() {
    let mut source = new_cube(4);
    scramble(&mut source);

    let mut cube = new_cube(4);
    let listener = counting_listener(&mut cube);
    cube.set_state(source.state().clone()).expect("valid state");
    assert_eq!(source, cube);
    assert_eq!((0, 1), listener.counts());

    let wrong_size = new_cube(5).state().clone();
    assert!(matches!(
        cube.set_state(wrong_size),
        Err(CubeError::InvalidArgument(InvalidArgument::StateLength { .. })),
    ));

    let layout = cube.layout();
    assert_eq!(
        Err(InvalidArgument::StateLength {
            category: "side",
            expected: 24,
            actual: 23,
        }),
        PartState::new(
            layout,
            CategoryState::solved(8),
            CategoryState::solved(24),
            CategoryState::solved(23),
        ),
    );
    assert_eq!(source, cube);
    assert_eq!((0, 1), listener.counts());
}

#[test]
fn test_set_to_and_transform_by() {
    let mut scrambled = new_cube(4);
    scramble(&mut scrambled);

    let mut copy = new_cube(4);
    copy.set_to(&scrambled).expect("same size");
    assert_eq!(scrambled, copy);

    let mut twice = new_cube(4);
    scramble(&mut twice);
    scramble(&mut twice);

    let mut transformed = new_cube(4);
    transformed.transform_by(&scrambled).expect("same size");
    assert_eq!(scrambled, transformed);
    transformed.transform_by(&scrambled).expect("same size");
    assert_eq!(twice, transformed);

    assert_eq!(
        Err(CubeError::InvalidArgument(InvalidArgument::LayerCountMismatch {
            expected: 4,
            actual: 5,
        })),
        copy.transform_by(&new_cube(5)),
    );
    assert!(copy.set_to(&new_cube(3)).is_err());
    assert_eq!(scrambled, copy);
}

#[test]
fn test_equality_and_hashing() {
    let mut a = new_cube(3);
    let listener = counting_listener(&mut a);
    scramble(&mut a);
    let b = a.clone();
    assert_eq!(a, b);

    // Clones do not share listeners.
    let (twisted, _) = listener.counts();
    let mut b = b;
    twist(&mut b, 1, 1, 1);
    assert_eq!(twisted, listener.counts().0);
    assert_ne!(a, b);

    let set: HashSet<Cube> = [a.clone(), a.clone(), b.clone(), new_cube(3), new_cube(2)]
        .into_iter()
        .collect();
    assert_eq!(4, set.len());
}

#[test]
fn test_shared_cube() {
    let shared = new_cube(5).into_shared();
    let listener = counting_listener(&mut shared.lock());
    let threads: Vec<_> = (0..4)
        .map(|axis| {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || {
                for layer in 0..5 {
                    shared
                        .lock()
                        .twist(axis % 3, 1 << layer, 1)
                        .expect("valid twist");
                }
            })
        })
        .collect();
    for thread in threads {
        thread.join().expect("thread panicked");
    }
    let cube = shared.lock();
    assert!(cube.state().is_valid());
    assert_eq!((20, 0), listener.counts());
}
