use primitive_hashmap::{
    BooleanHashMap, ByteHashMap, CharHashMap, ConfigError, DoubleHashMap, FloatHashMap,
    IntHashMap, LongHashMap, MapConfig, PrimitiveHashMap, ShortHashMap, MAXIMUM_CAPACITY,
};

#[test]
fn insert_thousand_then_remove_half() {
    let mut m = IntHashMap::new();
    for k in 0..1000 {
        assert_eq!(m.insert(k, k * 2), None);
    }
    assert_eq!(m.len(), 1000);
    assert_eq!(m.get(500), Some(&1000));

    for k in 0..500 {
        assert_eq!(m.remove(k), Some(k * 2));
    }
    assert_eq!(m.len(), 500);
    assert_eq!(m.get(10), None);
    assert_eq!(m.get(999), Some(&1998));
}

#[test]
fn resize_keeps_every_value_and_power_of_two_capacity() {
    let mut m: LongHashMap<String> = PrimitiveHashMap::new();
    let mut last_cap = 0;
    for k in 0..5000i64 {
        m.insert(k * 7919, format!("v{}", k));
        let cap = m.capacity();
        assert!(cap.is_power_of_two());
        assert!(cap >= last_cap);
        if cap != last_cap {
            for j in 0..=k {
                assert_eq!(m.get(j * 7919).map(String::as_str), Some(format!("v{}", j).as_str()));
            }
            last_cap = cap;
        }
    }
    assert_eq!(m.capacity(), 8192);
}

#[test]
fn last_assignment_wins_across_resizes() {
    let mut m = ShortHashMap::new();
    for round in 0..3i16 {
        for k in -300..300i16 {
            m.insert(k, k.wrapping_mul(round));
        }
    }
    assert_eq!(m.len(), 600);
    for k in -300..300i16 {
        assert_eq!(m.get(k), Some(&k.wrapping_mul(2)));
    }
}

#[test]
fn custom_load_factor_controls_growth() {
    let mut dense: IntHashMap<()> = PrimitiveHashMap::with_capacity_and_load_factor(16, 4.0).unwrap();
    for k in 0..64 {
        dense.insert(k, ());
    }
    assert_eq!(dense.capacity(), 16);
    dense.insert(64, ());
    assert_eq!(dense.capacity(), 32);

    let cfg = MapConfig {
        initial_capacity: 3,
        load_factor: 0.5,
    };
    let mut sparse: IntHashMap<()> = PrimitiveHashMap::with_config(cfg).unwrap();
    sparse.insert(0, ());
    sparse.insert(1, ());
    assert_eq!(sparse.capacity(), 4);
    sparse.insert(2, ());
    assert_eq!(sparse.capacity(), 8);
    assert_eq!(sparse.load_factor(), 0.5);
}

#[test]
fn invalid_configuration_is_rejected() {
    for lf in [0.0, -0.5, f32::NAN] {
        match IntHashMap::<u8>::with_capacity_and_load_factor(16, lf) {
            Err(ConfigError::InvalidLoadFactor(_)) => {}
            Ok(_) => panic!("load factor {} accepted", lf),
        }
    }
    // Oversized capacity is clamped, not rejected.
    let m: IntHashMap<u8> = PrimitiveHashMap::with_capacity_and_load_factor(usize::MAX, 0.75).unwrap();
    assert_eq!(m.capacity(), 0);
    assert_eq!(MapConfig::new(usize::MAX, 0.75).clamped_capacity(), MAXIMUM_CAPACITY);
}

#[test]
fn every_primitive_width_works() {
    let mut b = BooleanHashMap::new();
    b.insert(true, 1);
    b.insert(false, 0);
    assert_eq!(b.get(true), Some(&1));
    assert_eq!(b.len(), 2);

    let bytes: ByteHashMap<i8> = (i8::MIN..=i8::MAX).map(|x| (x, x)).collect();
    assert_eq!(bytes.len(), 256);
    assert_eq!(bytes.get(-128), Some(&-128));

    let mut chars = CharHashMap::new();
    for (i, c) in "hello, world".chars().enumerate() {
        chars.insert(c, i);
    }
    assert_eq!(chars.get('l'), Some(&10));
    assert_eq!(chars.get('z'), None);

    let mut longs = LongHashMap::new();
    longs.insert(i64::MIN, "min");
    longs.insert(i64::MAX, "max");
    longs.insert(1 << 40, "big");
    assert_eq!(longs.get(1 << 40), Some(&"big"));
    assert_eq!(longs.get(i64::MIN), Some(&"min"));

    let mut floats = FloatHashMap::new();
    floats.insert(f32::NAN, "nan");
    floats.insert(0.0, "zero");
    floats.insert(-0.0, "negzero");
    assert_eq!(floats.get(f32::NAN), Some(&"nan"));
    assert_eq!(floats.get(0.0), Some(&"zero"));
    assert_eq!(floats.get(-0.0), Some(&"negzero"));
    assert_eq!(floats.len(), 3);

    let mut doubles = DoubleHashMap::new();
    doubles.insert(1.5, 1);
    doubles.insert(f64::INFINITY, 2);
    assert_eq!(doubles.get(1.5), Some(&1));
    assert_eq!(doubles.get(f64::INFINITY), Some(&2));
}

#[test]
fn handles_go_stale_after_removal() {
    let mut m = IntHashMap::new();
    m.insert(1, "a".to_string());
    let h = m.find(1).expect("present");
    assert_eq!(h.key(&m), Some(1));
    if let Some(v) = h.value_mut(&mut m) {
        v.push('!');
    }
    assert_eq!(h.value(&m).map(String::as_str), Some("a!"));

    m.remove(1);
    assert!(h.value(&m).is_none());
    assert!(h.key(&m).is_none());
    m.insert(1, "b".to_string());
    assert!(h.value(&m).is_none());
    assert!(m.next_entry(h).is_none());
}

#[test]
fn handles_only_resolve_in_their_own_map() {
    let a: IntHashMap<&str> = [(1, "a1"), (2, "a2")].into_iter().collect();
    let mut b: IntHashMap<&str> = [(7, "b7"), (8, "b8")].into_iter().collect();
    let h = a.find(1).expect("present");
    assert_eq!(h.value(&a), Some(&"a1"));
    assert_eq!(h.value(&b), None);
    assert_eq!(h.key(&b), None);
    assert!(h.value_mut(&mut b).is_none());
    assert!(b.next_entry(h).is_none());
    assert_eq!(b.get(7), Some(&"b7"));

    let first = a.first_entry().expect("non-empty");
    let copy = a.clone();
    assert_eq!(first.key(&copy), None);
    assert!(copy.first_entry().and_then(|c| c.key(&copy)).is_some());
}

#[test]
fn bulk_operations() {
    let mut m: IntHashMap<i32> = (0..100).map(|k| (k, k)).collect();
    m.replace_all(|k, v| k + v);
    assert_eq!(m.get(40), Some(&80));

    let mut sum = 0;
    m.for_each(|_, v| sum += v);
    assert_eq!(sum, (0..100).map(|k| 2 * k).sum::<i32>());

    m.retain(|k, _| k % 2 == 0);
    assert_eq!(m.len(), 50);
    assert!(m.keys().all(|k| k % 2 == 0));
    assert!(m.contains_value(&196));
    assert!(!m.contains_value(&(2 * 99)));

    m.extend((100..110).map(|k| (k, 0)));
    assert_eq!(m.len(), 60);
    m.clear();
    assert!(m.is_empty());
}

#[test]
fn debug_and_equality() {
    let mut a = CharHashMap::new();
    a.insert('x', 1);
    assert_eq!(format!("{:?}", a), "{'x': 1}");
    let b: CharHashMap<i32> = [('x', 1)].into_iter().collect();
    assert_eq!(a, b);
    assert_eq!(IntHashMap::<u8>::default(), IntHashMap::new());
}
