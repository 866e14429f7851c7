use itertools::Itertools;

use hyperminhash::{Entry, Sketch};

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    let relerr = (actual - expected).abs() / expected;
    assert!(
        relerr < tolerance,
        "expected ~{}, got {} (relerr {:.4})",
        expected,
        actual,
        relerr
    );
}

#[test]
fn single_item_end_to_end() {
    let mut sk = Sketch::new();
    assert!(sk.is_empty());
    assert_eq!(sk.cardinality(), 0.0);
    assert_eq!(sk.len(), 0);

    sk.add("foo");
    assert!(!sk.is_empty());
    assert_eq!(sk.len(), 1);
    let card = sk.cardinality();
    assert!((0.98..1.02).contains(&card), "card {}", card);

    // Re-adding the same item changes nothing.
    sk.add("foo");
    assert_eq!(sk.len(), 1);
    sk.add("foo2");
    assert_eq!(sk.len(), 2);
}

#[test]
fn count_formatted_keys() {
    let mut sk = Sketch::new();
    for i in 0..1000 {
        sk.add_bytes(format!("foo {}", i).as_bytes());
    }
    assert_close(sk.cardinality(), 1000.0, 0.02);
}

#[test]
fn count_integers() {
    let mut sk = Sketch::new();
    for i in 0..100i64 {
        sk.add(i);
    }
    assert_close(sk.cardinality(), 100.0, 0.03);
}

#[test]
fn union_of_overlapping_streams() {
    let mut a = Sketch::new();
    for i in 0..100 {
        a.add_bytes(format!("foo {}", i).as_bytes());
    }
    let mut b = Sketch::new();
    for i in 50..150 {
        b.add_bytes(format!("foo {}", i).as_bytes());
        b.add_bytes(format!("foo1 {}", i).as_bytes());
    }
    // 100 ∪ 200 with 50 shared: 250 distinct.
    let est = a.union_estimate(&b);
    assert_close(est, 250.0, 0.02);

    let mut merged = a.clone();
    merged.merge(&b);
    assert_eq!(merged.cardinality(), est);
    // Merging the other way round lands on the same registers.
    let mut reversed = b.clone();
    reversed.merge(&a);
    assert_eq!(merged, reversed);
}

#[test]
fn intersection_of_overlapping_streams() {
    let mut a = Sketch::new();
    for i in 0..10000 {
        a.add_bytes(format!("foo {}", i).as_bytes());
    }
    let mut b = Sketch::new();
    for i in 5000..15000 {
        b.add_bytes(format!("foo {}", i).as_bytes());
        b.add_bytes(format!("foo1 {}", i).as_bytes());
    }
    // |A| = 10000, |B| = 20000, 5000 shared.
    assert_close(a.intersection(&b), 5000.0, 0.05);
}

#[test]
fn similarity_of_integer_ranges() {
    let a: Sketch = (0..10000i64).map(|i| i.to_le_bytes().to_vec()).collect();
    let b: Sketch = (5000..15000i64).map(|i| i.to_le_bytes().to_vec()).collect();
    // Jaccard = 5000 / 15000.
    let sim = a.similarity(&b);
    assert!(
        (sim - 1.0 / 3.0).abs() < 0.02,
        "similarity {} far from 1/3",
        sim
    );
}

#[test]
fn intersection_with_empty_is_zero() {
    let mut a = Sketch::new();
    a.add("foo");
    let empty = Sketch::new();
    assert_eq!(a.intersection(&empty), 0.0);
    assert_eq!(empty.intersection(&a), 0.0);
    assert_eq!(empty.similarity(&Sketch::new()), 0.0);
}

#[test]
fn save_load_round_trip() {
    let mut sk = Sketch::new();
    sk.add("foo");
    sk.add("bar");
    sk.add(1);
    sk.add(2);
    assert_eq!(sk.len(), 4);

    let buf = sk.save();
    assert_eq!(buf.len(), Sketch::SERIALIZED_LEN);
    assert_eq!(buf.len(), 1 << 15);

    let restored = Sketch::load(&buf).unwrap();
    assert_eq!(restored, sk);
    assert_eq!(restored.len(), 4);
    assert_eq!(restored.save(), buf);
}

#[test]
fn load_rejects_wrong_lengths() {
    assert!(Sketch::load(&[]).is_err());
    assert!(Sketch::load(&vec![0u8; Sketch::SERIALIZED_LEN + 1]).is_err());
    let err = Sketch::load(&[1, 2, 3]).unwrap_err();
    assert!(format!("{}", err).starts_with("FormatError"));
}

#[test]
fn saves_are_deterministic() {
    let build = || {
        let mut sk = Sketch::new();
        for i in 0..500 {
            sk.add_bytes(format!("det {}", i).as_bytes());
        }
        sk.save()
    };
    assert_eq!(build(), build());
}

#[test]
fn growth_is_monotone() {
    let mut sk = Sketch::new();
    let mut prev = sk.clone();
    for i in 0..50 {
        sk.add_bytes(format!("item {}", i).as_bytes());
        assert!(prev <= sk);
        prev = sk.clone();
    }

    let other: Sketch = (0..50).map(|i| format!("more {}", i)).collect();
    sk.merge(&other);
    assert!(prev <= sk);
    assert!(other <= sk);
}

#[test]
fn merge_is_commutative_across_pairs() {
    let sketches: Vec<Sketch> = (0..4)
        .map(|k| (0..100).map(|i| format!("s{} {}", k, i)).collect())
        .collect();
    for (a, b) in sketches.iter().tuple_combinations() {
        let mut ab = a.clone();
        ab.merge(b);
        let mut ba = b.clone();
        ba.merge(a);
        assert_eq!(ab, ba);
    }
}

#[test]
fn entries_feed_sketches_without_being_consumed() {
    let mut entry = Entry::new();
    entry.add_bytes(b"chunk one ");
    entry.add_bytes(b"chunk two");

    let mut a = Sketch::new();
    a.add_entry(&entry);
    let mut b = Sketch::new();
    b.add_bytes(b"chunk one chunk two");
    assert_eq!(a, b);

    // A fork extends the stream independently.
    let mut longer = entry.fork();
    longer.add_bytes(b" chunk three");
    a.add_entry(&longer);
    assert_eq!(a.len(), 2);
    // The original entry was never disturbed.
    b.add_entry(&entry);
    assert_ne!(a, b);
    assert_eq!(b.len(), 1);
}
