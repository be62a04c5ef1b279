use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn unit_interval_is_half_open() {
    let mut rng = Rng64::new(7);
    for _ in 0..1000 {
        let v = rng.next_f64_01();
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn next_index_stays_in_range() {
    let mut rng = Rng64::new(99);
    assert_eq!(rng.next_index(0), 0);
    for _ in 0..500 {
        assert!(rng.next_index(5) < 5);
    }
}

#[test]
fn forks_diverge_by_key() {
    let mut a = Rng64::fork(1, 1);
    let mut b = Rng64::fork(1, 2);
    assert_ne!(a.next_u64(), b.next_u64());
}
