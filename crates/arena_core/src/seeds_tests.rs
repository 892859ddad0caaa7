use super::*;

#[test]
fn test_generate_count_and_range() {
    let range = SeedRange::new(5, 9).unwrap();
    let mut generator = SeedSequenceGenerator::with_seed(range, Some(1)).unwrap();

    let seeds = generator.generate(200);

    assert_eq!(seeds.len(), 200);
    for seed in seeds.iter() {
        assert!((5..=9).contains(&seed.nonce), "nonce {} out of range", seed.nonce);
        assert!((5..=9).contains(&seed.key), "key {} out of range", seed.key);
    }
}

#[test]
fn test_generate_zero_is_empty() {
    let mut generator = SeedSequenceGenerator::with_seed(SeedRange::default(), Some(1)).unwrap();
    assert!(generator.generate(0).is_empty());
}

#[test]
fn test_same_seed_reproduces_sequence() {
    let mut a = SeedSequenceGenerator::with_seed(SeedRange::default(), Some(42)).unwrap();
    let mut b = SeedSequenceGenerator::with_seed(SeedRange::default(), Some(42)).unwrap();

    assert_eq!(a.generate(16), b.generate(16));
    assert_eq!(a.generate(3), b.generate(3));
}

#[test]
fn test_single_value_range_allows_duplicates() {
    let range = SeedRange::new(7, 7).unwrap();
    let mut generator = SeedSequenceGenerator::with_seed(range, None).unwrap();

    let seeds = generator.generate(4);

    assert!(seeds.iter().all(|s| *s == Seed::new(7, 7)));
}

#[test]
fn test_default_range() {
    let range = SeedRange::default();
    assert_eq!(range.low, 1);
    assert_eq!(range.high, 100_000);
}

#[test]
fn test_invalid_ranges_rejected() {
    assert!(matches!(SeedRange::new(0, 10), Err(MatchError::Config(_))));
    assert!(matches!(SeedRange::new(10, 9), Err(MatchError::Config(_))));

    let bad = SeedRange { low: 3, high: 2 };
    assert!(SeedSequenceGenerator::with_seed(bad, Some(1)).is_err());
}
