/// Asserts that two floats are within `eps` of each other.
#[macro_export]
macro_rules! assert_close {
    ($actual:expr, $expected:expr) => {
        $crate::assert_close!($actual, $expected, 1e-6)
    };
    ($actual:expr, $expected:expr, $eps:expr) => {{
        let (actual, expected) = ($actual, $expected);
        assert!(
            (actual - expected).abs() <= $eps,
            "{} = {} is not within {} of {}",
            stringify!($actual),
            actual,
            $eps,
            expected
        );
    }};
}

/// Asserts that the committed buffers of two simulations are bit-identical.
#[macro_export]
macro_rules! assert_same_field {
    ($a:expr, $b:expr) => {
        let (a, b) = ($a.current(), $b.current());
        assert_eq!(a.len(), b.len(), "Lattice sizes differ");
        if let Some(i) = (0..a.len()).find(|&i| a[i] != b[i]) {
            panic!("Fields diverge at cell {}: {:?} vs {:?}", i, a[i], b[i]);
        }
    };
}

/// Asserts that every cell of the committed buffer holds finite values.
#[macro_export]
macro_rules! assert_field_finite {
    ($sim:expr) => {
        let summary = $sim.summary();
        assert!(summary.is_finite(), "Non-finite field: {:?}", summary);
    };
}
