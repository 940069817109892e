//! Ordinates of the first nontrivial zeta zeros used as the comparison target.

/// First twenty ordinates `gamma_n`; the first ten to six decimals, the rest
/// to three.
pub const REFERENCE_ZETA_ORDINATES: [f64; 20] = [
    14.134_725, 21.022_040, 25.010_857, 30.424_876, 32.935_062, 37.586_178, 40.918_719,
    43.327_073, 48.005_150, 49.773_832, 52.970, 56.446, 59.347, 60.831, 65.112, 67.079, 69.546,
    72.067, 75.704, 77.144,
];

/// The leading `count` reference ordinates, or all twenty when `count` is larger.
pub fn reference_ordinates(count: usize) -> &'static [f64] {
    &REFERENCE_ZETA_ORDINATES[..count.min(REFERENCE_ZETA_ORDINATES.len())]
}
