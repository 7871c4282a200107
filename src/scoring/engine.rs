use rand::Rng;

/// Points per cleared level
pub const POINTS_PER_LEVEL: u32 = 10;

/// Lowest reported memory IQ
pub const IQ_MIN: f64 = 80.0;
/// Highest reported memory IQ
pub const IQ_MAX: f64 = 150.0;
/// Maximum random swing applied to the IQ base
pub const IQ_JITTER: f64 = 5.0;

/// Points awarded for clearing `level`
#[inline]
pub fn level_points(level: u32) -> u32 {
    level.saturating_mul(POINTS_PER_LEVEL)
}

/// Memory IQ for display: `90 + 3·level + score/20`, jittered by up to ±5
/// and clamped to `[80, 150]`.
pub fn estimate_iq<R: Rng + ?Sized>(level: u32, score: u32, rng: &mut R) -> u32 {
    let base = 90.0 + f64::from(level) * 3.0 + f64::from(score) / 20.0;
    let jitter = rng.gen_range(-IQ_JITTER..=IQ_JITTER);
    (base + jitter).clamp(IQ_MIN, IQ_MAX).round() as u32
}
