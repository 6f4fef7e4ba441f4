//! Random payload generation.
//!
//! [`PayloadGenerator::generate`] draws a variant index from
//! `[0, variant_count)` and builds the matching [`Value`]. The generator holds
//! only the profile's shape parameters; all entropy comes from the caller's
//! [`RandomSource`], so two generators fed the same seeded source produce
//! the same values.
//!
//! `Int32` payloads reproduce a deliberately biased construction:
//! `i32::MIN + nonneg_below(i32::MAX)`. The result lies in `[i32::MIN, -2]`,
//! so non-negative values are never produced. Payload distributions across
//! benchmark runs depend on this shape; do not "fix" it.

use crate::profile::Profile;
use crate::random::RandomSource;
use crate::value::{CompositePayload, Value, VariantKind};

/// Exclusive upper bound on generated UTF-16 code units (`0xFFFF` is never drawn).
pub const MAX_CODE_UNIT: u16 = u16::MAX;

/// Builds random [`Value`]s in the shape of a [`Profile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadGenerator {
    variant_count: usize,
    blob_len_bound: usize,
    string_len_bound: usize,
    composite_arity: usize,
}

impl PayloadGenerator {
    /// Generator for `profile`.
    #[must_use]
    pub const fn new(profile: &Profile) -> Self {
        Self {
            variant_count: profile.variant_count(),
            blob_len_bound: profile.blob_len_bound(),
            string_len_bound: profile.string_len_bound(),
            composite_arity: profile.composite_arity(),
        }
    }

    /// Number of variant kinds drawn from.
    #[must_use]
    pub const fn variant_count(&self) -> usize {
        self.variant_count
    }

    /// Draw one value.
    pub fn generate<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Value {
        let index = rng.index_below(self.variant_count);
        match VariantKind::from_index(index) {
            Some(kind) => self.generate_kind(kind, rng),
            // variant_count never exceeds VariantKind::ALL.len()
            None => Value::Null,
        }
    }

    /// Build a value of a fixed `kind`, drawing its contents from `rng`.
    pub fn generate_kind<R: RandomSource + ?Sized>(&self, kind: VariantKind, rng: &mut R) -> Value {
        match kind {
            VariantKind::Int32 => Value::Int32(biased_i32(rng)),
            VariantKind::Int64 => Value::Int64(rng.next_i64()),
            VariantKind::Bool => Value::Bool(rng.next_bool()),
            VariantKind::Float32 => Value::Float32(rng.unit_f32()),
            VariantKind::Float64 => Value::Float64(rng.unit_f64()),
            VariantKind::ByteBlob => {
                let len = rng.index_below(self.blob_len_bound);
                let mut bytes = vec![0u8; len];
                rng.fill_random_bytes(&mut bytes);
                Value::ByteBlob(bytes.into())
            }
            VariantKind::Utf16String => {
                let len = rng.index_below(self.string_len_bound);
                let units: Vec<u16> = (0..len).map(|_| rng.code_unit_below(MAX_CODE_UNIT)).collect();
                Value::Utf16String(units.into())
            }
            VariantKind::Composite => {
                // One recursive draw per field, in field order.
                let fields = (0..self.composite_arity).map(|_| self.generate(&mut *rng)).collect();
                Value::composite(CompositePayload::new(fields))
            }
            VariantKind::Null => Value::Null,
        }
    }
}

impl Default for PayloadGenerator {
    fn default() -> Self {
        Self::new(&Profile::SMALL)
    }
}

/// `i32::MIN + nonneg_below(i32::MAX)`, in `[i32::MIN, -2]`.
#[inline]
pub fn biased_i32<R: RandomSource + ?Sized>(rng: &mut R) -> i32 {
    i32::MIN.wrapping_add(rng.nonneg_i32_below(i32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded_rng;

    #[test]
    fn test_small_profile_never_generates_null() {
        let generator = PayloadGenerator::new(&Profile::SMALL);
        let mut rng = seeded_rng(11);
        for _ in 0..5_000 {
            let v = generator.generate(&mut rng);
            assert!(!v.is_null());
            if let Value::Composite(c) = &v {
                assert!(c.fields().iter().all(|f| !f.is_null()));
            }
        }
    }

    #[test]
    fn test_large_profile_generates_every_kind() {
        let generator = PayloadGenerator::new(&Profile::LARGE.with_fixture_size(64));
        let mut rng = seeded_rng(12);
        let mut seen = [false; 9];
        for _ in 0..5_000 {
            seen[generator.generate(&mut rng).kind() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "missing kinds: {seen:?}");
    }

    #[test]
    fn test_int32_bias() {
        let mut rng = seeded_rng(13);
        for _ in 0..10_000 {
            let v = biased_i32(&mut rng);
            assert!(v <= -2, "biased int32 out of range: {v}");
        }
    }

    #[test]
    fn test_length_bounds() {
        let profile = Profile::custom(40);
        let generator = PayloadGenerator::new(&profile);
        let mut rng = seeded_rng(14);
        for _ in 0..2_000 {
            match generator.generate_kind(VariantKind::ByteBlob, &mut rng) {
                Value::ByteBlob(b) => assert!(b.len() < 40),
                other => panic!("expected blob, got {other:?}"),
            }
            match generator.generate_kind(VariantKind::Utf16String, &mut rng) {
                Value::Utf16String(u) => {
                    assert!(u.len() < 10);
                    assert!(u.iter().all(|&c| c < MAX_CODE_UNIT));
                }
                other => panic!("expected string, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_zero_length_bounds_are_valid() {
        let generator = PayloadGenerator::new(&Profile::custom(0));
        let mut rng = seeded_rng(15);
        assert_eq!(
            generator.generate_kind(VariantKind::ByteBlob, &mut rng),
            Value::from(Vec::<u8>::new())
        );
        assert_eq!(
            generator.generate_kind(VariantKind::Utf16String, &mut rng),
            Value::utf16("")
        );
    }

    #[test]
    fn test_composite_arity_follows_profile() {
        let mut rng = seeded_rng(16);
        for (profile, arity) in [(Profile::SMALL, 2), (Profile::LARGE.with_fixture_size(32), 3)] {
            let generator = PayloadGenerator::new(&profile);
            match generator.generate_kind(VariantKind::Composite, &mut rng) {
                Value::Composite(c) => assert_eq!(c.arity(), arity),
                other => panic!("expected composite, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_same_seed_same_values() {
        let generator = PayloadGenerator::default();
        let mut a = seeded_rng(17);
        let mut b = seeded_rng(17);
        for _ in 0..500 {
            assert_eq!(generator.generate(&mut a), generator.generate(&mut b));
        }
    }
}
