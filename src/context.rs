//! Per-trial workload fixtures.
//!
//! A [`WorkloadContext`] owns three co-indexed arrays (keys, primary values,
//! secondary values) and the trial's random source. Fixtures are generated once
//! at setup and are read-only afterwards; sequences borrow them through
//! [`WorkloadContext::split`], which also hands out the random source the Get
//! sequence draws lookup indices from.

use rand::rngs::StdRng;

use crate::generator::PayloadGenerator;
use crate::profile::Profile;
use crate::random::{RandomSource, seeded_rng, trial_rng};
use crate::tracing_helpers::{debug_log, info_log};
use crate::value::{Key, Value, VariantKind};

// ============================================================================
//  Fixtures
// ============================================================================

/// The co-indexed key/value arrays of one trial.
///
/// `keys[i]` pairs with `primary[i]` and `secondary[i]`. `keys` is always
/// exactly `0..len` in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fixtures {
    keys: Box<[Key]>,
    primary: Box<[Value]>,
    secondary: Box<[Value]>,
}

impl Fixtures {
    /// Fill `len` slots: `keys[i] = i`, then one primary and one secondary
    /// draw per slot, in ascending slot order.
    pub fn generate<R: RandomSource + ?Sized>(
        len: usize,
        generator: &PayloadGenerator,
        rng: &mut R,
    ) -> Self {
        let mut keys = Vec::with_capacity(len);
        let mut primary = Vec::with_capacity(len);
        let mut secondary = Vec::with_capacity(len);

        for i in 0..len {
            keys.push(key_for_index(i));
            primary.push(generator.generate(rng));
            secondary.push(generator.generate(rng));
        }

        Self {
            keys: keys.into_boxed_slice(),
            primary: primary.into_boxed_slice(),
            secondary: secondary.into_boxed_slice(),
        }
    }

    /// Build fixtures from explicit value columns. Keys are `0..primary.len()`.
    ///
    /// # Panics
    /// Panics if the two columns differ in length.
    #[must_use]
    pub fn from_values(primary: Vec<Value>, secondary: Vec<Value>) -> Self {
        assert_eq!(
            primary.len(),
            secondary.len(),
            "primary and secondary columns must be co-indexed"
        );
        let keys = (0..primary.len()).map(key_for_index).collect();
        Self {
            keys,
            primary: primary.into_boxed_slice(),
            secondary: secondary.into_boxed_slice(),
        }
    }

    /// Fixture keys, `0..len` ascending.
    #[must_use]
    #[inline]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Initial contents, co-indexed with [`keys`](Self::keys).
    #[must_use]
    #[inline]
    pub fn primary(&self) -> &[Value] {
        &self.primary
    }

    /// Replacement contents, co-indexed with [`keys`](Self::keys).
    #[must_use]
    #[inline]
    pub fn secondary(&self) -> &[Value] {
        &self.secondary
    }

    /// Number of slots (`N`).
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True when there are no slots.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// `(key, primary)` pairs in ascending key order.
    pub fn primary_entries(&self) -> impl Iterator<Item = (Key, &Value)> {
        self.keys.iter().copied().zip(self.primary.iter())
    }

    /// `(key, secondary)` pairs in ascending key order.
    pub fn secondary_entries(&self) -> impl Iterator<Item = (Key, &Value)> {
        self.keys.iter().copied().zip(self.secondary.iter())
    }

    /// Count of each variant kind across both value columns, indexed by
    /// `VariantKind as usize`. Composite fields are not descended into.
    #[must_use]
    pub fn kind_histogram(&self) -> [usize; VariantKind::ALL.len()] {
        let mut counts = [0usize; VariantKind::ALL.len()];
        for value in self.primary.iter().chain(self.secondary.iter()) {
            if let Some(slot) = counts.get_mut(value.kind() as usize) {
                *slot += 1;
            }
        }
        counts
    }
}

#[expect(clippy::cast_possible_wrap, reason = "fixture sizes are capped at i32::MAX")]
#[inline]
const fn key_for_index(i: usize) -> Key {
    i as Key
}

// ============================================================================
//  WorkloadContext
// ============================================================================

/// Fixtures plus random source for one trial.
///
/// Created by [`setup`](Self::setup) before the first measured iteration and
/// consumed by [`teardown`](Self::teardown) after the last. Neither hook is
/// part of a measurement.
#[derive(Debug)]
pub struct WorkloadContext<R = StdRng> {
    profile: Profile,
    fixtures: Fixtures,
    rng: R,
}

impl WorkloadContext<StdRng> {
    /// Generate a trial's fixtures with a fresh OS-seeded random source.
    #[must_use]
    pub fn setup(profile: Profile) -> Self {
        Self::setup_with_rng(profile, trial_rng())
    }

    /// Generate a trial's fixtures from a fixed seed (tests, replays).
    #[must_use]
    pub fn setup_seeded(profile: Profile, seed: u64) -> Self {
        Self::setup_with_rng(profile, seeded_rng(seed))
    }
}

impl<R: RandomSource> WorkloadContext<R> {
    /// Generate fixtures from `rng` and keep it for in-trial draws.
    pub fn setup_with_rng(profile: Profile, mut rng: R) -> Self {
        let generator = PayloadGenerator::new(&profile);
        let fixtures = Fixtures::generate(profile.fixture_size(), &generator, &mut rng);

        debug_log!(
            profile = profile.name(),
            fixture_size = fixtures.len(),
            kinds = ?fixtures.kind_histogram(),
            "workload context set up"
        );

        Self {
            profile,
            fixtures,
            rng,
        }
    }

    /// Wrap prepared fixtures (tests with hand-picked values).
    pub fn from_fixtures(profile: Profile, fixtures: Fixtures, rng: R) -> Self {
        Self {
            profile,
            fixtures,
            rng,
        }
    }

    /// The profile the fixtures were generated for.
    #[must_use]
    pub const fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Read-only fixtures.
    #[must_use]
    #[inline]
    pub const fn fixtures(&self) -> &Fixtures {
        &self.fixtures
    }

    /// Fixtures together with the trial's random source.
    #[inline]
    pub fn split(&mut self) -> (&Fixtures, &mut R) {
        (&self.fixtures, &mut self.rng)
    }

    /// Number of fixture slots.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    /// True when the fixtures are empty.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }

    /// Release the fixtures and the random source.
    pub fn teardown(self) {
        info_log!(
            profile = self.profile.name(),
            fixture_size = self.fixtures.len(),
            "workload context torn down"
        );
        drop(self);
    }
}
