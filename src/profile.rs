//! Configuration profiles.
//!
//! A [`Profile`] fixes the fixture size, the number of variant kinds the
//! generator draws from, the UTF-16 string length bound and the composite
//! arity. Two profiles are canonical:
//!
//! | Profile | Fixture size | Variants | String bound | Composite arity |
//! |---------|--------------|----------|--------------|-----------------|
//! | `small` | 1,000        | 8        | `N / 4`      | 2               |
//! | `large` | 64,000       | 9 (+Null)| `N`          | 3               |
//!
//! Blob lengths are always bounded by the fixture size.

use std::env;
use std::fmt as StdFmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::value::VariantKind;

/// Environment variable selecting the profile (`small` | `large`).
pub const PROFILE_ENV: &str = "MAPBENCH_PROFILE";

/// Environment variable overriding the fixture size.
pub const FIXTURE_SIZE_ENV: &str = "MAPBENCH_FIXTURE_SIZE";

/// Largest accepted fixture size. Indices are drawn as non-negative `i32`s.
pub const MAX_FIXTURE_SIZE: usize = i32::MAX as usize;

/// Fixed workload shape for one family of trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    name: &'static str,
    fixture_size: usize,
    variant_count: usize,
    string_len_bound: usize,
    /// `N / divisor` string bound kept across resizes; `None` pins the bound.
    string_len_divisor: Option<usize>,
    composite_arity: usize,
}

impl Profile {
    /// 1,000 entries, 8 variant kinds (no `Null`), strings up to `N / 4`, pairs.
    pub const SMALL: Self = Self {
        name: "small",
        fixture_size: 1_000,
        variant_count: VariantKind::WITHOUT_NULL,
        string_len_bound: 1_000 / 4,
        string_len_divisor: Some(4),
        composite_arity: 2,
    };

    /// 64,000 entries, 9 variant kinds (with `Null`), strings up to `N`, triples.
    pub const LARGE: Self = Self {
        name: "large",
        fixture_size: 64_000,
        variant_count: VariantKind::WITH_NULL,
        string_len_bound: 64_000,
        string_len_divisor: Some(1),
        composite_arity: 3,
    };

    /// Both canonical profiles.
    pub const ALL: [Self; 2] = [Self::SMALL, Self::LARGE];

    /// Ad-hoc profile with the small profile's shape scaled to `fixture_size`.
    ///
    /// # Panics
    /// Panics if `fixture_size` exceeds [`MAX_FIXTURE_SIZE`].
    #[must_use]
    pub const fn custom(fixture_size: usize) -> Self {
        assert!(fixture_size <= MAX_FIXTURE_SIZE, "fixture size exceeds i32 index range");
        Self {
            name: "custom",
            fixture_size,
            variant_count: VariantKind::WITHOUT_NULL,
            string_len_bound: fixture_size / 4,
            string_len_divisor: Some(4),
            composite_arity: 2,
        }
    }

    /// Replace the fixture size, rescaling the string bound proportionally.
    ///
    /// A bound set with [`Profile::with_string_len_bound`] is left as is.
    ///
    /// # Panics
    /// Panics if `fixture_size` exceeds [`MAX_FIXTURE_SIZE`].
    #[must_use]
    pub const fn with_fixture_size(mut self, fixture_size: usize) -> Self {
        assert!(fixture_size <= MAX_FIXTURE_SIZE, "fixture size exceeds i32 index range");
        self.fixture_size = fixture_size;
        if let Some(divisor) = self.string_len_divisor {
            self.string_len_bound = fixture_size / divisor;
        }
        self
    }

    /// Include or exclude the `Null` variant.
    #[must_use]
    pub const fn with_null(mut self, include_null: bool) -> Self {
        self.variant_count = if include_null {
            VariantKind::WITH_NULL
        } else {
            VariantKind::WITHOUT_NULL
        };
        self
    }

    /// Pin the UTF-16 string length bound. Later resizes keep it.
    #[must_use]
    pub const fn with_string_len_bound(mut self, bound: usize) -> Self {
        self.string_len_bound = bound;
        self.string_len_divisor = None;
        self
    }

    /// Set the composite arity (clamped to 2..=3).
    #[must_use]
    pub const fn with_composite_arity(mut self, arity: usize) -> Self {
        self.composite_arity = if arity < 2 {
            2
        } else if arity > 3 {
            3
        } else {
            arity
        };
        self
    }

    /// Profile name (`small`, `large` or `custom`).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of fixture entries (`N`).
    #[must_use]
    pub const fn fixture_size(&self) -> usize {
        self.fixture_size
    }

    /// Number of variant kinds drawn from (`K`).
    #[must_use]
    pub const fn variant_count(&self) -> usize {
        self.variant_count
    }

    /// Whether `Null` values can be generated.
    #[must_use]
    pub const fn includes_null(&self) -> bool {
        self.variant_count == VariantKind::WITH_NULL
    }

    /// Exclusive upper bound on byte-blob length.
    #[must_use]
    pub const fn blob_len_bound(&self) -> usize {
        self.fixture_size
    }

    /// Exclusive upper bound on UTF-16 string length.
    #[must_use]
    pub const fn string_len_bound(&self) -> usize {
        self.string_len_bound
    }

    /// Fields per composite record.
    #[must_use]
    pub const fn composite_arity(&self) -> usize {
        self.composite_arity
    }

    /// Resolve the profile from [`PROFILE_ENV`] and [`FIXTURE_SIZE_ENV`].
    ///
    /// Defaults to [`Profile::SMALL`] when unset.
    ///
    /// # Errors
    /// Returns [`ConfigError`] for an unknown profile name or a malformed size.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve the profile from variables supplied by `lookup`.
    ///
    /// # Errors
    /// Same as [`Profile::from_env`]. A set but malformed variable is an
    /// error, never a fallback to the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut profile = match lookup(PROFILE_ENV) {
            Some(name) => name.parse()?,
            None => Self::SMALL,
        };

        if let Some(raw) = lookup(FIXTURE_SIZE_ENV) {
            profile = profile.with_fixture_size(parse_fixture_size(&raw)?);
        }

        Ok(profile)
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::SMALL
    }
}

impl FromStr for Profile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(Self::SMALL),
            "large" => Ok(Self::LARGE),
            _ => Err(ConfigError::UnknownProfile(s.to_string())),
        }
    }
}

impl StdFmt::Display for Profile {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        write!(
            f,
            "{} (N={}, K={}, strings<{}, arity={})",
            self.name, self.fixture_size, self.variant_count, self.string_len_bound, self.composite_arity
        )
    }
}

/// Parse a fixture-size override.
///
/// # Errors
/// Returns [`ConfigError::InvalidFixtureSize`] if `raw` is not an integer in
/// `0..=MAX_FIXTURE_SIZE`.
pub fn parse_fixture_size(raw: &str) -> Result<usize, ConfigError> {
    let size: usize = raw
        .trim()
        .replace('_', "")
        .parse()
        .map_err(|_| ConfigError::InvalidFixtureSize(raw.to_string()))?;

    if size > MAX_FIXTURE_SIZE {
        return Err(ConfigError::InvalidFixtureSize(raw.to_string()));
    }

    Ok(size)
}
