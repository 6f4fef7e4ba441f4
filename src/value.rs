//! Payload values stored in the maps under test.
//!
//! [`Value`] is a closed sum type over every payload kind the generator can
//! produce. Heap payloads are reference counted, so handing a value to a
//! backend is a pointer copy regardless of the variant. That keeps the
//! per-insert cost identical across kinds and across backends.
//!
//! Equality and hashing are structural. Floats compare by bit pattern, which
//! makes `Value` a lawful `Eq + Hash` (`NaN == NaN`, `0.0 != -0.0`).

use std::fmt as StdFmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Map key type. Fixture keys are dense in `0..N`.
pub type Key = i64;

// ============================================================================
//  VariantKind
// ============================================================================

/// Tag of a [`Value`] variant.
///
/// The discriminant order is the generator's dispatch order: a draw of `k`
/// from `[0, variant_count)` produces `VariantKind::ALL[k]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VariantKind {
    /// 32-bit signed integer.
    Int32 = 0,
    /// 64-bit signed integer.
    Int64 = 1,
    /// Boolean.
    Bool = 2,
    /// Single-precision float in `[0, 1)`.
    Float32 = 3,
    /// Double-precision float in `[0, 1)`.
    Float64 = 4,
    /// Random byte blob.
    ByteBlob = 5,
    /// Random UTF-16 code-unit string.
    Utf16String = 6,
    /// Nested structural record.
    Composite = 7,
    /// No value.
    Null = 8,
}

impl VariantKind {
    /// Every kind, in dispatch order.
    pub const ALL: [Self; 9] = [
        Self::Int32,
        Self::Int64,
        Self::Bool,
        Self::Float32,
        Self::Float64,
        Self::ByteBlob,
        Self::Utf16String,
        Self::Composite,
        Self::Null,
    ];

    /// Number of kinds when `Null` is excluded.
    pub const WITHOUT_NULL: usize = 8;

    /// Number of kinds when `Null` is included.
    pub const WITH_NULL: usize = 9;

    /// Look up the kind for a dispatch index.
    #[must_use]
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::ALL.len() {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Short lowercase name, used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Bool => "bool",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::ByteBlob => "byte_blob",
            Self::Utf16String => "utf16_string",
            Self::Composite => "composite",
            Self::Null => "null",
        }
    }
}

impl StdFmt::Display for VariantKind {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
//  Value
// ============================================================================

/// A heterogeneous payload.
#[derive(Clone, Default)]
pub enum Value {
    /// 32-bit signed integer.
    Int32(i32),
    /// 64-bit signed integer.
    Int64(i64),
    /// Boolean.
    Bool(bool),
    /// Single-precision float.
    Float32(f32),
    /// Double-precision float.
    Float64(f64),
    /// Byte blob.
    ByteBlob(Arc<[u8]>),
    /// UTF-16 code units. Unpaired surrogates are allowed.
    Utf16String(Arc<[u16]>),
    /// Nested structural record.
    Composite(Arc<CompositePayload>),
    /// No value.
    #[default]
    Null,
}

impl Value {
    /// The variant tag.
    #[must_use]
    #[inline]
    pub const fn kind(&self) -> VariantKind {
        match self {
            Self::Int32(_) => VariantKind::Int32,
            Self::Int64(_) => VariantKind::Int64,
            Self::Bool(_) => VariantKind::Bool,
            Self::Float32(_) => VariantKind::Float32,
            Self::Float64(_) => VariantKind::Float64,
            Self::ByteBlob(_) => VariantKind::ByteBlob,
            Self::Utf16String(_) => VariantKind::Utf16String,
            Self::Composite(_) => VariantKind::Composite,
            Self::Null => VariantKind::Null,
        }
    }

    /// Check if this is the `Null` variant.
    #[must_use]
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Wrap a composite record.
    #[must_use]
    pub fn composite(payload: CompositePayload) -> Self {
        Self::Composite(Arc::new(payload))
    }

    /// Build a `Utf16String` from Rust text.
    #[must_use]
    pub fn utf16(text: &str) -> Self {
        Self::Utf16String(text.encode_utf16().collect())
    }

    /// Structural 32-bit hash code.
    ///
    /// Stable across runs and platforms. Composite records fold their fields'
    /// codes with `31 * h + field`, so this is what nested composites combine.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    pub fn hash_code(&self) -> i32 {
        match self {
            Self::Int32(v) => *v,
            Self::Int64(v) => (v ^ ((*v as u64) >> 32) as i64) as i32,
            Self::Bool(v) => {
                if *v {
                    1231
                } else {
                    1237
                }
            }
            Self::Float32(v) => v.to_bits() as i32,
            Self::Float64(v) => {
                let bits = v.to_bits();
                (bits ^ (bits >> 32)) as i32
            }
            Self::ByteBlob(bytes) => bytes
                .iter()
                .fold(1i32, |h, &b| h.wrapping_mul(31).wrapping_add(i32::from(b as i8))),
            Self::Utf16String(units) => units
                .iter()
                .fold(0i32, |h, &u| h.wrapping_mul(31).wrapping_add(i32::from(u))),
            Self::Composite(c) => c.hash_code(),
            Self::Null => 0,
        }
    }

    /// Approximate heap bytes owned by this value (shared buffers counted once per holder).
    #[must_use]
    pub fn payload_bytes(&self) -> usize {
        match self {
            Self::ByteBlob(bytes) => bytes.len(),
            Self::Utf16String(units) => units.len() * 2,
            Self::Composite(c) => c.fields().iter().map(Self::payload_bytes).sum(),
            _ => 0,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int32(a), Self::Int32(b)) => a == b,
            (Self::Int64(a), Self::Int64(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Float32(a), Self::Float32(b)) => a.to_bits() == b.to_bits(),
            (Self::Float64(a), Self::Float64(b)) => a.to_bits() == b.to_bits(),
            (Self::ByteBlob(a), Self::ByteBlob(b)) => a == b,
            (Self::Utf16String(a), Self::Utf16String(b)) => a == b,
            (Self::Composite(a), Self::Composite(b)) => Arc::ptr_eq(a, b) || a == b,
            (Self::Null, Self::Null) => true,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.kind() as u8);
        state.write_i32(self.hash_code());
    }
}

impl StdFmt::Debug for Value {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        match self {
            Self::Int32(v) => write!(f, "Int32({v})"),
            Self::Int64(v) => write!(f, "Int64({v})"),
            Self::Bool(v) => write!(f, "Bool({v})"),
            Self::Float32(v) => write!(f, "Float32({v})"),
            Self::Float64(v) => write!(f, "Float64({v})"),
            // Blobs can be thousands of bytes; print shape, not contents.
            Self::ByteBlob(b) => write!(f, "ByteBlob(len={}, hash={:#x})", b.len(), self.hash_code()),
            Self::Utf16String(u) => {
                write!(f, "Utf16String(len={}, hash={:#x})", u.len(), self.hash_code())
            }
            Self::Composite(c) => f.debug_tuple("Composite").field(&c.fields()).finish(),
            Self::Null => f.write_str("Null"),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::ByteBlob(v.into())
    }
}

impl From<CompositePayload> for Value {
    fn from(v: CompositePayload) -> Self {
        Self::composite(v)
    }
}

// ============================================================================
//  CompositePayload
// ============================================================================

/// A 2- or 3-field record whose identity is derived from its fields.
///
/// An absent field is represented by [`Value::Null`] and contributes 0 to the
/// hash. No ordering is defined.
#[derive(Clone, Debug)]
pub struct CompositePayload {
    fields: Box<[Value]>,
}

impl CompositePayload {
    /// Build a record from its fields, in order.
    #[must_use]
    pub fn new(fields: Vec<Value>) -> Self {
        Self {
            fields: fields.into_boxed_slice(),
        }
    }

    /// The fields, in order.
    #[must_use]
    #[inline]
    pub fn fields(&self) -> &[Value] {
        &self.fields
    }

    /// Number of fields.
    #[must_use]
    #[inline]
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Structural hash: `hash = 31 * hash + field_hash`, folded from 0.
    #[must_use]
    pub fn hash_code(&self) -> i32 {
        self.fields
            .iter()
            .fold(0i32, |h, field| h.wrapping_mul(31).wrapping_add(field.hash_code()))
    }
}

impl PartialEq for CompositePayload {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len()
            && self.fields.iter().zip(other.fields.iter()).all(|(a, b)| a == b)
    }
}

impl Eq for CompositePayload {}

impl Hash for CompositePayload {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

// ============================================================================
//  Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: Value, b: Value) -> CompositePayload {
        CompositePayload::new(vec![a, b])
    }

    #[test]
    fn test_composite_hash_is_polynomial_over_fields() {
        let c = pair(Value::Int32(7), Value::Int32(11));
        assert_eq!(c.hash_code(), 31 * 7 + 11);

        let c = CompositePayload::new(vec![Value::Int32(1), Value::Int32(2), Value::Int32(3)]);
        assert_eq!(c.hash_code(), (31 + 2) * 31 + 3);
    }

    #[test]
    fn test_composite_null_field_hashes_to_zero() {
        let c = pair(Value::Null, Value::Int32(5));
        assert_eq!(c.hash_code(), 5);

        let c = pair(Value::Null, Value::Null);
        assert_eq!(c.hash_code(), 0);
    }

    #[test]
    fn test_composite_equality_is_structural() {
        let a = pair(Value::utf16("abc"), Value::Null);
        let b = pair(Value::utf16("abc"), Value::Null);
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());

        let c = pair(Value::utf16("abd"), Value::Null);
        assert_ne!(a, c);

        let d = pair(Value::utf16("abc"), Value::Int32(0));
        assert_ne!(a, d);
    }

    #[test]
    fn test_composite_arity_mismatch_is_unequal() {
        let two = pair(Value::Int32(1), Value::Int32(2));
        let three = CompositePayload::new(vec![Value::Int32(1), Value::Int32(2), Value::Null]);
        assert_ne!(two, three);
    }

    #[test]
    fn test_float_equality_uses_bits() {
        assert_eq!(Value::Float64(f64::NAN), Value::Float64(f64::NAN));
        assert_ne!(Value::Float32(0.0), Value::Float32(-0.0));
        assert_eq!(Value::Float32(0.25), Value::Float32(0.25));
    }

    #[test]
    fn test_variants_never_cross_compare() {
        assert_ne!(Value::Int32(1), Value::Int64(1));
        assert_ne!(Value::Float32(1.0), Value::Float64(1.0));
        assert_ne!(Value::Null, Value::Int32(0));
    }

    #[test]
    fn test_leaf_hash_codes() {
        assert_eq!(Value::Int32(-42).hash_code(), -42);
        assert_eq!(Value::Int64(1 << 32).hash_code(), 1);
        assert_eq!(Value::Bool(true).hash_code(), 1231);
        assert_eq!(Value::Bool(false).hash_code(), 1237);
        assert_eq!(Value::Null.hash_code(), 0);
        assert_eq!(Value::utf16("a").hash_code(), 97);
        assert_eq!(Value::utf16("ab").hash_code(), 97 * 31 + 98);
        assert_eq!(Value::from(Vec::<u8>::new()).hash_code(), 1);
    }

    #[test]
    fn test_nested_composite_hash() {
        let inner = pair(Value::Int32(2), Value::Int32(3));
        let outer = pair(Value::Int32(1), Value::composite(inner.clone()));
        assert_eq!(outer.hash_code(), 31 + inner.hash_code());
    }

    #[test]
    fn test_kind_round_trips_dispatch_index() {
        for (i, kind) in VariantKind::ALL.iter().enumerate() {
            assert_eq!(VariantKind::from_index(i), Some(*kind));
            assert_eq!(*kind as usize, i);
        }
        assert_eq!(VariantKind::from_index(9), None);
    }

    #[test]
    fn test_payload_bytes() {
        let v = Value::composite(pair(Value::from(vec![0u8; 10]), Value::utf16("hey")));
        assert_eq!(v.payload_bytes(), 16);
        assert_eq!(Value::Int64(3).payload_bytes(), 0);
    }

    #[test]
    fn test_debug_composite_lists_fields() {
        let v = Value::composite(pair(Value::Int32(1), Value::Null));
        assert_eq!(format!("{v:?}"), "Composite([Int32(1), Null])");
    }

    #[test]
    fn test_debug_does_not_dump_blob() {
        let v = Value::from(vec![7u8; 512]);
        let s = format!("{v:?}");
        assert!(s.starts_with("ByteBlob(len=512"));
    }
}
