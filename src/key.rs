//! PrimitiveKey: hashing, equality and total order for unboxed keys.

use core::cmp::Ordering;
use core::fmt::Debug;

/// A key type the map can store without boxing.
///
/// Implementations must keep `key_cmp` a total order whose `Equal` is the
/// only notion of key equality; tree buckets rely on it to stay well formed
/// when several keys share a hash.
pub trait PrimitiveKey: Copy + Debug {
    /// Base hash before the map spreads the high bits into the low bits.
    fn hash_code(&self) -> u32;

    fn key_cmp(&self, other: &Self) -> Ordering;

    #[inline]
    fn key_eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}

macro_rules! widening_key {
    ($($t:ty => $via:ty),* $(,)?) => {
        $(
            impl PrimitiveKey for $t {
                #[inline]
                fn hash_code(&self) -> u32 {
                    *self as $via as u32
                }
                #[inline]
                fn key_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

// Sign extension for signed types matches the 32-bit widening of the value.
widening_key!(i8 => i32, u8 => u32, i16 => i32, u16 => u32, i32 => i32, u32 => u32);

#[inline]
fn fold64(bits: u64) -> u32 {
    (bits ^ (bits >> 32)) as u32
}

impl PrimitiveKey for i64 {
    #[inline]
    fn hash_code(&self) -> u32 {
        fold64(*self as u64)
    }
    #[inline]
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl PrimitiveKey for u64 {
    #[inline]
    fn hash_code(&self) -> u32 {
        fold64(*self)
    }
    #[inline]
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl PrimitiveKey for char {
    #[inline]
    fn hash_code(&self) -> u32 {
        *self as u32
    }
    #[inline]
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl PrimitiveKey for bool {
    #[inline]
    fn hash_code(&self) -> u32 {
        if *self {
            1231
        } else {
            1237
        }
    }
    #[inline]
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

const CANONICAL_NAN_F32: u32 = 0x7fc0_0000;
const CANONICAL_NAN_F64: u64 = 0x7ff8_0000_0000_0000;

#[inline]
fn canonical_f32(v: f32) -> f32 {
    if v.is_nan() {
        f32::from_bits(CANONICAL_NAN_F32)
    } else {
        v
    }
}

#[inline]
fn canonical_f64(v: f64) -> f64 {
    if v.is_nan() {
        f64::from_bits(CANONICAL_NAN_F64)
    } else {
        v
    }
}

// Floats compare by canonical bit pattern: every NaN is one key and
// `0.0` and `-0.0` are distinct keys.
impl PrimitiveKey for f32 {
    #[inline]
    fn hash_code(&self) -> u32 {
        canonical_f32(*self).to_bits()
    }
    #[inline]
    fn key_cmp(&self, other: &Self) -> Ordering {
        canonical_f32(*self).total_cmp(&canonical_f32(*other))
    }
}

impl PrimitiveKey for f64 {
    #[inline]
    fn hash_code(&self) -> u32 {
        fold64(canonical_f64(*self).to_bits())
    }
    #[inline]
    fn key_cmp(&self, other: &Self) -> Ordering {
        canonical_f64(*self).total_cmp(&canonical_f64(*other))
    }
}
