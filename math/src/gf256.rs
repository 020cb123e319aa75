use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use arbitrary::{Arbitrary, Unstructured};
use num_traits::{ConstOne, ConstZero, One, Zero};
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use zeroize::DefaultIsZeroes;

use super::error::Gf256Error;

/// Number of field elements.
pub const FIELD_SIZE: usize = 256;

/// Order of the multiplicative group; also the exponent period of the
/// log/antilog tables.
pub const GROUP_ORDER: usize = 255;

/// Element of GF(2^8) with reducing polynomial x^8 + x^4 + x^3 + x + 1.
///
/// Addition and subtraction are both XOR. Multiplication and inversion go
/// through compile-time log/antilog tables over the generator 0x03, so every
/// product is a pair of lookups rather than a data-dependent bit walk.
#[derive(Debug, Copy, Clone, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Gf256(u8);

/// Simplifies constructing [Gf256] elements.
///
/// The type [`Gf256`] must be in scope for this macro to work.
///
/// # Examples
///
/// ```
/// use math::prelude::*;
/// let a = gf!(0x53);
/// assert_eq!(a.value(), 0x53);
/// ```
#[macro_export]
macro_rules! gf {
    ($value:expr) => {
        $crate::gf256::Gf256::from($value)
    };
}

/// Simplifies constructing vectors of [Gf256] elements. See also [`gf!`].
///
/// # Examples
///
/// ```
/// use math::prelude::*;
/// let a = gf_vec![1, 2, 3];
/// let b = vec![gf!(1), gf!(2), gf!(3)];
/// assert_eq!(a, b);
/// ```
#[macro_export]
macro_rules! gf_vec {
    ($b:expr; $n:expr) => {
        vec![$crate::gf256::Gf256::from($b); $n]
    };
    ($($b:expr),* $(,)?) => {
        vec![$($crate::gf256::Gf256::from($b)),*]
    };
}

/// Simplifies constructing arrays of [Gf256] elements. See also [`gf!`].
///
/// # Examples
///
/// ```
/// use math::prelude::*;
/// let a = gf_array![1, 2, 3];
/// let b = [gf!(1), gf!(2), gf!(3)];
/// assert_eq!(a, b);
/// ```
#[macro_export]
macro_rules! gf_array {
    ($b:expr; $n:expr) => {
        [$crate::gf256::Gf256::from($b); $n]
    };
    ($($b:expr),* $(,)?) => {
        [$($crate::gf256::Gf256::from($b)),*]
    };
}

/// Shift-and-reduce product, used only to derive the tables at compile time.
const fn slow_mul(a: u8, b: u8) -> u8 {
    let mut product: u16 = 0;
    let mut a = a as u16;
    let mut b = b as u16;
    while b != 0 {
        if b & 1 == 1 {
            product ^= a;
        }
        a <<= 1;
        if a & 0x100 != 0 {
            a ^= Gf256::REDUCING_POLYNOMIAL;
        }
        b >>= 1;
    }
    product as u8
}

const fn build_antilog() -> [u8; FIELD_SIZE] {
    let mut table = [0u8; FIELD_SIZE];
    let mut x: u8 = 1;
    let mut i = 0;
    while i < GROUP_ORDER {
        table[i] = x;
        x = slow_mul(x, Gf256::GENERATOR);
        i += 1;
    }
    // Alias the wrap-around entry so exponent sums of exactly GROUP_ORDER
    // cannot index garbage.
    table[GROUP_ORDER] = table[0];
    table
}

const fn build_log(antilog: &[u8; FIELD_SIZE]) -> [u8; FIELD_SIZE] {
    let mut table = [0u8; FIELD_SIZE];
    let mut i = 0;
    while i < GROUP_ORDER {
        table[antilog[i] as usize] = i as u8;
        i += 1;
    }
    // log[0] stays 0 and must never be consulted.
    table
}

const ANTILOG: [u8; FIELD_SIZE] = build_antilog();
const LOG: [u8; FIELD_SIZE] = build_log(&ANTILOG);

impl Gf256 {
    /// Irreducible reducing polynomial x^8 + x^4 + x^3 + x + 1.
    pub const REDUCING_POLYNOMIAL: u16 = 0x11b;

    /// Generator of the multiplicative group used for the tables.
    pub const GENERATOR: u8 = 0x03;

    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);

    #[inline]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Multiplicative inverse, or an error for the zero element.
    #[inline]
    pub fn try_inverse(self) -> Result<Self, Gf256Error> {
        if self.0 == 0 {
            return Err(Gf256Error::ZeroInverse);
        }
        let exponent = GROUP_ORDER - LOG[self.0 as usize] as usize;
        Ok(Self(ANTILOG[exponent]))
    }

    /// Multiplicative inverse. Panics on the zero element; callers that can
    /// see attacker-controlled values use [`Self::try_inverse`].
    #[inline]
    pub fn inverse(self) -> Self {
        assert_ne!(
            self,
            Self::ZERO,
            "Attempted to find the multiplicative inverse of zero."
        );
        let exponent = GROUP_ORDER - LOG[self.0 as usize] as usize;
        Self(ANTILOG[exponent])
    }

    /// Exponentiation by iterated multiplication.
    ///
    /// `pow(a, 0)` is one for every `a`, including zero.
    #[must_use]
    pub fn pow(self, exponent: u32) -> Self {
        let mut acc = Self::ONE;
        let mut i = 0;
        while i < exponent {
            acc *= self;
            i += 1;
        }
        acc
    }

    /// Confirm the table derivation: `antilog[log[a]] == a` for every
    /// non-zero `a`, and the wrap-around entry aliases the first.
    pub fn verify_tables() -> bool {
        let mut a = 1usize;
        while a < FIELD_SIZE {
            if ANTILOG[LOG[a] as usize] as usize != a {
                return false;
            }
            a += 1;
        }
        ANTILOG[GROUP_ORDER] == ANTILOG[0]
    }
}

impl fmt::Display for Gf256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:02x}", self.0)
    }
}

impl From<u8> for Gf256 {
    #[inline]
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<Gf256> for u8 {
    #[inline]
    fn from(element: Gf256) -> Self {
        element.0
    }
}

impl DefaultIsZeroes for Gf256 {}

impl<'a> Arbitrary<'a> for Gf256 {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        u.arbitrary().map(Gf256)
    }
}

impl Distribution<Gf256> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Gf256 {
        Gf256(rng.random())
    }
}

impl Zero for Gf256 {
    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }
}

impl ConstZero for Gf256 {
    const ZERO: Self = Self::ZERO;
}

impl One for Gf256 {
    #[inline]
    fn one() -> Self {
        Self::ONE
    }

    #[inline]
    fn is_one(&self) -> bool {
        self == &Self::ONE
    }
}

impl ConstOne for Gf256 {
    const ONE: Self = Self::ONE;
}

impl Add for Gf256 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl AddAssign for Gf256 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs
    }
}

impl Sub for Gf256 {
    type Output = Self;

    // Subtraction coincides with addition in characteristic 2.
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl SubAssign for Gf256 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs
    }
}

impl Mul for Gf256 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        if self.0 == 0 || rhs.0 == 0 {
            return Self::ZERO;
        }
        let exponent =
            (LOG[self.0 as usize] as usize + LOG[rhs.0 as usize] as usize) % GROUP_ORDER;
        Self(ANTILOG[exponent])
    }
}

impl MulAssign for Gf256 {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Neg for Gf256 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self
    }
}

impl Div for Gf256 {
    type Output = Self;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn div(self, other: Self) -> Self {
        other.inverse() * self
    }
}
