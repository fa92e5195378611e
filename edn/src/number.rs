//! Dynamically typed number type.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;

/// Represents an EDN number: a machine integer, an arbitrary-precision
/// integer, a floating point number or an exact ratio.
///
/// Numbers of different kinds never compare equal, even if they denote the
/// same quantity: `1`, `1N`, `1.0` and `1/1` are four distinct values. Within
/// a kind, floats are compared using [`f64::total_cmp`], so that numbers can
/// be used as keys of maps and elements of sets.
#[derive(Clone)]
pub struct Number {
    n: N,
}

#[derive(Debug, Clone)]
enum N {
    Int(i64),
    BigInt(BigInt),
    Float(f64),
    Ratio(BigRational),
}

impl N {
    fn rank(&self) -> u8 {
        match self {
            N::Int(_) => 0,
            N::BigInt(_) => 1,
            N::Float(_) => 2,
            N::Ratio(_) => 3,
        }
    }
}

impl Number {
    /// Returns true if the `Number` is a machine integer, i.e. it was read
    /// from an integer literal without the `N` suffix.
    ///
    /// ```
    /// # use edn::Number;
    /// assert!(Number::from(42).is_i64());
    /// assert!(!Number::from(4.2).is_i64());
    /// ```
    #[inline]
    pub fn is_i64(&self) -> bool {
        matches!(self.n, N::Int(_))
    }

    /// Returns true if the `Number` is an arbitrary-precision integer.
    #[inline]
    pub fn is_big_int(&self) -> bool {
        matches!(self.n, N::BigInt(_))
    }

    /// Returns true if the `Number` is a floating point number.
    #[inline]
    pub fn is_f64(&self) -> bool {
        matches!(self.n, N::Float(_))
    }

    /// Returns true if the `Number` is an exact ratio.
    #[inline]
    pub fn is_ratio(&self) -> bool {
        matches!(self.n, N::Ratio(_))
    }

    /// If the `Number` is an integer (of either precision) that fits into an
    /// `i64`, returns it. Returns `None` otherwise.
    ///
    /// ```
    /// # use edn::Number;
    /// # use num_bigint::BigInt;
    /// assert_eq!(Number::from(64).as_i64(), Some(64));
    /// assert_eq!(Number::from(BigInt::from(64)).as_i64(), Some(64));
    /// assert_eq!(Number::from(256.0).as_i64(), None);
    /// ```
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match &self.n {
            N::Int(n) => Some(*n),
            N::BigInt(n) => n.to_i64(),
            N::Float(_) | N::Ratio(_) => None,
        }
    }

    /// If the `Number` is an arbitrary-precision integer, returns a reference
    /// to it.
    pub fn as_big_int(&self) -> Option<&BigInt> {
        match &self.n {
            N::BigInt(n) => Some(n),
            _ => None,
        }
    }

    /// If the `Number` is a ratio, returns a reference to it.
    pub fn as_ratio(&self) -> Option<&BigRational> {
        match &self.n {
            N::Ratio(r) => Some(r),
            _ => None,
        }
    }

    /// Represents the number as f64 if possible. Returns None otherwise.
    ///
    /// Integers and ratios are converted, possibly losing precision.
    ///
    /// ```
    /// # use edn::Number;
    /// assert_eq!(Number::from(256.0).as_f64(), Some(256.0));
    /// assert_eq!(Number::from(-64).as_f64(), Some(-64.0));
    /// ```
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match &self.n {
            N::Int(n) => Some(*n as f64),
            N::BigInt(n) => n.to_f64(),
            N::Float(n) => Some(*n),
            N::Ratio(r) => r.to_f64(),
        }
    }

    /// Converts a finite `f64` to a `Number`. Infinite or NaN values
    /// are not EDN numbers.
    ///
    /// ```
    /// # use std::f64;
    /// #
    /// # use edn::Number;
    /// #
    /// assert!(Number::from_f64(256.0).is_some());
    ///
    /// assert!(Number::from_f64(f64::NAN).is_none());
    /// ```
    #[inline]
    pub fn from_f64(f: f64) -> Option<Number> {
        if f.is_finite() {
            Some(Number { n: N::Float(f) })
        } else {
            None
        }
    }

    /// Dispatch based on the type of the contained value.
    ///
    /// Depending on the stored value, one of the functions of the
    /// supplied visitor will be called.
    pub fn visit<V>(&self, visitor: V) -> Result<V::Value, V::Error>
    where
        V: Visitor,
    {
        match &self.n {
            N::Int(n) => visitor.visit_i64(*n),
            N::BigInt(n) => visitor.visit_big_int(n),
            N::Float(n) => visitor.visit_f64(*n),
            N::Ratio(r) => visitor.visit_ratio(r),
        }
    }
}

/// Trait to access the value stored in `Number`.
///
/// The `Number` type does not directly expose its internal
/// structure to allow future changes without breaking the API.
///
/// Instead, you can implement this trait and pass your implementation
/// to `Number::visit`.
///
/// [`Number::visit`]: struct.Number.html#method.visit
pub trait Visitor {
    /// The return type of the visitor methods.
    type Value;
    /// The error type of the visitor methods.
    type Error;

    /// The stored value is an `i64`.
    fn visit_i64(self, n: i64) -> Result<Self::Value, Self::Error>;
    /// The stored value is an arbitrary-precision integer.
    fn visit_big_int(self, n: &BigInt) -> Result<Self::Value, Self::Error>;
    /// The stored value is `f64`.
    fn visit_f64(self, n: f64) -> Result<Self::Value, Self::Error>;
    /// The stored value is a ratio.
    fn visit_ratio(self, r: &BigRational) -> Result<Self::Value, Self::Error>;
}

macro_rules! impl_from_int {
    (
        $($ty:ty),*
    ) => {
        $(
            impl From<$ty> for Number {
                #[inline]
                fn from(n: $ty) -> Self {
                    Number { n: N::Int(i64::from(n)) }
                }
            }
        )*
    };
}

impl_from_int!(u8, u16, u32, i8, i16, i32, i64);

impl From<u64> for Number {
    #[inline]
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => Number { n: N::Int(n) },
            Err(_) => Number {
                n: N::BigInt(BigInt::from(n)),
            },
        }
    }
}

impl From<f32> for Number {
    #[inline]
    fn from(n: f32) -> Self {
        Number {
            n: N::Float(f64::from(n)),
        }
    }
}

impl From<f64> for Number {
    #[inline]
    fn from(n: f64) -> Self {
        Number { n: N::Float(n) }
    }
}

impl From<BigInt> for Number {
    #[inline]
    fn from(n: BigInt) -> Self {
        Number { n: N::BigInt(n) }
    }
}

impl From<BigRational> for Number {
    #[inline]
    fn from(r: BigRational) -> Self {
        Number { n: N::Ratio(r) }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.n, &other.n) {
            (N::Int(a), N::Int(b)) => a.cmp(b),
            (N::BigInt(a), N::BigInt(b)) => a.cmp(b),
            (N::Float(a), N::Float(b)) => a.total_cmp(b),
            (N::Ratio(a), N::Ratio(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.n.rank().hash(state);
        match &self.n {
            N::Int(n) => n.hash(state),
            N::BigInt(n) => n.hash(state),
            // Consistent with `total_cmp`: equal floats have equal bits.
            N::Float(f) => f.to_bits().hash(state),
            N::Ratio(r) => r.hash(state),
        }
    }
}

struct Write<'a, 'b> {
    formatter: &'a mut fmt::Formatter<'b>,
}

impl<'a, 'b> Visitor for Write<'a, 'b> {
    type Value = ();
    type Error = fmt::Error;

    fn visit_i64(self, n: i64) -> fmt::Result {
        let mut buffer = itoa::Buffer::new();
        self.formatter.write_str(buffer.format(n))
    }

    fn visit_big_int(self, n: &BigInt) -> fmt::Result {
        write!(self.formatter, "{}N", n)
    }

    fn visit_f64(self, n: f64) -> fmt::Result {
        let mut buffer = ryu::Buffer::new();
        self.formatter.write_str(buffer.format(n))
    }

    fn visit_ratio(self, r: &BigRational) -> fmt::Result {
        // Always written with an explicit denominator, `BigRational`'s own
        // `Display` would print `2/1` as `2`.
        write!(self.formatter, "{}/{}", r.numer(), r.denom())
    }
}

impl Display for Number {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.visit(Write { formatter })
    }
}

impl Debug for Number {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.n, formatter)
    }
}
