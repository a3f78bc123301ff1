//! Integer arithmetic for pricing.
//!
//! [`Rounding`] and [`div_round`] make every division state its direction,
//! [`CheckedArithmetic`] maps overflow to [`AmmError`](crate::error::AmmError),
//! [`isqrt`] sizes the initial LP supply, and [`ConstantProductCurve`] holds
//! the fee-free `x · y = k` formulas.

mod checked;
mod curve;
mod rounding;
mod sqrt;

pub use checked::CheckedArithmetic;
pub use curve::ConstantProductCurve;
pub use rounding::{div_round, Rounding};
pub use sqrt::isqrt;
