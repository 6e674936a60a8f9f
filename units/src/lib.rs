pub use uom;

pub mod mmev {

  // TODO: replace with system! macro, once it has been fixed in uom
  pub mod f32 {
    use uom::{ISQ, system};
    ISQ!(uom::si, f32, (millimeter, kilogram, nanosecond, ampere, kelvin, mole, candela));

    /// The full circle constant (τ) Equal to 2π.
    pub const TWOPI: Angle = Angle {
        dimension: std::marker::PhantomData,
        units: std::marker::PhantomData,
        value: std::f32::consts::TAU,
    };
  }

}

pub use uom::si::Quantity;
pub use mmev::f32::{Angle, TWOPI, Length, Ratio};
mod units {
  pub use uom::si::{length::{nanometer, micrometer, millimeter, centimeter},
                    ratio ::ratio,
                    angle ::{radian, revolution},
  };
}
// Making values from float literals seems to be very long-winded, so provide
// some pithily-named convenience constructors. These would probably have to be
// packed up in a constructor module in real life.

/// Generate a function called NAME which returns QUANTITY by interpreting its
/// argument as UNIT
///
/// wrap!(NAME QUANTITY UNIT);
macro_rules! wrap {
  ($name:ident $quantity:ident $unit:ident ) => {
    pub fn $name(x: f32) -> $quantity { $quantity::new::<units::$unit>(x) }
  };
}

wrap!(cm     Length         centimeter);
wrap!(mm     Length         millimeter);
wrap!(um     Length         micrometer);
wrap!(nm     Length          nanometer);
wrap!(ratio  Ratio               ratio);
wrap!(radian Angle              radian);
wrap!(turn   Angle          revolution);

// Reverse direction of the above. Rethink nomenclature once the dust has
// settled after the transition to uom is complete.
pub fn mm_(x: Length) -> f32 { x.get::<units::millimeter>() }
pub fn nm_(x: Length) -> f32 { x.get::<units::nanometer> () }

pub fn ratio_ (x: Ratio) -> f32 { x.get::<uom::si::ratio::ratio>() }
pub fn radian_(x: Angle) -> f32 { x.get::<uom::si::angle::radian>() }
pub fn turn_  (x: Angle) -> f32 { x.get::<uom::si::angle::revolution>() }

#[macro_export]
macro_rules! in_base_unit {
  ($value:expr) => {
    $crate::Quantity {
      dimension: std::marker::PhantomData,
      units: std::marker::PhantomData,
      value: $value,
    }
  };
}


#[macro_export]
macro_rules! assert_uom_eq {
  ($unit:ident, $lhs:expr, $rhs:expr, $algo:ident <= $tol:expr) => {
    float_eq::assert_float_eq!($lhs.get::<$unit>(), $rhs.get::<$unit>(), $algo <= $tol)
  };
}

pub mod todo;
