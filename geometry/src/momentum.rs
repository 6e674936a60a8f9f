use units::todo::Momentumf32;

/// Momentum 3-vector in GeV/c.
///
/// Plain `f32` components for now; see `units::todo` for why these have not
/// been promoted to `uom` quantities yet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Momentum {
    pub x: Momentumf32,
    pub y: Momentumf32,
    pub z: Momentumf32,
}

impl Momentum {

    pub fn new(x: Momentumf32, y: Momentumf32, z: Momentumf32) -> Self { Self { x, y, z } }

    pub fn mag(&self) -> Momentumf32 {
        let &Self { x, y, z } = self;
        (x*x + y*y + z*z).sqrt()
    }

}
