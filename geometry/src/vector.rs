use std::ops::{Index, Mul};
use units::Length;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector {
    pub x: Length,
    pub y: Length,
    pub z: Length,
}

impl Mul<f32> for Vector {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self::Output {
        Vector {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

impl Index<usize> for Vector {
    type Output = Length;
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("index {index} is out of bounds [0,2]")
        }
    }
}

impl Vector {

    pub fn new(x: Length, y: Length, z: Length) -> Self { Self { x, y, z } }

    pub fn magnitude(&self) -> Length {
        let &Self { x, y, z } = self;
        (x*x + y*y + z*z).sqrt()
    }

}
