use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error("radius {value} is out of range [{min}, {max}]")]
    InvalidRadius { value: u32, min: u32, max: u32 },
}

/// Sphere radius in voxels, always within `[Radius::MIN, Radius::MAX]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Radius(u32);

impl Radius {
    pub const MIN: u32 = 1;
    // 3·r² must stay inside i32 for the squared-distance test.
    pub const MAX: u32 = 4096;

    pub fn new(value: u32) -> Result<Self, ShellError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ShellError::InvalidRadius {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Radius {
    type Error = ShellError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Radius::new(value)
    }
}

impl std::fmt::Display for Radius {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Radius plus the derived constants of the shell band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShellParams {
    pub radius: i32,
    /// Band thickness in squared-distance units (`2·radius`).
    pub double_radius: i32,
    pub squared_radius: i32,
}

impl ShellParams {
    pub fn new(radius: Radius) -> Self {
        let r = radius.get() as i32;
        Self {
            radius: r,
            double_radius: r << 1,
            squared_radius: r * r,
        }
    }

    /// `squared_radius - double_radius <= dst <= squared_radius`
    #[inline]
    pub fn in_band(&self, dst: i32) -> bool {
        dst >= self.squared_radius - self.double_radius && dst <= self.squared_radius
    }

    /// Largest 1-based slice position (`2·radius`).
    #[inline]
    pub fn slice_max(&self) -> u32 {
        self.double_radius as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_radius_is_rejected() {
        assert_eq!(
            Radius::new(0),
            Err(ShellError::InvalidRadius {
                value: 0,
                min: 1,
                max: 4096
            })
        );
    }

    #[test]
    fn oversized_radius_is_rejected() {
        assert!(Radius::new(Radius::MAX + 1).is_err());
        assert!(Radius::try_from(Radius::MAX).is_ok());
    }

    #[test]
    fn radius_four_band_is_eight_to_sixteen() {
        let p = ShellParams::new(Radius::new(4).unwrap());
        assert_eq!(p.squared_radius, 16);
        assert_eq!(p.double_radius, 8);
        assert!(p.in_band(16));
        assert!(p.in_band(9));
        assert!(p.in_band(8));
        assert!(!p.in_band(4));
        assert!(!p.in_band(17));
        assert_eq!(p.slice_max(), 8);
    }
}
