//! Identity colors for color-keyed hit testing

use rand::Rng;
use serde::{Deserialize, Serialize};

/// An opaque RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// What an empty collision surface reads back as; also the HUD shadow
    pub const BACKGROUND: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Sample each channel uniformly from `0..255`.
    ///
    /// Two live targets can draw the same color; the click then credits
    /// whichever comes first in draw order.
    pub fn random(rng: &mut impl Rng) -> Self {
        Rgb(
            rng.random_range(0..255),
            rng.random_range(0..255),
            rng.random_range(0..255),
        )
    }

    /// CSS color string for canvas fill styles
    pub fn to_css(self) -> String {
        format!("rgb({},{},{})", self.0, self.1, self.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_random_colors_stay_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let c = Rgb::random(&mut rng);
            assert!(c.0 < 255 && c.1 < 255 && c.2 < 255);
        }
    }

    #[test]
    fn test_to_css() {
        assert_eq!(Rgb(10, 20, 30).to_css(), "rgb(10,20,30)");
    }
}
