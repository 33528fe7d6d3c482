// pn-core/src/units.rs

use uom::si::f64::Length as UomLength;

// Public canonical unit types (SI, f64)
pub type Length = UomLength;

#[inline]
pub fn km(v: f64) -> Length {
    use uom::si::length::kilometer;
    Length::new::<kilometer>(v)
}

/// Length expressed in kilometres, the unit operators enter and files store.
#[inline]
pub fn as_km(l: Length) -> f64 {
    use uom::si::length::kilometer;
    l.get::<kilometer>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uom::si::length::meter;

    #[test]
    fn km_round_trip() {
        let l = km(12.5);
        assert!((as_km(l) - 12.5).abs() < 1e-12);
        assert!((l.get::<meter>() - 12_500.0).abs() < 1e-9);
    }
}
