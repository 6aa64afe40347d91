/// Calibration coefficients C1..C6, unpacked from the four factory-programmed words.
///
/// A `CalibrationSet` held by a driver has always been built from four successfully read
/// words. The protocol carries no checksum, so a word corrupted on the bus decodes silently
/// into wrong coefficients.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationSet {
    /// Pressure sensitivity (15 bit)
    pub c1: i32,
    /// Pressure offset (12 bit)
    pub c2: i32,
    /// Temperature coefficient of pressure sensitivity (10 bit)
    pub c3: i32,
    /// Temperature coefficient of pressure offset (10 bit)
    pub c4: i32,
    /// Reference temperature (11 bit)
    pub c5: i32,
    /// Temperature coefficient of the temperature (6 bit)
    pub c6: i32,
}

impl CalibrationSet {
    /// Unpacks the coefficients from calibration words W1..W4, given in acquisition order.
    pub const fn decode(words: [u16; 4]) -> Self {
        let [w0, w1, w2, w3] = words;

        Self {
            c1: ((w0 >> 1) & 0x7FFF) as i32,
            c2: (((w2 & 0x003F) << 6) | (w3 & 0x003F)) as i32,
            c3: ((w3 >> 6) & 0x03FF) as i32,
            c4: ((w2 >> 6) & 0x03FF) as i32,
            c5: (((w0 & 0x0001) << 10) | ((w1 >> 6) & 0x03FF)) as i32,
            c6: (w1 & 0x003F) as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_bit_fields() {
        let cal = CalibrationSet::decode([0x8000, 0x0040, 0x0041, 0x0042]);

        assert_eq!(16384, cal.c1);
        assert_eq!(66, cal.c2);
        assert_eq!(1, cal.c3);
        assert_eq!(1, cal.c4);
        assert_eq!(1, cal.c5);
        assert_eq!(0, cal.c6);
    }

    #[test]
    fn decode_datasheet_words() {
        let cal = CalibrationSet::decode([46940, 64545, 25172, 47212]);

        assert_eq!(
            CalibrationSet { c1: 23470, c2: 1324, c3: 737, c4: 393, c5: 1008, c6: 33 },
            cal
        );
    }

    #[test]
    fn decode_c5_high_bit_comes_from_word1() {
        let cal = CalibrationSet::decode([0x0001, 0xFFC0, 0x0000, 0x0000]);

        assert_eq!(0, cal.c1);
        assert_eq!(0x07FF, cal.c5);
        assert_eq!(0, cal.c6);
    }

    #[test]
    fn decode_all_ones() {
        let cal = CalibrationSet::decode([0xFFFF; 4]);

        assert_eq!(0x7FFF, cal.c1);
        assert_eq!(0x0FFF, cal.c2);
        assert_eq!(0x03FF, cal.c3);
        assert_eq!(0x03FF, cal.c4);
        assert_eq!(0x07FF, cal.c5);
        assert_eq!(0x003F, cal.c6);
    }
}
