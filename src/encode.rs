//! Bit-level decoding of input bytes into the figure's turn sequence.

use crate::geom::Rotation;

/// Iterate the bits of `data` MSB-first as turn directions.
///
/// A clear bit turns clockwise, a set bit anti-clockwise.
pub(crate) fn rotations(data: &[u8]) -> impl Iterator<Item = Rotation> + '_ {
    data.iter().flat_map(|byte| {
        (0..8).map(move |bit| {
            if byte & (1 << (7 - bit)) == 0 {
                Rotation::Clockwise
            } else {
                Rotation::AntiClockwise
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Rotation::{AntiClockwise, Clockwise};

    #[test]
    fn bits_read_most_significant_first() {
        let turns: Vec<_> = rotations(&[0b0100_0001]).collect();
        assert_eq!(
            turns,
            vec![
                Clockwise,
                AntiClockwise,
                Clockwise,
                Clockwise,
                Clockwise,
                Clockwise,
                Clockwise,
                AntiClockwise,
            ]
        );
    }

    #[test]
    fn empty_input_yields_no_turns() {
        assert_eq!(rotations(&[]).count(), 0);
    }

    #[test]
    fn eight_turns_per_byte() {
        assert_eq!(rotations(&[0xff, 0x00, 0x5a]).count(), 24);
    }
}
