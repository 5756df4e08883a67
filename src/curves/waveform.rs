//! Fixed-point sine/cosine lookup.
//!
//! Every slot carries the waveform at phase `i` and at phase `i + N/4`, so a
//! single lookup returns a sine/cosine pair. Amplitude is `N / 2π`: one table
//! unit is one radian of phase, which lets generated coordinates be fed back in
//! as phase offsets.

include!(concat!(env!("OUT_DIR"), "/compact_sine.rs"));

/// log2 of the table length; also the fixed-point shift used when projecting.
pub const TABLE_POWER: u32 = 14;
pub const TABLE_LEN: usize = 1 << TABLE_POWER;
pub const TABLE_MASK: i32 = (TABLE_LEN - 1) as i32;
pub const QUARTER: usize = TABLE_LEN / 4;

/// One table slot: `a` is the sample at phase `i`, `b` the sample 90° ahead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WavePair {
    pub a: i16,
    pub b: i16,
}

impl WavePair {
    /// Packed word with `a` in the high half and `b` in the low half.
    #[inline]
    pub fn packed(self) -> i32 {
        (((self.a as u16 as u32) << 16) | self.b as u16 as u32) as i32
    }
}

/// Upper 16 bits of a packed slot, sign-extended by arithmetic shift.
#[inline]
pub fn high_half(word: i32) -> i32 {
    word >> 16
}

/// Lower 16 bits of a packed slot, sign-extended.
#[inline]
pub fn low_half(word: i32) -> i32 {
    word as i16 as i32
}

pub struct WaveTable {
    pairs: Box<[WavePair]>,
}

impl WaveTable {
    pub fn build() -> Self {
        Self::from_quarter(&COMPACT_SINE)
    }

    /// Expand a quarter period into a full period, then pair every phase with
    /// the phase a quarter period ahead.
    pub fn from_quarter(quarter: &[i16; QUARTER]) -> Self {
        let mut full = vec![0i16; TABLE_LEN];
        for (i, &v) in quarter.iter().enumerate() {
            full[i] = v;
            full[TABLE_LEN / 2 - i - 1] = v;
            full[TABLE_LEN / 2 + i] = v.wrapping_neg();
            full[TABLE_LEN - i - 1] = v.wrapping_neg();
        }

        let pairs = (0..TABLE_LEN)
            .map(|i| WavePair {
                a: full[i],
                b: full[(i + QUARTER) % TABLE_LEN],
            })
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self { pairs }
    }

    /// Any phase is valid; it wraps modulo the table length.
    #[inline]
    pub fn lookup(&self, phase: i32) -> WavePair {
        self.pairs[(phase & TABLE_MASK) as usize]
    }

    #[inline]
    pub fn get(&self, index: usize) -> WavePair {
        self.pairs[index & (TABLE_LEN - 1)]
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Peak sample value.
    pub fn amplitude(&self) -> i16 {
        self.pairs.iter().map(|p| p.a).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_halves_round_trip_signs() {
        let p = WavePair { a: -3, b: -7 };
        assert_eq!(high_half(p.packed()), -3);
        assert_eq!(low_half(p.packed()), -7);

        let p = WavePair { a: 2607, b: -1 };
        assert_eq!(high_half(p.packed()), 2607);
        assert_eq!(low_half(p.packed()), -1);
    }

    #[test]
    fn lookup_wraps_negative_phases() {
        let t = WaveTable::build();
        assert_eq!(t.lookup(-1), t.get(TABLE_LEN - 1));
        assert_eq!(t.lookup(TABLE_LEN as i32 + 5), t.get(5));
    }

    #[test]
    fn amplitude_is_one_radian_per_unit() {
        let t = WaveTable::build();
        // N / 2π = 2607.59
        assert_eq!(t.amplitude(), 2608);
    }
}
