use super::waveform::WaveTable;
use super::{ANG1_INC, ANG2_INC, ITERATIONS, SLOT_COUNT};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CurvePoint {
    pub x: i32,
    pub y: i32,
}

/// Starting phase accumulators for slot `k` at animation phase `t`.
#[inline]
pub fn slot_phases(t: i32, k: usize) -> (i32, i32) {
    let k = k as i32;
    (
        t.wrapping_add(k.wrapping_mul(ANG1_INC)),
        t.wrapping_add(k.wrapping_mul(ANG2_INC)),
    )
}

/// One curve: `ITERATIONS` points, each folded from the previous one.
#[derive(Clone)]
pub struct CurveIter<'a> {
    table: &'a WaveTable,
    phase1: i32,
    phase2: i32,
    x: i32,
    y: i32,
    remaining: usize,
}

impl<'a> CurveIter<'a> {
    pub fn new(table: &'a WaveTable, phase1: i32, phase2: i32) -> Self {
        Self {
            table,
            phase1,
            phase2,
            x: 0,
            y: 0,
            remaining: ITERATIONS,
        }
    }

    pub fn for_slot(table: &'a WaveTable, t: i32, k: usize) -> Self {
        let (phase1, phase2) = slot_phases(t, k);
        Self::new(table, phase1, phase2)
    }

    /// The point the next step folds from.
    pub fn current(&self) -> CurvePoint {
        CurvePoint {
            x: self.x,
            y: self.y,
        }
    }
}

impl Iterator for CurveIter<'_> {
    type Item = CurvePoint;

    #[inline]
    fn next(&mut self) -> Option<CurvePoint> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let a = self.table.lookup(self.phase1.wrapping_add(self.x));
        let b = self.table.lookup(self.phase2.wrapping_add(self.y));
        // x folds the 90°-ahead samples, y the in-phase ones.
        self.x = a.b as i32 + b.b as i32;
        self.y = a.a as i32 + b.a as i32;
        Some(self.current())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for CurveIter<'_> {}

/// All slots for one animation phase, in slot order.
pub struct CurveFamily<'a> {
    table: &'a WaveTable,
    t: i32,
}

impl<'a> CurveFamily<'a> {
    pub fn new(table: &'a WaveTable, t: i32) -> Self {
        Self { table, t }
    }

    pub fn slot(&self, k: usize) -> CurveIter<'a> {
        CurveIter::for_slot(self.table, self.t, k)
    }

    pub fn slots(&self) -> impl Iterator<Item = (usize, CurveIter<'a>)> + '_ {
        (0..SLOT_COUNT).map(move |k| (k, self.slot(k)))
    }

    /// Visit every point as `(slot, iteration, point)`.
    pub fn for_each_point(&self, mut f: impl FnMut(usize, usize, CurvePoint)) {
        for (k, curve) in self.slots() {
            for (j, p) in curve.enumerate() {
                f(k, j, p);
            }
        }
    }
}
