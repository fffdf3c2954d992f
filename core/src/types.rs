/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for card counts and pair counts.
pub type CardCount = u16;

/// Hidden identity of a card; two positions share a value iff they pair.
pub type CardValue = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CardCount {
    let a = a as CardCount;
    let b = b as CardCount;
    a.saturating_mul(b)
}
