/// Represents a single character cell on the terminal
///
/// Half-block cell: `fg` paints the upper pixel, `bg` the lower one.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CellData {
    pub char: char,
    pub fg: (u8, u8, u8),
    pub bg: (u8, u8, u8),
}

impl Default for CellData {
    fn default() -> Self {
        Self {
            char: ' ',
            fg: (0, 0, 0),
            bg: (0, 0, 0),
        }
    }
}
