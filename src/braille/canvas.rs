/// Dot bit for each (x % 2, y % 4) position inside a Braille cell
const DOT_BITS: [[u8; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

/// Off-screen bitmap drawn with Unicode Braille patterns (U+2800..U+28FF).
/// Every character cell holds a 2x4 block of dots.
#[derive(Clone)]
pub struct BrailleCanvas {
    cols: usize,
    rows: usize,
    cells: Vec<u8>,
}

impl BrailleCanvas {
    /// Canvas of `cols` x `rows` characters, i.e. `cols*2` x `rows*4` dots
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![0; cols * rows],
        }
    }

    pub fn pixel_width(&self) -> usize {
        self.cols * 2
    }

    pub fn pixel_height(&self) -> usize {
        self.rows * 4
    }

    /// Turn on one dot; out-of-range dots are dropped
    pub fn set_pixel(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let (col, row) = (x / 2, y / 4);
        if col >= self.cols || row >= self.rows {
            return;
        }
        self.cells[row * self.cols + col] |= DOT_BITS[x % 2][y % 4];
    }

    /// Braille character at a cell, `None` when the cell is blank
    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        match self.cells[row * self.cols + col] {
            0 => None,
            bits => char::from_u32(0x2800 + bits as u32),
        }
    }

    /// One text line per character row
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.cells.chunks(self.cols.max(1)).take(self.rows).map(|row| {
            row.iter()
                .map(|&b| char::from_u32(0x2800 + b as u32).unwrap_or(' '))
                .collect()
        })
    }
}
