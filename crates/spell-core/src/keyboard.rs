//! Keyboard layout distance matrices for spatial error weighting.
//!
//! A layout file is a 26x26 byte matrix between lowercase letters:
//! 0 = same key, 1 = direct neighbor, 2 = two rings out, 255 = far.
//! Matrices are generated from physical row tables with the usual row
//! stagger, or loaded from a `keyboard_<layout>.bin` file.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::store::StoreError;

pub(crate) const MAGIC: &[u8; 4] = b"KYBD";
pub(crate) const VERSION: u8 = 1;
const MATRIX_CELLS: usize = 26 * 26;
// magic(4) + version(1) + matrix(676)
const FILE_SIZE: usize = 5 + MATRIX_CELLS;

/// Distance value for unrelated or non-letter pairs.
pub const FAR: u8 = 255;

/// Physical keyboard layouts with prebuilt row tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Qwerty,
    Azerty,
    Qwertz,
    Dvorak,
    Colemak,
}

impl Layout {
    pub const ALL: [Layout; 5] = [
        Layout::Qwerty,
        Layout::Azerty,
        Layout::Qwertz,
        Layout::Dvorak,
        Layout::Colemak,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Layout::Qwerty => "qwerty",
            Layout::Azerty => "azerty",
            Layout::Qwertz => "qwertz",
            Layout::Dvorak => "dvorak",
            Layout::Colemak => "colemak",
        }
    }

    fn rows(&self) -> [&'static str; 3] {
        match self {
            Layout::Qwerty => ["qwertyuiop", "asdfghjkl", "zxcvbnm"],
            Layout::Azerty => ["azertyuiop", "qsdfghjklm", "wxcvbn"],
            Layout::Qwertz => ["qwertzuiop", "asdfghjkl", "yxcvbnm"],
            Layout::Dvorak => ["pyfgcrl", "aoeuidhtns", "qjkxbmwvz"],
            Layout::Colemak => ["qwfpgjluy", "arstdhneio", "zxcvbkm"],
        }
    }

    /// Conventional file name for this layout, `keyboard_<name>.bin`.
    pub fn file_name(&self) -> String {
        format!("keyboard_{}.bin", self.name())
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Layout::ALL
            .iter()
            .find(|l| l.name() == s)
            .copied()
            .ok_or_else(|| format!("unknown keyboard layout: {s}"))
    }
}

/// 26x26 letter distance matrix, indexed by `(letter - 'a')`.
///
/// Generated matrices are symmetric, but readers must not rely on that.
pub struct KeyboardMatrix {
    cells: Box<[u8; MATRIX_CELLS]>,
}

impl KeyboardMatrix {
    /// Compute the matrix for a physical layout.
    ///
    /// Rows are staggered by half-key offsets (0, 0.5, 1.5 keys); distance
    /// between keys is Chebyshev over half-key units so diagonal neighbors
    /// count as ring 1.
    pub fn generate(layout: Layout) -> Self {
        // (row, col) in half-key units, per letter
        let mut positions = [None::<(i32, i32)>; 26];
        let row_offsets = [0i32, 1, 3];
        for (row_index, row) in layout.rows().iter().enumerate() {
            let offset = row_offsets[row_index];
            for (col_index, key) in row.bytes().enumerate() {
                positions[(key - b'a') as usize] =
                    Some((row_index as i32 * 2, col_index as i32 * 2 + offset));
            }
        }

        let mut cells = Box::new([FAR; MATRIX_CELLS]);
        for i in 0..26 {
            for j in 0..26 {
                if i == j {
                    cells[i * 26 + j] = 0;
                    continue;
                }
                let (Some(a), Some(b)) = (positions[i], positions[j]) else {
                    continue;
                };
                let chebyshev = (a.0 - b.0).abs().max((a.1 - b.1).abs());
                cells[i * 26 + j] = match chebyshev {
                    0..=2 => 1,
                    3..=4 => 2,
                    _ => FAR,
                };
            }
        }
        Self { cells }
    }

    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let data = fs::read(path)?;
        if data.len() < 5 {
            return Err(StoreError::InvalidHeader);
        }
        if &data[..4] != MAGIC {
            return Err(StoreError::InvalidMagic);
        }
        if data[4] != VERSION {
            return Err(StoreError::UnsupportedVersion(data[4]));
        }
        if data.len() < FILE_SIZE {
            return Err(StoreError::Truncated);
        }
        let mut cells = Box::new([FAR; MATRIX_CELLS]);
        cells.copy_from_slice(&data[5..FILE_SIZE]);
        Ok(Self { cells })
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let mut buf = Vec::with_capacity(FILE_SIZE);
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(self.cells.as_slice());
        fs::write(path, buf)?;
        Ok(())
    }

    /// Layout distance between two characters. Anything outside `a..=z`
    /// is far.
    pub fn distance(&self, a: char, b: char) -> u8 {
        let (Some(i), Some(j)) = (letter_index(a), letter_index(b)) else {
            return FAR;
        };
        self.cells[i * 26 + j]
    }
}

fn letter_index(c: char) -> Option<usize> {
    c.is_ascii_lowercase().then(|| (c as u8 - b'a') as usize)
}
