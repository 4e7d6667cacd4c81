//! Damerau-Levenshtein distance (optimal string alignment) with early
//! termination, plus a keyboard-weighted variant.
//!
//! The weighted variant charges substitutions by layout distance (0.5 for
//! direct neighbors, 0.75 two rings out, 1.0 otherwise), runs the DP under
//! a doubled threshold and reports `ceil(weighted)` capped at `max`, so an
//! exact match stays 0 while an adjacent-key substitution reports 1.

use smallvec::SmallVec;

use crate::keyboard::KeyboardMatrix;

const INLINE_CHARS: usize = 32;

type CharBuf = SmallVec<[char; INLINE_CHARS]>;
type Row<T> = SmallVec<[T; INLINE_CHARS]>;

const ADJACENT_SUBSTITUTION_COST: f64 = 0.5;
const NEAR_SUBSTITUTION_COST: f64 = 0.75;
// tolerance for threshold comparisons on accumulated f64 costs
const WEIGHT_EPSILON: f64 = 1e-9;

/// Reusable scratch for distance computations.
///
/// The DP rows and char buffers are retained across calls so the hot
/// lookup loop does not reallocate per candidate.
pub struct EditDistance {
    a_chars: CharBuf,
    b_chars: CharBuf,
    prev2: Row<usize>,
    prev: Row<usize>,
    curr: Row<usize>,
    wprev2: Row<f64>,
    wprev: Row<f64>,
    wcurr: Row<f64>,
}

impl EditDistance {
    pub fn new() -> Self {
        Self {
            a_chars: SmallVec::new(),
            b_chars: SmallVec::new(),
            prev2: SmallVec::new(),
            prev: SmallVec::new(),
            curr: SmallVec::new(),
            wprev2: SmallVec::new(),
            wprev: SmallVec::new(),
            wcurr: SmallVec::new(),
        }
    }

    /// Edit distance between `a` and `b`, `None` when it exceeds `max`.
    ///
    /// With a keyboard matrix the weighted algorithm is used; without one,
    /// the plain integer algorithm.
    pub fn distance(
        &mut self,
        a: &str,
        b: &str,
        max: usize,
        keyboard: Option<&KeyboardMatrix>,
    ) -> Option<usize> {
        self.a_chars.clear();
        self.a_chars.extend(a.chars());
        self.b_chars.clear();
        self.b_chars.extend(b.chars());
        let (a_len, b_len) = (self.a_chars.len(), self.b_chars.len());

        if a_len == 0 {
            return (b_len <= max).then_some(b_len);
        }
        if b_len == 0 {
            return (a_len <= max).then_some(a_len);
        }
        if a_len.abs_diff(b_len) > max {
            return None;
        }

        match keyboard {
            Some(matrix) => self.weighted(max, matrix),
            None => self.unweighted(max),
        }
    }

    fn unweighted(&mut self, max: usize) -> Option<usize> {
        let b_len = self.b_chars.len();

        self.prev2.clear();
        self.prev.clear();
        self.curr.clear();
        self.prev2.extend(0..=b_len);
        self.prev.extend(0..=b_len);
        self.curr.extend(std::iter::repeat(0).take(b_len + 1));

        let mut prev_a = char::MAX;
        for (i, &a_char) in self.a_chars.iter().enumerate() {
            self.curr[0] = i + 1;
            let mut row_min = self.curr[0];
            let mut prev_b = char::MAX;
            for (j, &b_char) in self.b_chars.iter().enumerate() {
                let cost = usize::from(a_char != b_char);
                let mut cell = (self.curr[j] + 1)
                    .min(self.prev[j + 1] + 1)
                    .min(self.prev[j] + cost);
                if i > 0 && j > 0 && a_char != b_char && a_char == prev_b && b_char == prev_a {
                    cell = cell.min(self.prev2[j - 1] + 1);
                }
                self.curr[j + 1] = cell;
                row_min = row_min.min(cell);
                prev_b = b_char;
            }
            if row_min > max {
                return None;
            }
            std::mem::swap(&mut self.prev2, &mut self.prev);
            std::mem::swap(&mut self.prev, &mut self.curr);
            prev_a = a_char;
        }

        let result = self.prev[b_len];
        (result <= max).then_some(result)
    }

    fn weighted(&mut self, max: usize, matrix: &KeyboardMatrix) -> Option<usize> {
        let b_len = self.b_chars.len();
        let threshold = (2 * max) as f64 + WEIGHT_EPSILON;

        self.wprev2.clear();
        self.wprev.clear();
        self.wcurr.clear();
        self.wprev2.extend((0..=b_len).map(|v| v as f64));
        self.wprev.extend((0..=b_len).map(|v| v as f64));
        self.wcurr.extend(std::iter::repeat(0.0).take(b_len + 1));

        let mut prev_a = char::MAX;
        for (i, &a_char) in self.a_chars.iter().enumerate() {
            self.wcurr[0] = (i + 1) as f64;
            let mut row_min = self.wcurr[0];
            let mut prev_b = char::MAX;
            for (j, &b_char) in self.b_chars.iter().enumerate() {
                let cost = substitution_cost(matrix, a_char, b_char);
                let mut cell = (self.wcurr[j] + 1.0)
                    .min(self.wprev[j + 1] + 1.0)
                    .min(self.wprev[j] + cost);
                // adjacent transposition always costs a full edit
                if i > 0 && j > 0 && a_char != b_char && a_char == prev_b && b_char == prev_a {
                    cell = cell.min(self.wprev2[j - 1] + 1.0);
                }
                self.wcurr[j + 1] = cell;
                row_min = row_min.min(cell);
                prev_b = b_char;
            }
            if row_min > threshold {
                return None;
            }
            std::mem::swap(&mut self.wprev2, &mut self.wprev);
            std::mem::swap(&mut self.wprev, &mut self.wcurr);
            prev_a = a_char;
        }

        let weighted = self.wprev[b_len];
        if weighted > threshold {
            return None;
        }
        Some((weighted.ceil() as usize).min(max))
    }
}

impl Default for EditDistance {
    fn default() -> Self {
        Self::new()
    }
}

fn substitution_cost(matrix: &KeyboardMatrix, a: char, b: char) -> f64 {
    if a == b {
        return 0.0;
    }
    match matrix.distance(a, b) {
        1 => ADJACENT_SUBSTITUTION_COST,
        2 => NEAR_SUBSTITUTION_COST,
        _ => 1.0,
    }
}
