//! Verhoeff checksum over Aadhaar-style 12-digit identifiers.
//!
//! Standard multiplication (d), permutation (p) and inverse tables. A number
//! is valid when the running check over its digits, taken
//! most-significant-first, ends at 0. Detects every single-digit error and
//! adjacent transposition.

/// Multiplication table of the dihedral group D5.
const D: [[u8; 10]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 2, 3, 4, 0, 6, 7, 8, 9, 5],
    [2, 3, 4, 0, 1, 7, 8, 9, 5, 6],
    [3, 4, 0, 1, 2, 8, 9, 5, 6, 7],
    [4, 0, 1, 2, 3, 9, 5, 6, 7, 8],
    [5, 9, 8, 7, 6, 0, 4, 3, 2, 1],
    [6, 5, 9, 8, 7, 1, 0, 4, 3, 2],
    [7, 6, 5, 9, 8, 2, 1, 0, 4, 3],
    [8, 7, 6, 5, 9, 3, 2, 1, 0, 4],
    [9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
];

/// Position-dependent permutation table, period 8.
const P: [[u8; 10]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 5, 7, 6, 2, 8, 3, 0, 9, 4],
    [5, 8, 0, 3, 7, 9, 6, 1, 4, 2],
    [8, 9, 1, 6, 0, 4, 3, 5, 2, 7],
    [9, 4, 5, 3, 1, 2, 6, 8, 7, 0],
    [4, 2, 8, 6, 5, 7, 3, 9, 0, 1],
    [2, 7, 9, 3, 8, 0, 6, 4, 1, 5],
    [7, 0, 4, 6, 9, 1, 3, 2, 5, 8],
];

/// Group inverses under D.
const INV: [u8; 10] = [0, 4, 3, 2, 1, 5, 6, 7, 8, 9];

/// Validate a digit string whose last digit is the check digit. Non-digit
/// input or an empty string is simply invalid, never an error.
pub fn validate(digits: &str) -> bool {
    if digits.is_empty() {
        return false;
    }
    let mut c: u8 = 0;
    for (i, ch) in digits.chars().rev().enumerate() {
        let Some(digit) = ch.to_digit(10) else {
            return false;
        };
        c = D[c as usize][P[i % 8][digit as usize] as usize];
    }
    c == 0
}

/// Compute the check digit to append to `payload`.
pub fn check_digit(payload: &str) -> Option<u8> {
    let mut c: u8 = 0;
    for (i, ch) in payload.chars().rev().enumerate() {
        let digit = ch.to_digit(10)?;
        c = D[c as usize][P[(i + 1) % 8][digit as usize] as usize];
    }
    Some(INV[c as usize])
}
