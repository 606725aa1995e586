use phf::phf_map;

pub const UTF8_SPACE: u8 = 32;
pub const UTF8_STAR: u8 = 42;
pub const UTF8_DASH: u8 = 45;
pub const UTF8_PIPE: u8 = 124;

/// The byte used to pad position 0 of a sequence's byte buffer
pub const PAD_BYTE: u8 = 255;

/// The symbol that marks an insertion or deletion in an alignment
pub const GAP: u8 = UTF8_DASH;

pub const AMINO_ALPHABET: [&str; 20] = [
    "A", "C", "D", "E", "F", "G", "H", "I", "K", "L", "M", "N", "P", "Q", "R", "S", "T", "V", "W",
    "Y",
];

/// maps from \<UTF8 amino byte\> -> \<index into AMINO_ALPHABET\>
pub const UTF8_TO_AMINO_IDX: phf::Map<u8, u8> = phf_map! {
    // upper case
    65u8 => 0,    // A
    67u8 => 1,    // C
    68u8 => 2,    // D
    69u8 => 3,    // E
    70u8 => 4,    // F
    71u8 => 5,    // G
    72u8 => 6,    // H
    73u8 => 7,    // I
    75u8 => 8,    // K
    76u8 => 9,    // L
    77u8 => 10,   // M
    78u8 => 11,   // N
    80u8 => 12,   // P
    81u8 => 13,   // Q
    82u8 => 14,   // R
    83u8 => 15,   // S
    84u8 => 16,   // T
    86u8 => 17,   // V
    87u8 => 18,   // W
    89u8 => 19,   // Y
    // lower case
    97u8 => 0,    // a
    99u8 => 1,    // c
    100u8 => 2,   // d
    101u8 => 3,   // e
    102u8 => 4,   // f
    103u8 => 5,   // g
    104u8 => 6,   // h
    105u8 => 7,   // i
    107u8 => 8,   // k
    108u8 => 9,   // l
    109u8 => 10,  // m
    110u8 => 11,  // n
    112u8 => 12,  // p
    113u8 => 13,  // q
    114u8 => 14,  // r
    115u8 => 15,  // s
    116u8 => 16,  // t
    118u8 => 17,  // v
    119u8 => 18,  // w
    121u8 => 19,  // y
};

/// Returns true if the byte can appear as a residue in a sequence.
///
/// Residues are ASCII letters (any alphabet, including degenerate
/// amino codes) or the stop symbol `*`. The gap symbol never is.
#[inline]
pub fn is_residue_byte(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == UTF8_STAR
}
