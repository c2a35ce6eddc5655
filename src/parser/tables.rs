/// Length of the code prefix of every fixed-length AI
pub const FIXED_AI_LENGTH: usize = 2;

// Predefined-length AIs from the GS1 General Specifications (figure 5.10.1-2).
// Length includes the two code digits.
const FIXED_LENGTH_AIS: [(&[u8; 2], usize); 22] = [
    (b"00", 20),
    (b"01", 16),
    (b"02", 16),
    (b"03", 16),
    (b"04", 18),
    (b"11", 8),
    (b"12", 8),
    (b"13", 8),
    (b"14", 8),
    (b"15", 8),
    (b"16", 8),
    (b"17", 8),
    (b"18", 8),
    (b"19", 8),
    (b"20", 4),
    (b"31", 10),
    (b"32", 10),
    (b"33", 10),
    (b"34", 10),
    (b"35", 10),
    (b"36", 10),
    (b"41", 16),
];

/// Total field length of a fixed-length AI, code included
pub fn fixed_field_length(code: &[u8]) -> Option<usize> {
    FIXED_LENGTH_AIS
        .iter()
        .find(|(ai, _)| ai.as_slice() == code)
        .map(|&(_, len)| len)
}

/// Membership in GS1 AI encodable character set 82
pub fn is_encodable(byte: u8) -> bool {
    matches!(
        byte,
        b'!' | b'"'
            | b'%'..=b'?'
            | b'A'..=b'Z'
            | b'_'
            | b'a'..=b'z'
    )
}
