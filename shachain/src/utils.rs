use super::element::{Index, MAX_HEIGHT};

// get_bit return bit on index at position.
pub fn get_bit(index: Index, position: u8) -> u8 {
    ((index.0 >> u64::from(position)) & 1) as u8
}

// get_prefix clears the bits below position.
pub fn get_prefix(index: Index, position: u8) -> u64 {
    let mask = u64::MAX - ((1u64 << u64::from(position)) - 1);
    index.0 & mask
}

// count_trailing_zeros counts number of trailing zero bits, this function is
// used to determine the number of element bucket.
pub fn count_trailing_zeros(index: Index) -> u8 {
    let zeros = index.0.trailing_zeros();
    if zeros >= u32::from(MAX_HEIGHT) {
        MAX_HEIGHT
    } else {
        zeros as u8
    }
}
