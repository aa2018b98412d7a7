//! Byte rotation and LCG-keystream XOR, the two primitives the item
//! codec layers on top of a packed record to obfuscate it in the save
//! file.

/// Rotate `data` right by `steps` bytes (the last `steps` bytes move to
/// the front). `steps` wraps modulo `data.len()`.
pub fn rotate_right(data: &[u8], steps: usize) -> Vec<u8> {
    if data.is_empty() {
        return Vec::new();
    }
    let steps = steps % data.len();
    if steps == 0 {
        return data.to_vec();
    }
    let mut out = Vec::with_capacity(data.len());
    out.extend_from_slice(&data[data.len() - steps..]);
    out.extend_from_slice(&data[..data.len() - steps]);
    out
}

/// Rotate `data` left by `steps` bytes (the first `steps` bytes move to
/// the back). `steps` wraps modulo `data.len()`.
pub fn rotate_left(data: &[u8], steps: usize) -> Vec<u8> {
    if data.is_empty() {
        return Vec::new();
    }
    let steps = steps % data.len();
    if steps == 0 {
        return data.to_vec();
    }
    let mut out = Vec::with_capacity(data.len());
    out.extend_from_slice(&data[steps..]);
    out.extend_from_slice(&data[..steps]);
    out
}

/// XOR `data` with a keystream generated by the linear congruential
/// generator `key = key * 279470273 mod 4294967291`, one step per byte,
/// XORing each byte with the low 8 bits of the updated key. Symmetric:
/// applying it twice with the same `key` recovers the original data.
pub fn xor_stream(data: &[u8], key: u32) -> Vec<u8> {
    let mut key = key as u64;
    let mut out = Vec::with_capacity(data.len());
    for &byte in data {
        key = (key * 279_470_273) % 4_294_967_291;
        out.push(byte ^ (key as u8));
    }
    out
}
