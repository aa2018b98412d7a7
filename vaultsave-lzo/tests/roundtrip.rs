//! Integration round-trip tests for larger, more realistic payloads.

use vaultsave_lzo::{compress_block, decompress_block};

#[test]
fn roundtrips_two_megabytes_of_mixed_content() {
    let mut data = Vec::with_capacity(2 << 20);
    let chunk: Vec<u8> = (0..4096u32).map(|i| ((i * 131) ^ (i >> 3)) as u8).collect();
    while data.len() < (2 << 20) {
        data.extend_from_slice(&chunk);
    }
    data.truncate(2 << 20);

    let compressed = compress_block(&data);
    assert!(compressed.len() < data.len(), "highly repetitive data should compress");

    let decompressed = decompress_block(&compressed, data.len()).expect("decompress");
    assert_eq!(decompressed, data);
}

#[test]
fn roundtrips_random_incompressible_data() {
    let mut x: u64 = 0x9E37_79B9_7F4A_7C15;
    let data: Vec<u8> = (0..65536)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            (x & 0xFF) as u8
        })
        .collect();

    let compressed = compress_block(&data);
    let decompressed = decompress_block(&compressed, data.len()).expect("decompress");
    assert_eq!(decompressed, data);
}

#[test]
fn roundtrips_each_small_length_from_zero_to_sixty_four() {
    for len in 0..=64usize {
        let data: Vec<u8> = (0..len).map(|i| (i * 3 + 1) as u8).collect();
        let compressed = compress_block(&data);
        let decompressed = decompress_block(&compressed, data.len()).expect("decompress");
        assert_eq!(decompressed, data, "failed at len {len}");
    }
}
