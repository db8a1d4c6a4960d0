// OGG page checksum
//
// CRC-32 with polynomial 0x04c11db7, initial value 0, no reflection and no
// final xor, computed over the whole page with the checksum field zeroed.

const POLYNOMIAL: u32 = 0x04c1_1db7;

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut r = (i as u32) << 24;
        let mut bit = 0;
        while bit < 8 {
            r = if r & 0x8000_0000 != 0 {
                (r << 1) ^ POLYNOMIAL
            } else {
                r << 1
            };
            bit += 1;
        }
        table[i] = r;
        i += 1;
    }
    table
}

static CRC_TABLE: [u32; 256] = build_table();

/// Feed `data` into a running checksum.
pub fn update(mut crc: u32, data: &[u8]) -> u32 {
    for &byte in data {
        crc = (crc << 8) ^ CRC_TABLE[(((crc >> 24) as u8) ^ byte) as usize];
    }
    crc
}

/// Checksum of a contiguous buffer.
pub fn checksum(data: &[u8]) -> u32 {
    update(0, data)
}
