//! Keccak-256 implementation (original Keccak padding, as used by Ethereum)
//!
//! Rate 1088 bits, capacity 512 bits, 24 rounds. The domain-separation byte
//! is 0x01, predating the 0x06 that NIST standardized for SHA3-256; every
//! other detail of the permutation is identical.

const BLOCK_SIZE: usize = 136;
const NUM_ROUNDS: usize = 24;

// Lane source index per position, fused rho/pi step
const PERMUTATION: [usize; 25] = [
    0, 6, 12, 18, 24, //
    3, 9, 10, 16, 22, //
    1, 7, 13, 19, 20, //
    4, 5, 11, 17, 23, //
    2, 8, 14, 15, 21,
];

// Left-rotation amount per position
const ROTATION: [u32; 25] = [
    0, 44, 43, 21, 14, //
    28, 20, 3, 45, 61, //
    1, 6, 25, 8, 18, //
    27, 36, 10, 15, 56, //
    62, 55, 39, 41, 2,
];

/// Streaming Keccak-256 context
pub struct Keccak256 {
    state: [u64; 25],
    block_off: usize,
}

impl Keccak256 {
    pub fn new() -> Self {
        Self {
            state: [0u64; 25],
            block_off: 0,
        }
    }

    /// Absorb message bytes, permuting whenever a full 136-byte block has
    /// been XORed in.
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.state[self.block_off >> 3] ^= (byte as u64) << ((self.block_off & 7) << 3);
            self.block_off += 1;
            if self.block_off == BLOCK_SIZE {
                keccak_f(&mut self.state);
                self.block_off = 0;
            }
        }
    }

    /// Pad (0x01 ... 0x80), run the final permutation, and squeeze out the
    /// first 32 bytes of the state in little-endian lane order.
    pub fn finalize(mut self) -> [u8; 32] {
        self.state[self.block_off >> 3] ^= 0x01u64 << ((self.block_off & 7) << 3);
        let last = BLOCK_SIZE - 1;
        self.state[last >> 3] ^= 0x80u64 << ((last & 7) << 3);
        keccak_f(&mut self.state);

        let mut out = [0u8; 32];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = (self.state[i >> 3] >> ((i & 7) << 3)) as u8;
        }
        out
    }
}

impl Default for Keccak256 {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the Keccak-256 digest of a message
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize()
}

/// Keccak-f[1600] permutation. The iota round constants come from the
/// degree-8 LFSR (x^8 + x^6 + x^5 + x^4 + 1), seven bits per round.
fn keccak_f(a: &mut [u64; 25]) {
    let mut r = 1u8;
    for _ in 0..NUM_ROUNDS {
        // Theta
        let mut c = [0u64; 5];
        for j in 0..5 {
            for k in (0..25).step_by(5) {
                c[j] ^= a[j + k];
            }
        }
        for j in 0..5 {
            let d = c[(j + 4) % 5] ^ c[(j + 1) % 5].rotate_left(1);
            for k in (0..25).step_by(5) {
                a[j + k] ^= d;
            }
        }

        // Rho and pi
        let mut b = [0u64; 25];
        for j in 0..25 {
            b[j] = a[PERMUTATION[j]].rotate_left(ROTATION[j]);
        }

        // Chi
        for j in 0..5 {
            for k in (0..25).step_by(5) {
                a[j + k] = b[j + k] ^ (!b[(j + 1) % 5 + k] & b[(j + 2) % 5 + k]);
            }
        }

        // Iota
        for j in 0..7 {
            a[0] ^= ((r & 1) as u64) << ((1u32 << j) - 1);
            r = (r << 1) ^ ((r >> 7) * 0x71);
        }
    }
}
