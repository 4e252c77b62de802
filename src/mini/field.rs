//! Miniature prime field arithmetic (mod 65167)
//!
//! A 16-bit analogue of the secp256k1 field, small enough that protocol
//! properties can be swept over large input ranges. Clarity beats
//! constant-time here: arithmetic branches and uses plain `%`.

/// The mini field prime, 65167 = 3 mod 4.
pub const MODULUS: u16 = 65167;

/// Element of the 16-bit field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldElement {
    pub v: u16,
}

impl FieldElement {
    pub const ZERO: Self = Self { v: 0 };
    pub const ONE: Self = Self { v: 1 };

    /// Reduce an arbitrary u16 into the field.
    #[inline]
    pub fn new(val: u16) -> Self {
        Self { v: val % MODULUS }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.v == 0
    }

    pub fn add(&self, other: &Self) -> Self {
        let sum = self.v as u32 + other.v as u32;
        Self {
            v: (sum % MODULUS as u32) as u16,
        }
    }

    pub fn sub(&self, other: &Self) -> Self {
        let diff = self.v as i32 - other.v as i32;
        let diff = if diff < 0 { diff + MODULUS as i32 } else { diff };
        Self { v: diff as u16 }
    }

    pub fn neg(&self) -> Self {
        Self::ZERO.sub(self)
    }

    pub fn mul(&self, other: &Self) -> Self {
        let prod = self.v as u32 * other.v as u32;
        Self {
            v: (prod % MODULUS as u32) as u16,
        }
    }

    #[inline]
    pub fn sqr(&self) -> Self {
        self.mul(self)
    }

    /// Square-and-multiply exponentiation.
    pub fn pow(&self, mut e: u16) -> Self {
        let mut result = Self::ONE;
        let mut base = *self;
        while e != 0 {
            if e & 1 == 1 {
                result = result.mul(&base);
            }
            base = base.sqr();
            e >>= 1;
        }
        result
    }

    /// Square root via x^((p+1)/4) (p = 3 mod 4). None for non-residues.
    pub fn sqrt(&self) -> Option<Self> {
        let root = self.pow((MODULUS + 1) / 4);
        if root.sqr() == *self {
            Some(root)
        } else {
            None
        }
    }

    /// Multiplicative inverse; zero maps to zero.
    pub fn recip(&self) -> Self {
        Self {
            v: recip_mod(self.v, MODULUS),
        }
    }
}

/// Modular inverse by the extended Euclidean algorithm. Returns 0 for a
/// zero input; `modulus` must be prime for the result to be an inverse.
pub fn recip_mod(value: u16, modulus: u16) -> u16 {
    debug_assert!(value < modulus);
    let mut r0 = value as i32;
    let mut r1 = modulus as i32;
    let mut x0 = 1i32;
    let mut x1 = 0i32;
    while r1 > 0 {
        let q = r0 / r1;
        let r = r0 - q * r1;
        let x = x0 - q * x1;
        r0 = r1;
        r1 = r;
        x0 = x1;
        x1 = x;
    }
    if x0 < 0 {
        (x0 + modulus as i32) as u16
    } else {
        x0 as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_sub() {
        let a = FieldElement::new(65000);
        let b = FieldElement::new(1000);
        assert_eq!(a.add(&b), FieldElement::new(833)); // 66000 - 65167
        assert_eq!(b.sub(&a), FieldElement::new(1167)); // 1000 - 65000 + 65167
    }

    #[test]
    fn test_neg() {
        let a = FieldElement::new(123);
        assert_eq!(a.add(&a.neg()), FieldElement::ZERO);
        assert_eq!(FieldElement::ZERO.neg(), FieldElement::ZERO);
    }

    #[test]
    fn test_recip_known() {
        // 3^-1 mod 65167 = 43445
        let a = FieldElement::new(3);
        assert_eq!(a.recip(), FieldElement::new(43445));
        assert_eq!(a.mul(&a.recip()), FieldElement::ONE);
    }

    #[test]
    fn test_recip_sweep() {
        for v in (1u16..MODULUS).step_by(257) {
            let a = FieldElement::new(v);
            assert_eq!(a.mul(&a.recip()), FieldElement::ONE, "v = {}", v);
        }
    }

    #[test]
    fn test_sqrt_roundtrip() {
        for v in (1u16..2000).step_by(37) {
            let a = FieldElement::new(v);
            let square = a.sqr();
            let root = square.sqrt().expect("square must have a root");
            assert!(root == a || root == a.neg());
        }
    }

    #[test]
    fn test_modulus_is_3_mod_4() {
        assert_eq!(MODULUS % 4, 3);
    }
}
