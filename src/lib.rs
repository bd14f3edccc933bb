//! Attribute macros which generate companion types alongside annotated structs.
//!
//! - [`hello_world`] emits a `HelloWorld` type with a function printing the annotation's value.
//! - [`sym_encrypt`] emits a `<Name>SymEnc` companion describing a symmetric cipher
//!   configuration, and implements [`SymEncCompanion`] for the annotated struct.
//!
//! No cryptography is performed, the companion only carries the configuration.

use std::fmt;

pub use companion_macros::{hello_world, sym_encrypt};

/// Symmetric cipher configuration, as produced by `#[sym_encrypt]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CipherSpec {
    algorithm: &'static str,
    block_mode: &'static str,
    padding_mode: &'static str,
    key_size: u32,
}

impl CipherSpec {
    pub const fn new(
        algorithm: &'static str,
        block_mode: &'static str,
        padding_mode: &'static str,
        key_size: u32,
    ) -> Self {
        Self {
            algorithm,
            block_mode,
            padding_mode,
            key_size,
        }
    }

    pub const fn algorithm(&self) -> &'static str {
        self.algorithm
    }

    pub const fn block_mode(&self) -> &'static str {
        self.block_mode
    }

    pub const fn padding_mode(&self) -> &'static str {
        self.padding_mode
    }

    /// Key size, in bits.
    pub const fn key_size(&self) -> u32 {
        self.key_size
    }

    /// Key length in bytes, rounded up.
    pub const fn key_len_bytes(&self) -> usize {
        self.key_size.div_ceil(8) as usize
    }

    /// `algorithm/mode/padding`, as accepted by most cipher factories.
    pub fn transformation(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CipherSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.algorithm, self.block_mode, self.padding_mode)
    }
}

/// Implemented by `#[sym_encrypt]` for the annotated struct, linking it to its companion.
pub trait SymEncCompanion {
    /// Generated companion type.
    type Companion;

    /// Cipher configured through the annotation.
    const CIPHER: CipherSpec;
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;

    const AES: CipherSpec = CipherSpec::new("AES", "CBC", "PKCS5PADDING", 128);

    #[test]
    fn transformation() {
        assert_eq!(AES.transformation(), "AES/CBC/PKCS5PADDING");
    }

    #[test]
    fn key_len_bytes() {
        assert_eq!(AES.key_len_bytes(), 16);
        assert_eq!(CipherSpec::new("DES", "ECB", "NOPADDING", 56).key_len_bytes(), 7);
        assert_eq!(CipherSpec::new("DESede", "ECB", "NOPADDING", 168).key_len_bytes(), 21);
    }

    #[test]
    fn accessors() {
        assert_eq!(AES.algorithm(), "AES");
        assert_eq!(AES.block_mode(), "CBC");
        assert_eq!(AES.padding_mode(), "PKCS5PADDING");
        assert_eq!(AES.key_size(), 128);
    }

    proptest! {
        #[test]
        fn key_len_covers_key_size(key_size in 1u32..=4096) {
            let len = CipherSpec::new("AES", "CBC", "NOPADDING", key_size).key_len_bytes() as u32;

            prop_assert!(len * 8 >= key_size);
            prop_assert!(len * 8 < key_size + 8);
        }
    }
}
