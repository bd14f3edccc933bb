use std::fmt;

use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Symmetric block ciphers a companion can be configured for.
#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, IntoStaticStr, PartialEq, Eq, Hash)]
#[strum(ascii_case_insensitive)]
pub enum Algorithm {
    #[strum(serialize = "AES")]
    Aes,
    #[strum(serialize = "DES")]
    Des,
    #[strum(serialize = "DESede")]
    DesEde,
}

impl Algorithm {
    /// Key sizes (in bits) accepted by the algorithm.
    pub fn key_sizes(self) -> &'static [u32] {
        match self {
            Algorithm::Aes => &[128, 192, 256],
            Algorithm::Des => &[56],
            Algorithm::DesEde => &[112, 168],
        }
    }

    /// Block size of the cipher, in bits.
    pub fn block_bits(self) -> u32 {
        match self {
            Algorithm::Aes => 128,
            Algorithm::Des | Algorithm::DesEde => 64,
        }
    }

    pub fn supports_key_size(self, key_size: u32) -> bool {
        self.key_sizes().contains(&key_size)
    }
}

#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, IntoStaticStr, PartialEq, Eq, Hash)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum BlockMode {
    Ecb,
    Cbc,
    Cfb,
    Ofb,
    Ctr,
    Gcm,
}

impl BlockMode {
    /// Counter based modes operate as stream ciphers and can't be padded.
    pub fn requires_no_padding(self) -> bool {
        matches!(self, BlockMode::Ctr | BlockMode::Gcm)
    }

    /// GCM is only defined over 128-bit block ciphers.
    pub fn requires_128_bit_block(self) -> bool {
        matches!(self, BlockMode::Gcm)
    }
}

#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, IntoStaticStr, PartialEq, Eq, Hash)]
#[strum(ascii_case_insensitive)]
pub enum PaddingMode {
    #[strum(serialize = "NOPADDING")]
    NoPadding,
    #[strum(serialize = "PKCS5PADDING")]
    Pkcs5Padding,
    #[strum(serialize = "ISO10126PADDING")]
    Iso10126Padding,
}

/// Comma separated list of every accepted spelling, for diagnostics.
pub(crate) fn vocabulary<T: IntoEnumIterator + fmt::Display>() -> String {
    T::iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
