use std::str::FromStr;

use proc_macro2::Span;
use strum::{Display, EnumIter, EnumString};
use syn::{Ident, LitInt, LitStr};
use thiserror::Error;

use crate::{AnnotationEntry, AnnotationValue, SymEncParaBuilder};

/// Members declared by the `sym_encrypt` annotation.
#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum SymEncKey {
    Algorithm,
    #[strum(to_string = "block_mode", serialize = "blockMode")]
    BlockMode,
    #[strum(to_string = "padding_mode", serialize = "paddingMode")]
    PaddingMode,
    #[strum(to_string = "key_size", serialize = "keySize")]
    KeySize,
}

impl SymEncKey {
    fn expected(self) -> &'static str {
        match self {
            SymEncKey::KeySize => "an integer literal",
            _ => "a string literal",
        }
    }
}

#[derive(Debug, Error)]
pub enum EntryError {
    #[error("unrecognised annotation member `{0}`")]
    Unknown(Ident),

    #[error("`{key}` expects {expected}")]
    Type {
        key: SymEncKey,
        expected: &'static str,
        span: Span,
    },

    #[error("`{key}` must fit in an unsigned 32-bit integer")]
    OutOfRange { key: SymEncKey, span: Span },
}

impl EntryError {
    /// Location the error should be reported at.
    pub fn span(&self) -> Span {
        match self {
            EntryError::Unknown(ident) => ident.span(),
            EntryError::Type { span, .. } | EntryError::OutOfRange { span, .. } => *span,
        }
    }
}

/// A `sym_encrypt` annotation entry, with its value checked against the member's type.
#[derive(Clone)]
pub enum SymEncEntry {
    Algorithm(LitStr),
    BlockMode(LitStr),
    PaddingMode(LitStr),
    KeySize(LitInt),
}

impl SymEncEntry {
    pub fn from_entry(entry: &AnnotationEntry) -> Result<Self, EntryError> {
        let key = SymEncKey::from_str(&entry.name().to_string())
            .map_err(|_| EntryError::Unknown(entry.name().clone()))?;

        let type_error = || EntryError::Type {
            key,
            expected: key.expected(),
            span: entry.value().span(),
        };

        Ok(match (key, entry.value().clone()) {
            (SymEncKey::Algorithm, AnnotationValue::Str(lit)) => SymEncEntry::Algorithm(lit),
            (SymEncKey::BlockMode, AnnotationValue::Str(lit)) => SymEncEntry::BlockMode(lit),
            (SymEncKey::PaddingMode, AnnotationValue::Str(lit)) => SymEncEntry::PaddingMode(lit),
            (SymEncKey::KeySize, AnnotationValue::Int(lit)) => SymEncEntry::KeySize(lit),
            _ => return Err(type_error()),
        })
    }

    pub fn key(&self) -> SymEncKey {
        match self {
            SymEncEntry::Algorithm(_) => SymEncKey::Algorithm,
            SymEncEntry::BlockMode(_) => SymEncKey::BlockMode,
            SymEncEntry::PaddingMode(_) => SymEncKey::PaddingMode,
            SymEncEntry::KeySize(_) => SymEncKey::KeySize,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            SymEncEntry::Algorithm(lit)
            | SymEncEntry::BlockMode(lit)
            | SymEncEntry::PaddingMode(lit) => lit.span(),
            SymEncEntry::KeySize(lit) => lit.span(),
        }
    }

    /// Numeric value of a `key_size` entry.
    pub(crate) fn key_size(lit: &LitInt) -> Result<u32, EntryError> {
        lit.base10_parse().map_err(|_| EntryError::OutOfRange {
            key: SymEncKey::KeySize,
            span: lit.span(),
        })
    }

    /// Route the value to the matching builder setter.
    pub fn apply<'e>(
        self,
        builder: SymEncParaBuilder<'e>,
    ) -> Result<SymEncParaBuilder<'e>, EntryError> {
        Ok(match self {
            SymEncEntry::Algorithm(lit) => builder.set_algorithm(lit.value()),
            SymEncEntry::BlockMode(lit) => builder.set_block_mode(lit.value()),
            SymEncEntry::PaddingMode(lit) => builder.set_padding_mode(lit.value()),
            SymEncEntry::KeySize(lit) => builder.set_key_size(Self::key_size(&lit)?),
        })
    }
}
