use std::{collections::HashSet, fmt, str::FromStr};

use proc_macro2::Span;
use strum::IntoEnumIterator;
use syn::LitStr;
use tracing::debug;

use crate::{
    AnnotationKind, DEFAULT_ALGORITHM, DEFAULT_BLOCK_MODE, DEFAULT_KEY_SIZE, DEFAULT_PADDING_MODE,
    Element, ElementKind, EntryError, PaddingMode, SymEncEntry, SymEncKey, ValidationReport,
    cipher::vocabulary,
};

/// Checks that an element annotated with `sym_encrypt` can have a companion generated for it.
#[derive(Clone, Copy, Debug, Default)]
pub struct SymEncValidator;

/// Effective value of a member, along with where it came from (`None` for defaults). A value
/// of `None` means the member was supplied but couldn't be understood.
struct Setting<T> {
    value: Option<T>,
    span: Option<Span>,
}

impl<T> Setting<T> {
    fn defaulted(value: T) -> Self {
        Self {
            value: Some(value),
            span: None,
        }
    }
}

impl SymEncValidator {
    /// Validate `element` and its `sym_encrypt` annotation. Every problem found is recorded,
    /// rather than stopping at the first.
    pub fn validate_annotation_parameter<'e>(
        &self,
        element: &'e Element,
    ) -> ValidationReport<&'e Element> {
        let mut report = ValidationReport::about(element, Some(element.span()));

        match element.kind() {
            ElementKind::Struct => {}
            kind => report.add_error(
                format!("annotation applies only to structs, found {kind}"),
                None,
            ),
        }

        if !element.generics().params.is_empty() {
            report.add_error(
                "annotation cannot be applied to a generic struct, the companion must be able to \
                 name the type without parameters",
                None,
            );
        }

        let Some(mirror) = element.get_annotation_mirror(AnnotationKind::SymEncrypt) else {
            report.add_error(
                format!(
                    "`{}` annotation not found on `{}`",
                    AnnotationKind::SymEncrypt,
                    element.simple_name()
                ),
                None,
            );
            return report;
        };

        let mut algorithm = Setting::defaulted(DEFAULT_ALGORITHM);
        let mut block_mode = Setting::defaulted(DEFAULT_BLOCK_MODE);
        let mut padding_mode = Setting::defaulted(DEFAULT_PADDING_MODE);
        let mut key_size = Setting::defaulted(DEFAULT_KEY_SIZE);

        let mut seen = HashSet::new();

        for entry in mirror.entries() {
            let entry = match SymEncEntry::from_entry(entry) {
                Ok(entry) => entry,
                Err(e @ EntryError::Unknown(_)) => {
                    report.add_warning(format!("{e}, it will be ignored"), Some(e.span()));
                    continue;
                }
                Err(e) => {
                    report.add_error(e.to_string(), Some(e.span()));
                    continue;
                }
            };

            if !seen.insert(entry.key()) {
                report.add_error(
                    format!("`{}` is specified more than once", entry.key()),
                    Some(entry.span()),
                );
                continue;
            }

            match entry {
                SymEncEntry::Algorithm(lit) => {
                    algorithm = parse_setting(&mut report, SymEncKey::Algorithm, &lit);
                }
                SymEncEntry::BlockMode(lit) => {
                    block_mode = parse_setting(&mut report, SymEncKey::BlockMode, &lit);
                }
                SymEncEntry::PaddingMode(lit) => {
                    padding_mode = parse_setting(&mut report, SymEncKey::PaddingMode, &lit);
                }
                SymEncEntry::KeySize(lit) => {
                    key_size = Setting {
                        value: SymEncEntry::key_size(&lit)
                            .inspect_err(|e| report.add_error(e.to_string(), Some(e.span())))
                            .ok(),
                        span: Some(lit.span()),
                    };
                }
            }
        }

        if let (Some(alg), Some(size)) = (algorithm.value, key_size.value)
            && !alg.supports_key_size(size)
        {
            let supported = alg
                .key_sizes()
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(", ");

            report.add_error(
                format!("unsupported {alg} key size {size}, expected one of: {supported}"),
                key_size.span.or(Some(mirror.span())),
            );
        }

        if let (Some(mode), Some(padding)) = (block_mode.value, padding_mode.value)
            && mode.requires_no_padding()
            && padding != PaddingMode::NoPadding
        {
            report.add_error(
                format!(
                    "block mode {mode} requires {}, found {padding}",
                    PaddingMode::NoPadding
                ),
                padding_mode
                    .span
                    .or(block_mode.span)
                    .or(Some(mirror.span())),
            );
        }

        if let (Some(alg), Some(mode)) = (algorithm.value, block_mode.value)
            && mode.requires_128_bit_block()
            && alg.block_bits() != 128
        {
            report.add_error(
                format!(
                    "block mode {mode} requires a 128-bit block cipher, {alg} has a {}-bit block",
                    alg.block_bits()
                ),
                block_mode
                    .span
                    .or(algorithm.span)
                    .or(Some(mirror.span())),
            );
        }

        debug!(
            element = %element.ident(),
            clean = report.is_clean(),
            diagnostics = report.items().len(),
            "validated sym_encrypt annotation"
        );

        report
    }
}

/// Parse a textual member against its vocabulary, reporting anything unrecognised.
fn parse_setting<T>(
    report: &mut ValidationReport<&Element>,
    key: SymEncKey,
    lit: &LitStr,
) -> Setting<T>
where
    T: FromStr + IntoEnumIterator + fmt::Display,
{
    let value = T::from_str(&lit.value()).ok();

    if value.is_none() {
        report.add_error(
            format!(
                "unsupported {key} `{}`, expected one of: {}",
                lit.value(),
                vocabulary::<T>()
            ),
            Some(lit.span()),
        );
    }

    Setting {
        value,
        span: Some(lit.span()),
    }
}
