use thiserror::Error;

use crate::{Diagnostic, GeneratedTypeName, Kind};

/// Diagnostic channel of the host compiler.
pub trait Messager {
    fn print_message(&mut self, diagnostic: Diagnostic);
}

/// Source emission service of the host compiler.
pub trait Filer {
    /// Persist a finished compilation unit under `name`. Each name may only be written once.
    fn write_source(
        &mut self,
        name: &GeneratedTypeName,
        unit: syn::File,
    ) -> Result<(), FilerError>;
}

#[derive(Debug, Error)]
pub enum FilerError {
    #[error("a unit named `{0}` has already been written")]
    Duplicate(GeneratedTypeName),
}

/// [`Messager`] which keeps every diagnostic in the order it was reported.
#[derive(Debug, Default)]
pub struct CollectingMessager {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingMessager {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.kind == Kind::Error)
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl Messager for CollectingMessager {
    fn print_message(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// [`Filer`] holding units in memory, in the order they were written.
#[derive(Default)]
pub struct MemoryFiler {
    units: Vec<(GeneratedTypeName, syn::File)>,
}

impl MemoryFiler {
    pub fn get(&self, name: &GeneratedTypeName) -> Option<&syn::File> {
        self.units
            .iter()
            .find_map(|(written, unit)| (written == name).then_some(unit))
    }

    pub fn units(&self) -> &[(GeneratedTypeName, syn::File)] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn into_units(self) -> Vec<(GeneratedTypeName, syn::File)> {
        self.units
    }
}

impl Filer for MemoryFiler {
    fn write_source(
        &mut self,
        name: &GeneratedTypeName,
        unit: syn::File,
    ) -> Result<(), FilerError> {
        if self.get(name).is_some() {
            return Err(FilerError::Duplicate(name.clone()));
        }

        self.units.push((name.clone(), unit));

        Ok(())
    }
}
