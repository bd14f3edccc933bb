mod hello_world;
mod sym_enc;

use thiserror::Error;

use crate::{AnnotationKind, BuildError, Element, EntryError, Filer, Messager};

pub use self::{hello_world::HelloWorldProcessingStep, sym_enc::SymEncProcessingStep};

/// Elements discovered by the host for one round, grouped by the annotation they carry.
/// Iteration follows insertion order.
#[derive(Clone, Default)]
pub struct ElementsByAnnotation {
    entries: Vec<(AnnotationKind, Element)>,
}

impl ElementsByAnnotation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: AnnotationKind, element: Element) {
        self.entries.push((kind, element));
    }

    /// Elements carrying `kind`.
    pub fn get(&self, kind: AnnotationKind) -> impl Iterator<Item = &Element> {
        self.entries
            .iter()
            .filter(move |(entry_kind, _)| *entry_kind == kind)
            .map(|(_, element)| element)
    }

    pub fn contains_key(&self, kind: AnnotationKind) -> bool {
        self.entries.iter().any(|(entry_kind, _)| *entry_kind == kind)
    }

    pub fn values(&self) -> impl Iterator<Item = &Element> {
        self.entries.iter().map(|(_, element)| element)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(AnnotationKind, Element)> for ElementsByAnnotation {
    fn from_iter<T: IntoIterator<Item = (AnnotationKind, Element)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Host services available to a step while it processes a round. Neither may be retained past
/// the round.
pub struct ProcessingEnv<'h> {
    pub messager: &'h mut dyn Messager,
    pub filer: &'h mut dyn Filer,
}

impl<'h> ProcessingEnv<'h> {
    pub fn new(messager: &'h mut dyn Messager, filer: &'h mut dyn Filer) -> Self {
        Self { messager, filer }
    }
}

/// Binds one annotation kind to the extract, validate and generate pipeline.
pub trait ProcessingStep {
    /// Annotations this step claims.
    fn annotations(&self) -> &'static [AnnotationKind];

    /// Process every element of the round carrying one of [`Self::annotations`]. Returns the
    /// elements which should be deferred to a later round.
    fn process<'e>(
        &self,
        elements_by_annotation: &'e ElementsByAnnotation,
        env: &mut ProcessingEnv<'_>,
    ) -> Vec<&'e Element>;
}

/// Failure to turn an annotation into a parameter model.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Entry(#[from] EntryError),

    #[error(transparent)]
    Build(#[from] BuildError),
}
