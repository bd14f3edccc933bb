//! Annotation-driven source generation pipeline behind the `companion` attribute macros.
//!
//! Each annotation kind is bound to a [`ProcessingStep`], which walks the elements delivered by
//! the host for one round through extraction, validation and generation. The host is abstracted
//! behind [`Messager`] (diagnostics) and [`Filer`] (emitted units), so the same pipeline drives
//! both the proc-macro adapter and in-memory test hosts.

mod cipher;
mod element;
mod generator;
mod host;
mod mirror;
mod para;
mod processor;
mod report;
mod schema;
mod step;
mod validator;

pub use self::{
    cipher::{Algorithm, BlockMode, PaddingMode},
    element::{Element, ElementKind, ModulePath, types_in},
    generator::{
        GeneratedTypeName, GenerationFailure, HelloWorldGenerator, SourceFileGenerationError,
        SourceFileGenerator, SymEncGenerator, TypeBuilder, UnitEmitter,
    },
    host::{CollectingMessager, Filer, FilerError, MemoryFiler, Messager},
    mirror::{AnnotationEntry, AnnotationKind, AnnotationMirror, AnnotationValue},
    para::{
        BuildError, DEFAULT_ALGORITHM, DEFAULT_BLOCK_MODE, DEFAULT_KEY_SIZE, DEFAULT_PADDING_MODE,
        HelloWorldPara, HelloWorldParaBuilder, SymEncPara, SymEncParaBuilder,
    },
    processor::Processor,
    report::{Diagnostic, Kind, ValidationReport},
    schema::{EntryError, SymEncEntry, SymEncKey},
    step::{
        ElementsByAnnotation, ExtractError, HelloWorldProcessingStep, ProcessingEnv,
        ProcessingStep, SymEncProcessingStep,
    },
    validator::SymEncValidator,
};
