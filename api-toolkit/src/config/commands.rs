//! Ordered registry of artifact generators
//!
//! The registry decides dispatch order: the orchestrator walks it front to
//! back and runs every generator whose kind is selected. Kinds without an
//! entry are never generated, even when selected.

use std::fmt;
use std::sync::Arc;

use crate::artifact::ArtifactKind;
use crate::generators::{
    ArtifactGenerator, ClassGenerator, MigrationGenerator, RoutesGenerator, StubRenderer,
};

/// Generators keyed by kind, in dispatch order
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<(ArtifactKind, Box<dyn ArtifactGenerator>)>,
}

impl CommandRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard registry: one generator per kind in [`ArtifactKind::ALL`]
    /// order, except `soft-delete` which the model and migration read instead
    #[must_use]
    pub fn standard(renderer: &Arc<StubRenderer>) -> Self {
        let class = |kind: ArtifactKind, stub: &'static str| ClassGenerator::new(kind, stub, Arc::clone(renderer));

        Self::new()
            .with(ArtifactKind::Model, class(ArtifactKind::Model, "model"))
            .with(
                ArtifactKind::Migration,
                MigrationGenerator::new(Arc::clone(renderer)),
            )
            .with(ArtifactKind::Factory, class(ArtifactKind::Factory, "factory"))
            .with(ArtifactKind::Seeder, class(ArtifactKind::Seeder, "seeder"))
            .with(ArtifactKind::Filter, class(ArtifactKind::Filter, "filter"))
            .with(
                ArtifactKind::CreateRequest,
                class(ArtifactKind::CreateRequest, "request"),
            )
            .with(
                ArtifactKind::UpdateRequest,
                class(ArtifactKind::UpdateRequest, "request"),
            )
            .with(ArtifactKind::Resource, class(ArtifactKind::Resource, "resource"))
            .with(
                ArtifactKind::Controller,
                class(ArtifactKind::Controller, "controller"),
            )
            .with(ArtifactKind::Test, class(ArtifactKind::Test, "test"))
            .with(ArtifactKind::Routes, RoutesGenerator::new(Arc::clone(renderer)))
    }

    /// Register `generator` for `kind`
    ///
    /// A kind registered twice keeps its original position and takes the
    /// newer generator.
    pub fn register(
        &mut self,
        kind: ArtifactKind,
        generator: impl ArtifactGenerator + 'static,
    ) -> &mut Self {
        let boxed: Box<dyn ArtifactGenerator> = Box::new(generator);
        if let Some(slot) = self.commands.iter_mut().find(|(k, _)| *k == kind) {
            slot.1 = boxed;
        } else {
            self.commands.push((kind, boxed));
        }
        self
    }

    /// Builder-style [`register`](Self::register)
    #[must_use]
    pub fn with(mut self, kind: ArtifactKind, generator: impl ArtifactGenerator + 'static) -> Self {
        self.register(kind, generator);
        self
    }

    /// Registered generators in dispatch order
    pub fn commands(&self) -> impl Iterator<Item = (ArtifactKind, &dyn ArtifactGenerator)> + '_ {
        self.commands
            .iter()
            .map(|(kind, generator)| (*kind, generator.as_ref()))
    }

    /// Registered kinds in dispatch order
    #[must_use]
    pub fn kinds(&self) -> Vec<ArtifactKind> {
        self.commands.iter().map(|(kind, _)| *kind).collect()
    }

    /// Number of registered generators
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::GeneratedFile;
    use crate::request::GenerationRequest;

    fn noop(_: &GenerationRequest) -> anyhow::Result<Vec<GeneratedFile>> {
        Ok(Vec::new())
    }

    #[test]
    fn test_standard_registry_order() {
        let renderer = Arc::new(StubRenderer::new().unwrap());
        let registry = CommandRegistry::standard(&renderer);

        let expected: Vec<_> = ArtifactKind::ALL
            .into_iter()
            .filter(|kind| *kind != ArtifactKind::SoftDelete)
            .collect();
        assert_eq!(registry.kinds(), expected);
        assert_eq!(registry.len(), 11);
    }

    #[test]
    fn test_register_keeps_position() {
        let mut registry = CommandRegistry::new();
        registry
            .register(ArtifactKind::Model, noop)
            .register(ArtifactKind::Routes, noop)
            .register(ArtifactKind::Model, noop);

        assert_eq!(registry.kinds(), vec![ArtifactKind::Model, ArtifactKind::Routes]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = CommandRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.commands().count(), 0);
    }
}
