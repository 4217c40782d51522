//! Per-run instruction registry.

use tstai_domain::{DeclarationOptions, DomainResult, TestDeclaration};

/// Ordered list of declarations collected while a test file is loaded.
///
/// One registry exists per run; it is handed to the loader and then drained
/// by the engine. Registration order is execution and reporting order.
#[derive(Debug, Default)]
pub struct InstructionRegistry {
    declarations: Vec<TestDeclaration>,
}

impl InstructionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            declarations: Vec::new(),
        }
    }

    /// Appends a declaration. Duplicates are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration is invalid.
    pub fn register(
        &mut self,
        instruction: impl Into<String>,
        options: DeclarationOptions,
    ) -> DomainResult<()> {
        let declaration = TestDeclaration::new(instruction, options)?;
        self.declarations.push(declaration);
        Ok(())
    }

    /// Appends an already validated declaration.
    pub fn push(&mut self, declaration: TestDeclaration) {
        self.declarations.push(declaration);
    }

    /// Takes every declaration in registration order, leaving the registry empty.
    pub fn drain(&mut self) -> Vec<TestDeclaration> {
        std::mem::take(&mut self.declarations)
    }

    /// Number of pending declarations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
