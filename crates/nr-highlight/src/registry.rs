//! Grammar registration.
//!
//! A [`GrammarEngine`] collects grammars from [`LoaderFn`]s and is frozen into
//! a read-only [`GrammarRegistry`] before the first code block is rendered.
//! Registration is a one-shot, ordered setup step: loaders run exactly once,
//! in the order given, and a loader that depends on another grammar must be
//! listed after it.

use std::collections::{BTreeMap, HashSet};

use syntect::parsing::{SyntaxDefinition, SyntaxReference, SyntaxSet, SyntaxSetBuilder};

/// Key of the grammar used for unknown languages.
pub const PLAIN: &str = "plain";

/// Name of the engine's built-in plain text syntax.
pub const PLAIN_TEXT_SYNTAX: &str = "Plain Text";

/// Installs one language's grammar into the engine.
pub type LoaderFn = fn(&mut GrammarEngine);

/// Error raised when freezing an engine into a registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No grammar was registered under [`PLAIN`].
    #[error("grammar registry has no \"{PLAIN}\" grammar; register a plain loader before rendering")]
    MissingPlainGrammar,
}

/// Mutable grammar table used during setup.
///
/// Starts from the engine's bundled syntaxes. Keys map to syntax names; the
/// syntax set itself is only assembled in [`freeze`](Self::freeze).
pub struct GrammarEngine {
    builder: SyntaxSetBuilder,
    keys: BTreeMap<String, String>,
    defined: HashSet<String>,
}

impl Default for GrammarEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GrammarEngine {
    /// Create an engine seeded with the bundled syntaxes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: SyntaxSet::load_defaults_newlines().into_builder(),
            keys: BTreeMap::new(),
            defined: HashSet::new(),
        }
    }

    /// Create an engine with no syntaxes at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            builder: SyntaxSetBuilder::new(),
            keys: BTreeMap::new(),
            defined: HashSet::new(),
        }
    }

    /// Apply each loader once, in order.
    pub fn register(&mut self, loaders: &[LoaderFn]) -> &mut Self {
        for load in loaders {
            load(self);
        }
        self
    }

    /// Parse a sublime-syntax grammar and register it under `key`.
    ///
    /// A grammar that fails to parse is skipped with a warning. Defining the
    /// same key twice keeps the first definition.
    pub fn define(&mut self, key: &str, source: &str) -> &mut Self {
        if self.defined.contains(key) {
            tracing::debug!(key, "Grammar already defined, skipping");
            return self;
        }

        match SyntaxDefinition::load_from_str(source, true, Some(key)) {
            Ok(definition) => {
                tracing::debug!(key, syntax = %definition.name, "Defined grammar");
                self.keys.insert(key.to_owned(), definition.name.clone());
                self.defined.insert(key.to_owned());
                self.builder.add(definition);
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "Skipping grammar that failed to parse");
            }
        }
        self
    }

    /// Register `key` for a syntax already present in the engine, by syntax name.
    ///
    /// Unknown syntax names are skipped with a warning.
    pub fn alias(&mut self, key: &str, syntax_name: &str) -> &mut Self {
        if self.has_syntax(syntax_name) {
            tracing::debug!(key, syntax = syntax_name, "Registered grammar alias");
            self.keys.insert(key.to_owned(), syntax_name.to_owned());
        } else {
            tracing::warn!(key, syntax = syntax_name, "Skipping alias to unknown syntax");
        }
        self
    }

    /// Register `key` for the grammar already registered under `existing`.
    pub fn alias_key(&mut self, key: &str, existing: &str) -> &mut Self {
        if let Some(name) = self.keys.get(existing).cloned() {
            tracing::debug!(key, existing, "Registered grammar key alias");
            self.keys.insert(key.to_owned(), name);
        } else {
            tracing::warn!(key, existing, "Skipping alias to unregistered grammar key");
        }
        self
    }

    /// Add the engine's built-in plain text syntax unless one is present.
    pub fn ensure_plain_text(&mut self) -> &mut Self {
        if !self.has_syntax(PLAIN_TEXT_SYNTAX) {
            self.builder.add_plain_text_syntax();
        }
        self
    }

    fn has_syntax(&self, name: &str) -> bool {
        self.builder
            .syntaxes()
            .iter()
            .any(|syntax| syntax.name == name)
    }

    /// Whether `key` has been registered.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    /// Build the syntax set and freeze the key table.
    pub fn freeze(self) -> Result<GrammarRegistry, RegistryError> {
        if !self.keys.contains_key(PLAIN) {
            return Err(RegistryError::MissingPlainGrammar);
        }

        let syntaxes = self.builder.build();
        let mut grammars = BTreeMap::new();
        for (key, name) in self.keys {
            match syntaxes
                .syntaxes()
                .iter()
                .position(|syntax| syntax.name == name)
            {
                Some(index) => {
                    grammars.insert(key, index);
                }
                None => {
                    tracing::warn!(key = %key, syntax = %name, "Registered syntax missing after build");
                }
            }
        }

        let plain = grammars
            .get(PLAIN)
            .copied()
            .ok_or(RegistryError::MissingPlainGrammar)?;

        tracing::info!(
            grammars = grammars.len(),
            syntaxes = syntaxes.syntaxes().len(),
            "Grammar registry ready"
        );

        Ok(GrammarRegistry {
            syntaxes,
            grammars,
            plain,
        })
    }
}

/// Frozen language → grammar table.
///
/// Read-only after construction; share it behind an `Arc`.
pub struct GrammarRegistry {
    syntaxes: SyntaxSet,
    grammars: BTreeMap<String, usize>,
    plain: usize,
}

impl GrammarRegistry {
    /// Build a registry from the default loaders.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::MissingPlainGrammar` if the plain loader did not
    /// produce a grammar.
    pub fn with_defaults() -> Result<Self, RegistryError> {
        Self::from_loaders(crate::languages::DEFAULT_LOADERS)
    }

    /// Build a registry from the bundled syntaxes plus `loaders`.
    pub fn from_loaders(loaders: &[LoaderFn]) -> Result<Self, RegistryError> {
        let mut engine = GrammarEngine::new();
        engine.register(loaders);
        engine.freeze()
    }

    /// Whether `key` resolves to its own grammar.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.grammars.contains_key(key)
    }

    /// Registered language keys, sorted.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.grammars.keys().map(String::as_str)
    }

    /// Grammar registered under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SyntaxReference> {
        self.grammars
            .get(key)
            .map(|&index| &self.syntaxes.syntaxes()[index])
    }

    /// Grammar used for unknown languages.
    #[must_use]
    pub fn plain(&self) -> &SyntaxReference {
        &self.syntaxes.syntaxes()[self.plain]
    }

    /// Syntax set backing the registry.
    #[must_use]
    pub fn syntaxes(&self) -> &SyntaxSet {
        &self.syntaxes
    }
}

impl std::fmt::Debug for GrammarRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrammarRegistry")
            .field("grammars", &self.grammars.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
