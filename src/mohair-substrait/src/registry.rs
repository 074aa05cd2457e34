//! Type-keyed translator registry.
//!
//! The compiler looks up a [`RelTranslator`] by the concrete type of the table
//! descriptor it is given. Registration is explicit: build a registry, call
//! [`register_mohair_translators`] (and any others) at startup, and hand the
//! registry to a [`SubstraitCompiler`].

use std::any::{Any, TypeId, type_name};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use log::debug;

use common_error::{MohairError, MohairResult};

use crate::compiler::SubstraitCompiler;
use crate::encoder::ExtensionRelationEncoder;
use crate::proto::substrait::Rel;
use crate::table::{SkyTable, TableDescriptor};

/// Free-form keyword configuration passed through to translators.
pub type Kwargs = BTreeMap<String, serde_json::Value>;

/// Translates one kind of table descriptor into a relation.
pub trait RelTranslator: Send + Sync {
    /// Translate `table`. `compiler` is the calling compiler, when there is one.
    fn translate(
        &self,
        table: &dyn TableDescriptor,
        compiler: Option<&SubstraitCompiler>,
        kwargs: &Kwargs,
    ) -> MohairResult<Rel>;
}

impl<F> RelTranslator for F
where
    F: Fn(&dyn TableDescriptor, Option<&SubstraitCompiler>, &Kwargs) -> MohairResult<Rel>
        + Send
        + Sync,
{
    fn translate(
        &self,
        table: &dyn TableDescriptor,
        compiler: Option<&SubstraitCompiler>,
        kwargs: &Kwargs,
    ) -> MohairResult<Rel> {
        self(table, compiler, kwargs)
    }
}

/// Translates [`SkyTable`]s into extension leaf relations.
///
/// When invoked by a compiler the compiler's encoder settings win; otherwise
/// the translator's own encoder is used.
#[derive(Debug, Clone, Default)]
pub struct SkyRelTranslator {
    encoder: ExtensionRelationEncoder,
}

impl SkyRelTranslator {
    /// Create a translator using `encoder` when called without a compiler.
    pub fn new(encoder: ExtensionRelationEncoder) -> Self {
        Self { encoder }
    }
}

impl RelTranslator for SkyRelTranslator {
    fn translate(
        &self,
        table: &dyn TableDescriptor,
        compiler: Option<&SubstraitCompiler>,
        _kwargs: &Kwargs,
    ) -> MohairResult<Rel> {
        let partition = table.partition().ok_or_else(|| {
            MohairError::invalid_state(format!("table '{}' is not backed by a partition", table.name()))
        })?;

        let encoder = compiler.map_or(&self.encoder, SubstraitCompiler::encoder);
        encoder.encode(partition)
    }
}

struct Registration {
    type_name: &'static str,
    translator: Arc<dyn RelTranslator>,
}

/// Maps table descriptor types to their translators.
#[derive(Default)]
pub struct TranslatorRegistry {
    translators: HashMap<TypeId, Registration>,
}

impl TranslatorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `translator` for table descriptors of type `T`.
    ///
    /// Returns the translator previously registered for `T`, if any.
    pub fn register<T, R>(&mut self, translator: R) -> Option<Arc<dyn RelTranslator>>
    where
        T: TableDescriptor + Any,
        R: RelTranslator + 'static,
    {
        let type_name = type_name::<T>();
        debug!("Registering translator for {type_name}");

        self.translators
            .insert(
                TypeId::of::<T>(),
                Registration {
                    type_name,
                    translator: Arc::new(translator),
                },
            )
            .map(|previous| previous.translator)
    }

    /// Translator for the concrete type of `table`.
    pub fn get(&self, table: &dyn TableDescriptor) -> Option<&Arc<dyn RelTranslator>> {
        self.translators
            .get(&table.as_any().type_id())
            .map(|registration| &registration.translator)
    }

    /// Whether a translator is registered for `T`.
    pub fn contains<T: TableDescriptor + Any>(&self) -> bool {
        self.translators.contains_key(&TypeId::of::<T>())
    }

    /// Names of the registered table descriptor types, sorted.
    pub fn registered_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.translators.values().map(|r| r.type_name).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered translators.
    pub fn len(&self) -> usize {
        self.translators.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.translators.is_empty()
    }
}

impl fmt::Debug for TranslatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslatorRegistry")
            .field("types", &self.registered_types())
            .finish()
    }
}

/// Register the translators for mohair's table descriptors.
pub fn register_mohair_translators(registry: &mut TranslatorRegistry) {
    registry.register::<SkyTable, _>(SkyRelTranslator::default());
}
