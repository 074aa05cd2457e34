//! Compiling table descriptors into Substrait plans.

use log::debug;

use common_config::EncoderConfig;
use common_error::{MohairError, MohairResult};

use crate::encoder::ExtensionRelationEncoder;
use crate::proto::substrait::{Plan, PlanRel, Rel, RelRoot, plan_rel};
use crate::registry::{Kwargs, TranslatorRegistry, register_mohair_translators};
use crate::table::TableDescriptor;

/// Compiles table descriptors into relations and plans.
///
/// The compiler owns its translator registry; nothing is registered implicitly.
#[derive(Debug)]
pub struct SubstraitCompiler {
    registry: TranslatorRegistry,
    encoder: ExtensionRelationEncoder,
}

impl SubstraitCompiler {
    /// Create a compiler dispatching through `registry`.
    pub fn new(registry: TranslatorRegistry, config: &EncoderConfig) -> Self {
        Self {
            registry,
            encoder: ExtensionRelationEncoder::new(config),
        }
    }

    /// Create a compiler with mohair's translators registered.
    pub fn with_mohair_translators(config: &EncoderConfig) -> Self {
        let mut registry = TranslatorRegistry::new();
        register_mohair_translators(&mut registry);
        Self::new(registry, config)
    }

    /// The translator registry.
    pub fn registry(&self) -> &TranslatorRegistry {
        &self.registry
    }

    /// Encoder settings translators should use.
    pub fn encoder(&self) -> &ExtensionRelationEncoder {
        &self.encoder
    }

    /// Translate `table` into a relation.
    ///
    /// Fails with `NotImplemented` if no translator is registered for the
    /// table's concrete type.
    pub fn translate(&self, table: &dyn TableDescriptor, kwargs: &Kwargs) -> MohairResult<Rel> {
        let translator = self.registry.get(table).ok_or_else(|| {
            MohairError::not_implemented(format!(
                "no translator registered for table '{}'",
                table.name()
            ))
        })?;

        debug!("Translating table '{}'", table.name());
        translator.translate(table, Some(self), kwargs)
    }

    /// Compile `table` into a plan with a single named root.
    ///
    /// Root names are the field names of `table.schema()`, read before the
    /// table is translated.
    pub fn compile(&self, table: &dyn TableDescriptor) -> MohairResult<Plan> {
        self.compile_with(table, &Kwargs::new())
    }

    /// Like [`Self::compile`], passing `kwargs` to the translator.
    pub fn compile_with(&self, table: &dyn TableDescriptor, kwargs: &Kwargs) -> MohairResult<Plan> {
        let schema = table.schema()?;
        let names = schema.fields().iter().map(|f| f.name().clone()).collect();
        let input = self.translate(table, kwargs)?;

        Ok(Plan {
            relations: vec![PlanRel {
                rel_type: Some(plan_rel::RelType::Root(RelRoot {
                    input: Some(input),
                    names,
                })),
            }],
            ..Default::default()
        })
    }
}

impl Default for SubstraitCompiler {
    fn default() -> Self {
        Self::with_mohair_translators(&EncoderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow_schema::{DataType, Field, Schema};

    use mohair_core::PartitionDomain;

    use super::*;
    use crate::encoder::decode_sky_rel;
    use crate::table::SkyTable;

    fn table() -> SkyTable {
        let mut partition = Arc::new(PartitionDomain::new("test")).partition_for("sample");
        let schema = Arc::new(Schema::new(vec![
            Field::new("gene_id", DataType::Utf8, true),
            Field::new("expression", DataType::Float32, true),
        ]));
        partition.load(schema, vec![]);
        SkyTable::from(partition)
    }

    #[test]
    fn test_compile_names_root() {
        let plan = SubstraitCompiler::default().compile(&table()).unwrap();

        assert_eq!(plan.relations.len(), 1);
        let Some(plan_rel::RelType::Root(root)) = &plan.relations[0].rel_type else {
            panic!("expected root relation");
        };
        assert_eq!(root.names, vec!["gene_id", "expression"]);

        let sky_rel = decode_sky_rel(root.input.as_ref().unwrap()).unwrap();
        assert_eq!(sky_rel.domain, "test");
        assert!(sky_rel.slices.is_empty());
    }

    #[test]
    fn test_compile_with_passes_kwargs() {
        let mut registry = TranslatorRegistry::new();
        registry.register::<SkyTable, _>(
            |table: &dyn TableDescriptor, compiler: Option<&SubstraitCompiler>, kwargs: &Kwargs| -> MohairResult<Rel> {
                assert!(compiler.is_some());
                match kwargs.get("limit").and_then(serde_json::Value::as_u64) {
                    Some(10) => Ok(Rel::default()),
                    other => Err(MohairError::value_error(format!(
                        "table '{}' got limit {other:?}",
                        table.name()
                    ))),
                }
            },
        );
        let compiler = SubstraitCompiler::new(registry, &EncoderConfig::default());

        let mut kwargs = Kwargs::new();
        kwargs.insert("limit".to_string(), serde_json::json!(10));
        let plan = compiler.compile_with(&table(), &kwargs).unwrap();
        let Some(plan_rel::RelType::Root(root)) = &plan.relations[0].rel_type else {
            panic!("expected root relation");
        };
        assert_eq!(root.input, Some(Rel::default()));

        let err = compiler.compile(&table()).unwrap_err();
        assert!(matches!(err, MohairError::ValueError(msg) if msg == "table 'test/sample' got limit None"));
    }

    #[test]
    fn test_unregistered_table() {
        let compiler = SubstraitCompiler::new(TranslatorRegistry::new(), &EncoderConfig::default());

        let err = compiler.translate(&table(), &Kwargs::new()).unwrap_err();
        assert!(matches!(err, MohairError::NotImplemented(_)));
    }
}
