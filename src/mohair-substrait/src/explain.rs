//! Human-readable rendering of compiled plans.

use common_display::{DisplayTree, TreeNode, truncate_string};

use crate::encoder::decode_sky_rel;
use crate::proto::mohair::SKY_REL_TYPE_URL;
use crate::proto::substrait::{ExtensionLeafRel, Plan, Rel, plan_rel, rel, rel_common};

const MAX_DETAIL_CHARS: usize = 120;

struct ExplainNode {
    name: String,
    details: Option<String>,
    children: Vec<ExplainNode>,
}

impl TreeNode for ExplainNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        self.children.iter().map(|c| c as &dyn TreeNode).collect()
    }

    fn details(&self) -> Option<String> {
        self.details.clone()
    }
}

fn rel_node(rel: &Rel) -> ExplainNode {
    match &rel.rel_type {
        Some(rel::RelType::ExtensionLeaf(leaf)) => leaf_node(rel, leaf),
        Some(rel_type) => {
            let (name, inputs) = operator(rel_type);
            ExplainNode {
                name: name.to_string(),
                details: None,
                children: inputs.into_iter().map(rel_node).collect(),
            }
        }
        None => ExplainNode {
            name: "Rel".to_string(),
            details: Some("empty".to_string()),
            children: vec![],
        },
    }
}

/// Operator name and input relations of a non-leaf relation.
fn operator(rel_type: &rel::RelType) -> (&'static str, Vec<&Rel>) {
    use rel::RelType;

    match rel_type {
        RelType::Read(_) => ("Read", vec![]),
        RelType::Filter(r) => ("Filter", r.input.as_deref().into_iter().collect()),
        RelType::Fetch(r) => ("Fetch", r.input.as_deref().into_iter().collect()),
        RelType::Aggregate(r) => ("Aggregate", r.input.as_deref().into_iter().collect()),
        RelType::Sort(r) => ("Sort", r.input.as_deref().into_iter().collect()),
        RelType::Project(r) => ("Project", r.input.as_deref().into_iter().collect()),
        RelType::Join(r) => (
            "Join",
            r.left.as_deref().into_iter().chain(r.right.as_deref()).collect(),
        ),
        RelType::Cross(r) => (
            "Cross",
            r.left.as_deref().into_iter().chain(r.right.as_deref()).collect(),
        ),
        RelType::Set(r) => ("Set", r.inputs.iter().collect()),
        RelType::ExtensionSingle(r) => {
            ("ExtensionSingle", r.input.as_deref().into_iter().collect())
        }
        RelType::ExtensionMulti(r) => ("ExtensionMulti", r.inputs.iter().collect()),
        RelType::ExtensionLeaf(_) => ("ExtensionLeaf", vec![]),
        _ => ("Rel", vec![]),
    }
}

fn leaf_node(rel: &Rel, leaf: &ExtensionLeafRel) -> ExplainNode {
    let emit = match leaf.common.as_ref().and_then(|c| c.emit_kind.as_ref()) {
        Some(rel_common::EmitKind::Direct(_)) | None => "direct".to_string(),
        Some(rel_common::EmitKind::Emit(emit)) => format!("emit={:?}", emit.output_mapping),
    };

    let payload = match leaf.detail.as_ref() {
        None => "no detail".to_string(),
        Some(detail) if detail.type_url == SKY_REL_TYPE_URL => match decode_sky_rel(rel) {
            Ok(sky_rel) => format!(
                "SkyRel domain={}, partition={}, slices={:?}, executed={}",
                sky_rel.domain,
                sky_rel.partition,
                sky_rel.slices,
                sky_rel.execstats.is_some_and(|stats| stats.executed)
            ),
            Err(e) => format!("undecodable SkyRel: {e}"),
        },
        Some(detail) => format!("{} ({} bytes)", detail.type_url, detail.value.len()),
    };

    ExplainNode {
        name: "ExtensionLeaf".to_string(),
        details: Some(truncate_string(&format!("{emit}; {payload}"), MAX_DETAIL_CHARS)),
        children: vec![],
    }
}

fn plan_node(plan: &Plan) -> ExplainNode {
    let children = plan
        .relations
        .iter()
        .map(|relation| match &relation.rel_type {
            Some(plan_rel::RelType::Root(root)) => ExplainNode {
                name: "Root".to_string(),
                details: Some(format!("names={:?}", root.names)),
                children: root.input.iter().map(rel_node).collect(),
            },
            Some(plan_rel::RelType::Rel(rel)) => rel_node(rel),
            None => ExplainNode {
                name: "PlanRel".to_string(),
                details: Some("empty".to_string()),
                children: vec![],
            },
        })
        .collect();

    ExplainNode {
        name: "Plan".to_string(),
        details: None,
        children,
    }
}

/// Render a relation tree.
pub fn explain_rel(rel: &Rel) -> String {
    DisplayTree::new(&rel_node(rel)).to_string()
}

/// Render a plan and its relation trees.
pub fn explain_plan(plan: &Plan) -> String {
    DisplayTree::new(&plan_node(plan)).to_string()
}
