//! Tree display utilities for relation plans.

use std::fmt;

/// A node in a display tree.
pub trait TreeNode {
    /// Display name of this node.
    fn name(&self) -> &str;

    /// Child nodes, in display order.
    fn children(&self) -> Vec<&dyn TreeNode>;

    /// Additional details rendered next to the name.
    fn details(&self) -> Option<String> {
        None
    }
}

/// Renders a [`TreeNode`] hierarchy with box-drawing connectors.
pub struct DisplayTree<'a> {
    root: &'a dyn TreeNode,
}

impl<'a> DisplayTree<'a> {
    /// Create a new display tree.
    pub fn new(root: &'a dyn TreeNode) -> Self {
        Self { root }
    }

    fn fmt_label(f: &mut fmt::Formatter<'_>, node: &dyn TreeNode) -> fmt::Result {
        write!(f, "{}", node.name())?;
        if let Some(details) = node.details() {
            write!(f, " ({details})")?;
        }
        writeln!(f)
    }

    fn fmt_children(f: &mut fmt::Formatter<'_>, node: &dyn TreeNode, prefix: &str) -> fmt::Result {
        let children = node.children();
        let last = children.len().saturating_sub(1);

        for (i, child) in children.into_iter().enumerate() {
            let is_last = i == last;
            let connector = if is_last { "└─ " } else { "├─ " };
            write!(f, "{prefix}{connector}")?;
            Self::fmt_label(f, child)?;

            let child_prefix = format!("{prefix}{}", if is_last { "   " } else { "│  " });
            Self::fmt_children(f, child, &child_prefix)?;
        }

        Ok(())
    }
}

impl fmt::Display for DisplayTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::fmt_label(f, self.root)?;
        Self::fmt_children(f, self.root, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestNode {
        name: String,
        details: Option<String>,
        children: Vec<TestNode>,
    }

    impl TestNode {
        fn leaf(name: &str) -> Self {
            Self {
                name: name.to_string(),
                details: None,
                children: vec![],
            }
        }
    }

    impl TreeNode for TestNode {
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

    #[test]
    fn test_display_tree() {
        let tree = TestNode {
            name: "Plan".to_string(),
            details: None,
            children: vec![
                TestNode {
                    name: "Root".to_string(),
                    details: Some("names=[a]".to_string()),
                    children: vec![TestNode::leaf("ExtensionLeaf")],
                },
                TestNode::leaf("Root"),
            ],
        };

        let output = DisplayTree::new(&tree).to_string();
        let expected = "Plan\n\
                        ├─ Root (names=[a])\n\
                        │  └─ ExtensionLeaf\n\
                        └─ Root\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_single_node() {
        let output = DisplayTree::new(&TestNode::leaf("Rel")).to_string();
        assert_eq!(output, "Rel\n");
    }
}
