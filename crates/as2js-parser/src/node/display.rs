use std::fmt;

use super::{NodeId, Tree, Value};

/// Indented dump of a subtree, one node per line.
///
/// ```text
/// ADD
///   INT64 1
///   MULTIPLY
///     INT64 2
///     INT64 3
/// ```
pub struct TreeDisplay<'a> {
    tree: &'a Tree,
    root: NodeId,
}

impl<'a> TreeDisplay<'a> {
    pub(super) fn new(tree: &'a Tree, root: NodeId) -> Self {
        Self { tree, root }
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let indent = depth * 2;
        let Some(node) = self.tree.get(id) else {
            return writeln!(f, "{:indent$}<released {}>", "", id);
        };
        write!(f, "{:indent$}{}", "", node.node_type)?;
        match &node.value {
            Value::None => {}
            value => write!(f, " {}", value)?,
        }
        for (name, _) in node.flags.iter_names() {
            write!(f, " {}", name)?;
        }
        if !node.attributes.is_empty() {
            f.write_str(" attrs:")?;
            for (name, _) in node.attributes.iter_names() {
                write!(f, " {}", name.to_lowercase())?;
            }
        }
        writeln!(f)?;
        for child in &node.children {
            self.write_node(f, *child, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for TreeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.root, 0)
    }
}
