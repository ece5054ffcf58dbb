//! Sanctioned type conversions.
//!
//! Each conversion returns `Ok(true)` when the node now has the requested
//! form and `Ok(false)` when the conversion does not apply to its current
//! type; the node is left untouched in that case. Changing a locked node is
//! an error.

use super::{FlagSet, NodeId, NodeResult, NodeType, Tree, Value};

impl Tree {
    /// Retag a node, replacing its value.
    fn retag(&mut self, id: NodeId, node_type: NodeType, value: Value, keep_flags: bool) -> NodeResult<()> {
        let node = self.node_unlocked(id)?;
        node.node_type = node_type;
        node.value = value;
        if !keep_flags {
            node.flags = FlagSet::empty();
        }
        Ok(())
    }

    /// Turn any node into UNKNOWN, keeping its children.
    pub fn to_unknown(&mut self, id: NodeId) -> NodeResult<()> {
        self.retag(id, NodeType::Unknown, Value::None, false)
    }

    /// CALL to AS, used once a call turned out to be a cast.
    pub fn to_as(&mut self, id: NodeId) -> NodeResult<bool> {
        if self.node_type(id)? != NodeType::Call {
            return Ok(false);
        }
        self.retag(id, NodeType::As, Value::None, false)?;
        Ok(true)
    }

    /// The boolean the node evaluates to: TRUE, FALSE, or UNDEFINED when
    /// the value is not known at compile time. The node is not modified.
    pub fn to_boolean_type_only(&self, id: NodeId) -> NodeResult<NodeType> {
        let node = self.node(id)?;
        let truth = match node.node_type {
            NodeType::True => Some(true),
            NodeType::False | NodeType::Null | NodeType::Undefined => Some(false),
            NodeType::Int64 => Some(node.int64()? != 0),
            NodeType::Float64 => {
                let value = node.float64()?;
                Some(value != 0.0 && !value.is_nan())
            }
            NodeType::String => Some(!node.string()?.is_empty()),
            _ => None,
        };
        Ok(match truth {
            Some(true) => NodeType::True,
            Some(false) => NodeType::False,
            None => NodeType::Undefined,
        })
    }

    /// Fold a literal into TRUE or FALSE.
    pub fn to_boolean(&mut self, id: NodeId) -> NodeResult<bool> {
        let node_type = match self.to_boolean_type_only(id)? {
            NodeType::Undefined => return Ok(false),
            node_type => node_type,
        };
        if self.node_type(id)? != node_type {
            self.retag(id, node_type, Value::None, false)?;
        }
        Ok(true)
    }

    /// MEMBER (getter) or ASSIGNMENT (setter) to CALL.
    pub fn to_call(&mut self, id: NodeId) -> NodeResult<bool> {
        match self.node_type(id)? {
            NodeType::Member | NodeType::Assignment => {
                self.retag(id, NodeType::Call, Value::None, false)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn to_int64(&mut self, id: NodeId) -> NodeResult<bool> {
        let node = self.node(id)?;
        let value = match node.node_type {
            NodeType::Int64 => return Ok(true),
            NodeType::Float64 => {
                let value = node.float64()?;
                if value.is_finite() { value as i64 } else { 0 }
            }
            NodeType::True => 1,
            NodeType::False | NodeType::Null => 0,
            _ => return Ok(false),
        };
        self.retag(id, NodeType::Int64, Value::Int64(value), false)?;
        Ok(true)
    }

    pub fn to_float64(&mut self, id: NodeId) -> NodeResult<bool> {
        let node = self.node(id)?;
        let value = match node.node_type {
            NodeType::Float64 => return Ok(true),
            NodeType::Int64 => node.int64()? as f64,
            NodeType::True => 1.0,
            NodeType::False | NodeType::Null => 0.0,
            NodeType::Undefined => f64::NAN,
            _ => return Ok(false),
        };
        self.retag(id, NodeType::Float64, Value::Float64(value), false)?;
        Ok(true)
    }

    /// Coerce a literal to INT64 or FLOAT64 the way unary `+` would.
    pub fn to_number(&mut self, id: NodeId) -> NodeResult<bool> {
        let node = self.node(id)?;
        let (node_type, value) = match node.node_type {
            NodeType::Int64 | NodeType::Float64 => return Ok(true),
            NodeType::True => (NodeType::Int64, Value::Int64(1)),
            NodeType::False | NodeType::Null => (NodeType::Int64, Value::Int64(0)),
            NodeType::Undefined => (NodeType::Float64, Value::Float64(f64::NAN)),
            NodeType::String => {
                let text = node.string()?.trim();
                let value = if text.is_empty() {
                    0.0
                } else {
                    text.parse::<f64>().unwrap_or(f64::NAN)
                };
                (NodeType::Float64, Value::Float64(value))
            }
            _ => return Ok(false),
        };
        self.retag(id, node_type, value, false)?;
        Ok(true)
    }

    /// Convert a literal or an identifier to STRING.
    pub fn to_string(&mut self, id: NodeId) -> NodeResult<bool> {
        let node = self.node(id)?;
        let text = match node.node_type {
            NodeType::String => return Ok(true),
            NodeType::Identifier | NodeType::Videntifier => node.string()?.to_string(),
            NodeType::Undefined => "undefined".to_string(),
            NodeType::Null => "null".to_string(),
            NodeType::True => "true".to_string(),
            NodeType::False => "false".to_string(),
            NodeType::Int64 => node.int64()?.to_string(),
            NodeType::Float64 => format_float64(node.float64()?),
            _ => return Ok(false),
        };
        let keep_flags = node.is_identifier();
        self.retag(id, NodeType::String, Value::String(text), keep_flags)?;
        Ok(true)
    }

    /// PUBLIC and PRIVATE used as names become identifiers.
    pub fn to_identifier(&mut self, id: NodeId) -> NodeResult<bool> {
        let name = match self.node_type(id)? {
            NodeType::Identifier => return Ok(true),
            NodeType::Private => "private",
            NodeType::Public => "public",
            _ => return Ok(false),
        };
        self.retag(id, NodeType::Identifier, Value::String(name.to_string()), false)?;
        Ok(true)
    }

    pub fn to_videntifier(&mut self, id: NodeId) -> NodeResult<bool> {
        self.retag_string(id, NodeType::Identifier, NodeType::Videntifier, true)
    }

    pub fn to_label(&mut self, id: NodeId) -> NodeResult<bool> {
        self.retag_string(id, NodeType::Identifier, NodeType::Label, false)
    }

    pub fn to_var_attributes(&mut self, id: NodeId) -> NodeResult<bool> {
        self.retag_string(id, NodeType::Variable, NodeType::VarAttributes, true)
    }

    fn retag_string(&mut self, id: NodeId, from: NodeType, to: NodeType, keep_flags: bool) -> NodeResult<bool> {
        let node = self.node(id)?;
        if node.node_type != from {
            return Ok(false);
        }
        let value = node.value.clone();
        self.retag(id, to, value, keep_flags)?;
        Ok(true)
    }
}

/// Number to string the way ECMAScript prints it.
pub(crate) fn format_float64(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        (if value < 0.0 { "-Infinity" } else { "Infinity" }).to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e21 {
        format!("{}", value as i128)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Flag, NodeError};
    use as2js_core::Position;

    fn create(tree: &mut Tree, node_type: NodeType) -> NodeId {
        tree.create(node_type, Position::new("convert.js"))
    }

    #[test]
    fn float_formatting() {
        assert_eq!(format_float64(f64::NAN), "NaN");
        assert_eq!(format_float64(f64::INFINITY), "Infinity");
        assert_eq!(format_float64(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_float64(-0.0), "0");
        assert_eq!(format_float64(3.0), "3");
        assert_eq!(format_float64(1.5), "1.5");
    }

    #[test]
    fn literals_to_string() {
        let mut tree = Tree::new();
        let t = create(&mut tree, NodeType::True);
        assert!(tree.to_string(t).unwrap());
        assert_eq!(tree.string(t).unwrap(), "true");

        let f = create(&mut tree, NodeType::Float64);
        tree.set_float64(f, 2.0).unwrap();
        assert!(tree.to_string(f).unwrap());
        assert_eq!(tree.string(f).unwrap(), "2");

        let list = create(&mut tree, NodeType::List);
        assert!(!tree.to_string(list).unwrap());
        assert_eq!(tree.node_type(list).unwrap(), NodeType::List);
    }

    #[test]
    fn number_conversions() {
        let mut tree = Tree::new();
        let f = create(&mut tree, NodeType::Float64);
        tree.set_float64(f, 3.7).unwrap();
        assert!(tree.to_int64(f).unwrap());
        assert_eq!(tree.int64(f).unwrap(), 3);

        let u = create(&mut tree, NodeType::Undefined);
        assert!(tree.to_number(u).unwrap());
        assert!(tree.node(u).unwrap().is_nan());

        let s = create(&mut tree, NodeType::String);
        tree.set_string(s, " 42 ").unwrap();
        assert!(tree.to_number(s).unwrap());
        assert_eq!(tree.float64(s).unwrap(), 42.0);
    }

    #[test]
    fn booleans() {
        let mut tree = Tree::new();
        let zero = create(&mut tree, NodeType::Int64);
        assert_eq!(tree.to_boolean_type_only(zero).unwrap(), NodeType::False);
        assert!(tree.to_boolean(zero).unwrap());
        assert_eq!(tree.node_type(zero).unwrap(), NodeType::False);

        let id = create(&mut tree, NodeType::Identifier);
        assert_eq!(tree.to_boolean_type_only(id).unwrap(), NodeType::Undefined);
        assert!(!tree.to_boolean(id).unwrap());
    }

    #[test]
    fn identifier_family() {
        let mut tree = Tree::new();
        let id = create(&mut tree, NodeType::Identifier);
        tree.set_string(id, "x").unwrap();
        tree.set_flag(id, Flag::IdentifierTyped, true).unwrap();
        assert!(tree.to_videntifier(id).unwrap());
        assert!(tree.flag(id, Flag::IdentifierTyped).unwrap());
        assert_eq!(tree.string(id).unwrap(), "x");
        assert!(!tree.to_label(id).unwrap());

        let public = create(&mut tree, NodeType::Public);
        assert!(tree.to_identifier(public).unwrap());
        assert_eq!(tree.string(public).unwrap(), "public");
    }

    #[test]
    fn conversions_respect_locks() {
        let mut tree = Tree::new();
        let call = create(&mut tree, NodeType::Call);
        tree.lock(call).unwrap();
        assert!(matches!(tree.to_as(call), Err(NodeError::Locked { .. })));
        tree.unlock(call).unwrap();
        assert!(tree.to_as(call).unwrap());
        assert_eq!(tree.node_type(call).unwrap(), NodeType::As);
    }
}
