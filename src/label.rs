//! Label derivation for workspace blocks.
//!
//! A label is the text a user types to find a block. The rules are tried in
//! order, first hit wins:
//!
//! 1. property accessor: `"{set|get} {instance}.{property}"`
//! 2. event handler: `"when {instance}.{event}"`
//! 3. method call: `"call {instance}.{method}"`
//! 4. text/variable literal with display text: the text, lowercased
//! 5. anything else: the last field's display text, lowercased
//!
//! A block that yields nothing (or has no canonical type) is unparseable.

use crate::error::{Result, TypeBlockError};
use crate::model::{BlockDescriptor, BlockKind};

/// Derive the label for `block`.
pub fn derive_label(block: &BlockDescriptor) -> Result<String> {
    if block.block_type.trim().is_empty() {
        return Err(unparseable(block));
    }
    let label = match &block.kind {
        BlockKind::PropertyAccessor {
            accessor,
            instance_name,
            property_name,
        } => format!("{} {}.{}", accessor, instance_name, property_name),
        BlockKind::EventHandler {
            instance_name,
            event_name,
        } => format!("when {}.{}", instance_name, event_name),
        BlockKind::MethodCall {
            instance_name,
            method_name,
        } => format!("call {}.{}", instance_name, method_name),
        BlockKind::Literal { text, .. } if !text.is_empty() => text.to_lowercase(),
        BlockKind::Literal { .. } | BlockKind::Generic => match block.last_field() {
            Some(text) if !text.is_empty() => text.to_lowercase(),
            _ => return Err(unparseable(block)),
        },
    };
    Ok(label)
}

fn unparseable(block: &BlockDescriptor) -> TypeBlockError {
    TypeBlockError::UnparseableBlock {
        block_id: block.id.clone(),
        block_type: block.block_type.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Accessor, LiteralCategory};

    #[test]
    fn test_component_labels() {
        let set = BlockDescriptor::new(
            "1",
            "component_set_get",
            BlockKind::PropertyAccessor {
                accessor: Accessor::Set,
                instance_name: "Label1".into(),
                property_name: "Text".into(),
            },
        );
        assert_eq!(derive_label(&set).unwrap(), "set Label1.Text");

        let when = BlockDescriptor::new(
            "2",
            "component_event",
            BlockKind::EventHandler {
                instance_name: "Button1".into(),
                event_name: "Click".into(),
            },
        );
        assert_eq!(derive_label(&when).unwrap(), "when Button1.Click");

        let call = BlockDescriptor::new(
            "3",
            "component_method",
            BlockKind::MethodCall {
                instance_name: "Player1".into(),
                method_name: "Start".into(),
            },
        );
        assert_eq!(derive_label(&call).unwrap(), "call Player1.Start");
    }

    #[test]
    fn test_literal_lowercased() {
        let block = BlockDescriptor::new(
            "t",
            "text",
            BlockKind::Literal {
                category: LiteralCategory::Text,
                text: "Hello World".into(),
            },
        );
        assert_eq!(derive_label(&block).unwrap(), "hello world");
    }

    #[test]
    fn test_empty_literal_falls_back_to_last_field() {
        let block = BlockDescriptor::new(
            "v",
            "lexical_variable_get",
            BlockKind::Literal {
                category: LiteralCategory::Variables,
                text: String::new(),
            },
        )
        .with_fields(["get", "Global Count"]);
        assert_eq!(derive_label(&block).unwrap(), "global count");
    }

    #[test]
    fn test_generic_uses_last_field() {
        let block = BlockDescriptor::new("g", "controls_if", BlockKind::Generic)
            .with_fields(["if", "then", "Else"]);
        assert_eq!(derive_label(&block).unwrap(), "else");
    }

    #[test]
    fn test_unparseable_blocks() {
        let no_fields = BlockDescriptor::new("x", "mystery", BlockKind::Generic);
        assert!(matches!(
            derive_label(&no_fields),
            Err(TypeBlockError::UnparseableBlock { ref block_id, .. }) if block_id == "x"
        ));

        let empty_last = BlockDescriptor::new("y", "mystery", BlockKind::Generic).with_fields(["a", ""]);
        assert!(derive_label(&empty_last).is_err());

        let no_type = BlockDescriptor::new("z", "", BlockKind::Generic).with_fields(["ok"]);
        assert!(derive_label(&no_type).is_err());
    }
}
