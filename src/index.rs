//! The option index: every typeable label and the block it creates.
//!
//! The index is rebuilt wholesale from the workspace and the built-in
//! templates; it is never patched in place. Duplicate labels collide and the
//! later insertion wins. Templates go in first, so a workspace block with the
//! same label as a template replaces it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::BuiltinTemplate;
use crate::error::Result;
use crate::label::derive_label;
use crate::model::BlockDescriptor;

/// What to do with a block whose label cannot be derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidBlockPolicy {
    /// Leave the block out and record a diagnostic.
    #[default]
    Skip,
    /// Fail the whole operation on the first bad block.
    Abort,
}

/// Value stored for each label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEntry {
    pub canonical_type: String,
    /// Dropdown default (`field -> value`); empty for most blocks.
    #[serde(default)]
    pub dropdown: IndexMap<String, String>,
    /// Mutator state (`attribute -> value`); empty for most blocks.
    #[serde(default)]
    pub mutator_attributes: IndexMap<String, String>,
}

impl LabelEntry {
    pub fn new(canonical_type: impl Into<String>) -> Self {
        Self {
            canonical_type: canonical_type.into(),
            ..Default::default()
        }
    }
}

impl From<&BuiltinTemplate> for LabelEntry {
    fn from(t: &BuiltinTemplate) -> Self {
        Self {
            canonical_type: t.canonical_type.clone(),
            dropdown: t.dropdown.clone(),
            mutator_attributes: t.mutator.clone(),
        }
    }
}

/// A block left out of a rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockDiagnostic {
    pub block_id: String,
    pub block_type: String,
    pub message: String,
}

/// Result of [`OptionIndex::build`]: the index plus any skipped blocks.
#[derive(Debug, Clone, Default)]
pub struct IndexBuild {
    pub index: OptionIndex,
    pub diagnostics: Vec<BlockDiagnostic>,
}

/// Label → entry mapping plus the sorted label list used by the matcher.
#[derive(Debug, Clone, Default)]
pub struct OptionIndex {
    entries: IndexMap<String, LabelEntry>,
    labels: Vec<String>,
}

impl OptionIndex {
    /// Build from workspace blocks only.
    pub fn from_blocks<'a, I>(blocks: I, policy: InvalidBlockPolicy) -> Result<IndexBuild>
    where
        I: IntoIterator<Item = &'a BlockDescriptor>,
    {
        Self::build(blocks, &[], policy)
    }

    /// Build from built-in templates followed by workspace blocks.
    ///
    /// With [`InvalidBlockPolicy::Abort`] the first unparseable block fails
    /// the whole build; with [`InvalidBlockPolicy::Skip`] it is reported in
    /// [`IndexBuild::diagnostics`] and the rest of the workspace is indexed.
    pub fn build<'a, I>(
        blocks: I,
        templates: &[BuiltinTemplate],
        policy: InvalidBlockPolicy,
    ) -> Result<IndexBuild>
    where
        I: IntoIterator<Item = &'a BlockDescriptor>,
    {
        let mut entries: IndexMap<String, LabelEntry> = IndexMap::new();
        let mut diagnostics = Vec::new();

        for tpl in templates {
            entries.insert(tpl.label.clone(), LabelEntry::from(tpl));
        }

        for block in blocks {
            match derive_label(block) {
                Ok(label) => {
                    entries.insert(label, LabelEntry::new(block.block_type.clone()));
                }
                Err(err) => match policy {
                    InvalidBlockPolicy::Abort => return Err(err),
                    InvalidBlockPolicy::Skip => {
                        warn!(block_id = %block.id, block_type = %block.block_type, "skipping unparseable block");
                        diagnostics.push(BlockDiagnostic {
                            block_id: block.id.clone(),
                            block_type: block.block_type.clone(),
                            message: err.to_string(),
                        });
                    }
                },
            }
        }

        let mut labels: Vec<String> = entries.keys().cloned().collect();
        labels.sort();
        debug!(
            entries = entries.len(),
            skipped = diagnostics.len(),
            "rebuilt option index"
        );

        Ok(IndexBuild {
            index: OptionIndex { entries, labels },
            diagnostics,
        })
    }

    pub fn get(&self, label: &str) -> Option<&LabelEntry> {
        self.entries.get(label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    /// All labels, sorted.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collect the blocks whose label equals `text` exactly, in workspace order.
///
/// This is the match set the navigator walks; it is unrelated to the
/// suggestion list, which only feeds the input field.
pub fn exact_matches<'a, I>(
    blocks: I,
    text: &str,
    policy: InvalidBlockPolicy,
) -> Result<Vec<BlockDescriptor>>
where
    I: IntoIterator<Item = &'a BlockDescriptor>,
{
    let mut out = Vec::new();
    for block in blocks {
        match derive_label(block) {
            Ok(label) if label == text => out.push(block.clone()),
            Ok(_) => {}
            Err(err) if policy == InvalidBlockPolicy::Abort => return Err(err),
            Err(_) => {
                debug!(block_id = %block.id, "ignoring unparseable block in match set");
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_templates;
    use crate::model::BlockKind;

    fn event(id: &str, inst: &str, ev: &str) -> BlockDescriptor {
        BlockDescriptor::new(
            id,
            "component_event",
            BlockKind::EventHandler {
                instance_name: inst.into(),
                event_name: ev.into(),
            },
        )
    }

    #[test]
    fn test_duplicate_labels_last_writer_wins() {
        let a = BlockDescriptor::new("1", "type_a", BlockKind::Generic).with_fields(["Same"]);
        let b = BlockDescriptor::new("2", "type_b", BlockKind::Generic).with_fields(["same"]);
        let build = OptionIndex::from_blocks([&a, &b], InvalidBlockPolicy::Abort).unwrap();
        assert_eq!(build.index.len(), 1);
        assert_eq!(build.index.get("same").unwrap().canonical_type, "type_b");
    }

    #[test]
    fn test_labels_sorted() {
        let blocks = vec![event("1", "Zeta", "Click"), event("2", "Alpha", "Click")];
        let build = OptionIndex::from_blocks(&blocks, InvalidBlockPolicy::Skip).unwrap();
        assert_eq!(build.index.labels(), ["when Alpha.Click", "when Zeta.Click"]);
    }

    #[test]
    fn test_abort_policy_fails_whole_build() {
        let blocks = vec![
            event("1", "Button1", "Click"),
            BlockDescriptor::new("bad", "mystery", BlockKind::Generic),
        ];
        let err = OptionIndex::from_blocks(&blocks, InvalidBlockPolicy::Abort).unwrap_err();
        assert!(err.to_string().contains("'bad'"));
    }

    #[test]
    fn test_skip_policy_collects_diagnostics() {
        let blocks = vec![
            BlockDescriptor::new("bad", "mystery", BlockKind::Generic),
            event("1", "Button1", "Click"),
        ];
        let build = OptionIndex::from_blocks(&blocks, InvalidBlockPolicy::Skip).unwrap();
        assert_eq!(build.index.len(), 1);
        assert_eq!(build.diagnostics.len(), 1);
        assert_eq!(build.diagnostics[0].block_id, "bad");
    }

    #[test]
    fn test_workspace_overrides_template() {
        let text = BlockDescriptor::new("t", "my_text", BlockKind::Generic).with_fields(["join"]);
        let build = OptionIndex::build([&text], builtin_templates(), InvalidBlockPolicy::Skip).unwrap();
        let entry = build.index.get("join").unwrap();
        assert_eq!(entry.canonical_type, "my_text");
        assert!(entry.mutator_attributes.is_empty());
        assert!(build.index.contains("Text"));
    }

    #[test]
    fn test_exact_matches_in_workspace_order() {
        let blocks = vec![
            event("1", "Button1", "Click"),
            event("2", "Button2", "Click"),
            event("3", "Button1", "Click"),
        ];
        let found = exact_matches(&blocks, "when Button1.Click", InvalidBlockPolicy::Abort).unwrap();
        let ids: Vec<_> = found.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert!(exact_matches(&blocks, "when Button1", InvalidBlockPolicy::Abort).unwrap().is_empty());
    }
}
