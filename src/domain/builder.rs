//! Tree builder: turns raw keyed-group records into a uid-tagged forest.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::domain::entities::{RawRecord, Uid};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tree::{Forest, TreeNode};

/// How the builder treats child groups that do not have the expected shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupPolicy {
    /// Skip malformed groups and records, logging a warning.
    #[default]
    Lenient,
    /// Fail the build on the first malformed group or record.
    Strict,
}

/// Constructs forests from raw records.
///
/// The uid counter lives here and is reset on every `build` call, so two
/// builds of the same input yield the same uids.
#[derive(Debug)]
pub struct TreeBuilder {
    next_uid: u64,
    policy: GroupPolicy,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(GroupPolicy::default())
    }
}

impl TreeBuilder {
    pub fn new(policy: GroupPolicy) -> Self {
        Self {
            next_uid: 1,
            policy,
        }
    }

    /// Build one root node per input record, preserving input order.
    #[instrument(level = "debug", skip(self, records), fields(records = records.len()))]
    pub fn build(&mut self, records: &[RawRecord]) -> DomainResult<Forest> {
        self.next_uid = 1;

        let mut roots = Vec::with_capacity(records.len());
        for record in records {
            roots.push(self.make_node(record, None)?);
        }

        let forest = Forest::new(roots);
        debug!(
            "built forest: {} roots, {} nodes",
            forest.len(),
            forest.node_count()
        );
        Ok(forest)
    }

    fn mint_uid(&mut self) -> Uid {
        let uid = Uid(self.next_uid);
        self.next_uid += 1;
        uid
    }

    // Pre-order: the uid is taken before any child is visited.
    fn make_node(&mut self, record: &RawRecord, relation: Option<&str>) -> DomainResult<TreeNode> {
        let uid = self.mint_uid();
        let attributes = record.data.clone().unwrap_or_default();
        let mut children = Vec::new();

        match &record.children {
            None | Some(Value::Null) => {}
            Some(Value::Object(groups)) => {
                for (rel, group) in groups {
                    for member in self.group_members(uid, rel, group)? {
                        children.push(self.make_node(&member, Some(rel))?);
                    }
                }
            }
            Some(other) => self.tolerate(DomainError::MalformedChildren {
                parent: uid,
                reason: format!("expected an object of groups, found {}", json_kind(other)),
            })?,
        }

        Ok(TreeNode {
            uid,
            attributes,
            relation: relation.map(str::to_string),
            children,
        })
    }

    /// Member records of one group, in list order.
    fn group_members(&self, parent: Uid, relation: &str, group: &Value) -> DomainResult<Vec<RawRecord>> {
        let malformed = |reason: String| DomainError::MalformedGroup {
            parent,
            relation: relation.to_string(),
            reason,
        };

        let items = match group {
            Value::Object(fields) => match fields.get("records") {
                Some(Value::Array(items)) => items,
                Some(other) => {
                    self.tolerate(malformed(format!(
                        "`records` must be an array, found {}",
                        json_kind(other)
                    )))?;
                    return Ok(Vec::new());
                }
                None => {
                    self.tolerate(malformed("missing `records` field".to_string()))?;
                    return Ok(Vec::new());
                }
            },
            other => {
                self.tolerate(malformed(format!(
                    "expected a group object, found {}",
                    json_kind(other)
                )))?;
                return Ok(Vec::new());
            }
        };

        let mut members = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match RawRecord::deserialize(item) {
                Ok(record) => members.push(record),
                Err(e) => self.tolerate(DomainError::MalformedRecord {
                    parent,
                    relation: relation.to_string(),
                    index,
                    reason: e.to_string(),
                })?,
            }
        }
        Ok(members)
    }

    fn tolerate(&self, error: DomainError) -> DomainResult<()> {
        match self.policy {
            GroupPolicy::Strict => Err(error),
            GroupPolicy::Lenient => {
                warn!("skipping: {}", error);
                Ok(())
            }
        }
    }
}

/// Build a forest with the lenient policy.
pub fn build(records: &[RawRecord]) -> Forest {
    let mut builder = TreeBuilder::new(GroupPolicy::Lenient);
    // the lenient policy never returns an error
    builder
        .build(records)
        .unwrap_or_else(|_| Forest::new(Vec::new()))
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: Value) -> Vec<RawRecord> {
        serde_json::from_value(value).unwrap()
    }

    fn add_group(record: &mut RawRecord, relation: &str, members: Vec<Value>) {
        let groups = record.children.get_or_insert_with(|| json!({}));
        groups[relation] = json!({ "records": members });
    }

    #[test]
    fn given_children_when_building_then_numbers_in_preorder() {
        let input = records(json!([
            {"data": {"Name": "A"}, "children": {"kid": {"records": [
                {"data": {"Name": "A1"}, "children": {"kid": {"records": [{"data": {"Name": "A1a"}}]}}},
                {"data": {"Name": "A2"}}
            ]}}},
            {"data": {"Name": "B"}}
        ]));

        let forest = TreeBuilder::default().build(&input).unwrap();

        let uids: Vec<u64> = forest.iter().map(|(_, n)| n.uid.0).collect();
        assert_eq!(uids, vec![1, 2, 3, 4, 5]);
        assert_eq!(forest.roots()[1].uid, Uid(5));
    }

    #[test]
    fn given_builder_reused_when_building_twice_then_counter_restarts() {
        let input = records(json!([{"data": {"Name": "A"}}, {"data": {"Name": "B"}}]));
        let mut builder = TreeBuilder::default();

        let first = builder.build(&input).unwrap();
        let second = builder.build(&input).unwrap();

        assert_eq!(first, second);
        assert_eq!(second.roots()[0].uid, Uid(1));
    }

    #[test]
    fn given_children_not_an_object_when_lenient_then_node_has_no_children() {
        let input = records(json!([{"data": {"Name": "A"}, "children": [1, 2]}]));
        let forest = build(&input);
        assert_eq!(forest.node_count(), 1);
    }

    #[test]
    fn given_children_not_an_object_when_strict_then_errors() {
        let input = records(json!([{"data": {"Name": "A"}, "children": "nope"}]));
        let result = TreeBuilder::new(GroupPolicy::Strict).build(&input);
        assert!(matches!(result, Err(DomainError::MalformedChildren { .. })));
    }

    #[test]
    fn given_records_built_in_code_when_building_then_groups_become_children() {
        let mut data = crate::domain::entities::Attributes::new();
        data.insert("Name".to_string(), "A".into());
        let mut record = RawRecord {
            data: Some(data),
            children: None,
        };
        add_group(&mut record, "friend", vec![json!({"data": {"Name": "F"}})]);
        add_group(&mut record, "foe", vec![json!({"data": {"Name": "X"}}), json!({})]);
        let mut builder = TreeBuilder::new(GroupPolicy::Strict);

        let forest = builder.build(&[record]).unwrap();

        let relations: Vec<_> = forest.roots()[0]
            .children
            .iter()
            .map(|c| c.relation.clone().unwrap_or_default())
            .collect();
        assert_eq!(relations, vec!["friend", "foe", "foe"]);
    }

    #[test]
    fn given_json_values_when_naming_kind_then_reads_naturally() {
        assert_eq!(json_kind(&json!(null)), "null");
        assert_eq!(json_kind(&json!([])), "an array");
        assert_eq!(json_kind(&json!({})), "an object");
    }
}
