//! Execution grouping by owning item

use std::collections::HashMap;

use crate::models::Execution;

/// Executions partitioned by item id.
///
/// Groups iterate in order of first appearance and keep the original relative
/// order of their executions.
#[derive(Debug, Default)]
pub struct ExecutionGroups<'a> {
    groups: Vec<(&'a str, Vec<&'a Execution>)>,
    index: HashMap<&'a str, usize>,
}

impl<'a> ExecutionGroups<'a> {
    fn insert(&mut self, execution: &'a Execution) {
        let id = execution.item.id.as_str();
        let slot = match self.index.get(id) {
            Some(&slot) => slot,
            None => {
                self.groups.push((id, Vec::new()));
                self.index.insert(id, self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[slot].1.push(execution);
    }

    pub fn get(&self, item_id: &str) -> Option<&[&'a Execution]> {
        self.index
            .get(item_id)
            .map(|&slot| self.groups[slot].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a Execution])> + '_ {
        self.groups.iter().map(|(id, e)| (*id, e.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Stable partition of `executions` by item id
pub fn group_executions(executions: &[Execution]) -> ExecutionGroups<'_> {
    let mut groups = ExecutionGroups::default();
    for execution in executions {
        groups.insert(execution);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemRef;

    fn execution(id: &str, item_id: &str) -> Execution {
        Execution {
            id: Some(id.to_string()),
            item: ItemRef {
                id: item_id.to_string(),
                name: None,
            },
            ..Default::default()
        }
    }

    fn ids(group: &[&Execution]) -> Vec<String> {
        group.iter().filter_map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_grouping_is_stable() {
        let executions = vec![
            execution("A1", "a"),
            execution("B1", "b"),
            execution("A2", "a"),
            execution("B2", "b"),
            execution("A3", "a"),
        ];
        let groups = group_executions(&executions);

        assert_eq!(groups.len(), 2);
        assert_eq!(ids(groups.get("a").unwrap()), vec!["A1", "A2", "A3"]);
        assert_eq!(ids(groups.get("b").unwrap()), vec!["B1", "B2"]);
        assert!(groups.get("c").is_none());
    }

    #[test]
    fn test_groups_iterate_in_first_appearance_order() {
        let executions = vec![
            execution("B1", "b"),
            execution("A1", "a"),
            execution("B2", "b"),
        ];
        let groups = group_executions(&executions);
        let order: Vec<_> = groups.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn test_empty_input() {
        let groups = group_executions(&[]);
        assert!(groups.is_empty());
    }
}
