//! Collection tree models
//!
//! A collection is a tree of request items nested inside item groups (folders).
//! Entries carry no parent pointers; traversal pairs every item with its
//! ancestor chain instead.

use serde::{Deserialize, Deserializer, Serialize};
use std::ops::ControlFlow;

/// Collection metadata block (Postman v2 `info`)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CollectionInfo {
    #[serde(rename = "_postman_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A collection of items and item groups
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub info: Option<CollectionInfo>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub item: Vec<Entry>,
}

/// A node of the collection tree
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    /// Any entry carrying an `item` array is a folder
    Group(ItemGroup),
    Item(Item),
}

/// A folder containing items and nested groups
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ItemGroup {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub item: Vec<Entry>,
}

/// A single request definition
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Last known response, when the summary carries one
    #[serde(default, deserialize_with = "lenient_response")]
    pub response: Option<ResponseInfo>,
}

/// Response timing as reported by the runner
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseInfo {
    /// Response time in milliseconds
    #[serde(rename = "responseTime")]
    pub response_time: f64,
}

impl ResponseInfo {
    /// Response time in seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.response_time / 1000.0
    }
}

/// Accept only objects carrying `responseTime`; saved example arrays and
/// other shapes deserialize to `None`.
pub(crate) fn lenient_response<'de, D>(deserializer: D) -> Result<Option<ResponseInfo>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl ItemGroup {
    /// Display label: the name, or the id for unnamed groups
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.id.as_deref())
            .unwrap_or("")
    }
}

impl Item {
    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.name.is_empty()
    }
}

/// An item together with the groups enclosing it
#[derive(Clone, Debug)]
pub struct LocatedItem<'a> {
    pub item: &'a Item,
    /// Enclosing groups, immediate parent first
    parents: Vec<&'a ItemGroup>,
}

impl<'a> LocatedItem<'a> {
    pub fn new(item: &'a Item, parents: Vec<&'a ItemGroup>) -> Self {
        Self { item, parents }
    }

    /// Visit enclosing groups walking up from the immediate parent
    pub fn for_each_parent(&self, mut f: impl FnMut(&'a ItemGroup)) {
        for parent in &self.parents {
            f(parent);
        }
    }

    pub fn depth(&self) -> usize {
        self.parents.len()
    }
}

impl Collection {
    /// Collection display name
    pub fn name(&self) -> &str {
        self.info
            .as_ref()
            .and_then(|i| i.name.as_deref())
            .or(self.name.as_deref())
            .unwrap_or("")
    }

    /// Collection identifier
    pub fn id(&self) -> Option<&str> {
        self.info
            .as_ref()
            .and_then(|i| i.id.as_deref())
            .or(self.id.as_deref())
    }

    /// Visit every item depth-first, in document order
    pub fn for_each_item<'a>(&'a self, mut f: impl FnMut(LocatedItem<'a>)) {
        let mut chain = Vec::new();
        let _ = walk::<()>(&self.item, &mut chain, &mut |located| {
            f(located);
            ControlFlow::Continue(())
        });
    }

    /// Find the item with the given id
    pub fn find_item<'a>(&'a self, id: &str) -> Option<LocatedItem<'a>> {
        let mut chain = Vec::new();
        match walk(&self.item, &mut chain, &mut |located| {
            if located.item.id == id {
                ControlFlow::Break(located)
            } else {
                ControlFlow::Continue(())
            }
        }) {
            ControlFlow::Break(found) => Some(found),
            ControlFlow::Continue(()) => None,
        }
    }

    /// Number of request items in the tree
    pub fn item_count(&self) -> usize {
        let mut count = 0;
        self.for_each_item(|_| count += 1);
        count
    }
}

fn walk<'a, B>(
    entries: &'a [Entry],
    chain: &mut Vec<&'a ItemGroup>,
    f: &mut dyn FnMut(LocatedItem<'a>) -> ControlFlow<B>,
) -> ControlFlow<B> {
    for entry in entries {
        match entry {
            Entry::Item(item) => {
                let parents = chain.iter().rev().copied().collect();
                if let ControlFlow::Break(b) = f(LocatedItem::new(item, parents)) {
                    return ControlFlow::Break(b);
                }
            }
            Entry::Group(group) => {
                chain.push(group);
                let flow = walk(&group.item, chain, f);
                chain.pop();
                if flow.is_break() {
                    return flow;
                }
            }
        }
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nested() -> Collection {
        serde_json::from_value(json!({
            "info": { "_postman_id": "col-1", "name": "Sample Collection" },
            "item": [
                { "id": "top", "name": "Top Level" },
                {
                    "id": "g-root",
                    "name": "Root",
                    "item": [{
                        "id": "g-folder",
                        "name": "Folder",
                        "item": [
                            { "id": "leaf", "name": "Leaf", "response": { "responseTime": 120 } }
                        ]
                    }]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_collection_name_and_id() {
        let collection = nested();
        assert_eq!(collection.name(), "Sample Collection");
        assert_eq!(collection.id(), Some("col-1"));

        let flat: Collection =
            serde_json::from_value(json!({ "id": "c", "name": "Flat" })).unwrap();
        assert_eq!(flat.name(), "Flat");
        assert_eq!(flat.id(), Some("c"));
    }

    #[test]
    fn test_find_item_with_parents() {
        let collection = nested();
        let located = collection.find_item("leaf").unwrap();
        assert_eq!(located.item.name, "Leaf");
        assert_eq!(located.depth(), 2);

        let mut labels = Vec::new();
        located.for_each_parent(|p| labels.push(p.label().to_string()));
        assert_eq!(labels, vec!["Folder", "Root"]);

        assert!(collection.find_item("missing").is_none());
    }

    #[test]
    fn test_for_each_item_document_order() {
        let collection = nested();
        let mut ids = Vec::new();
        collection.for_each_item(|l| ids.push(l.item.id.clone()));
        assert_eq!(ids, vec!["top", "leaf"]);
        assert_eq!(collection.item_count(), 2);
    }

    #[test]
    fn test_lenient_item_response() {
        let collection = nested();
        let leaf = collection.find_item("leaf").unwrap();
        assert_eq!(leaf.item.response.as_ref().unwrap().elapsed_secs(), 0.12);

        // Saved examples are an array and carry no timing
        let item: Item = serde_json::from_value(json!({
            "id": "x", "name": "X", "response": [{ "name": "example" }]
        }))
        .unwrap();
        assert!(item.response.is_none());
    }

    #[test]
    fn test_group_label_falls_back_to_id() {
        let group = ItemGroup {
            id: Some("g-1".to_string()),
            name: None,
            item: Vec::new(),
        };
        assert_eq!(group.label(), "g-1");
    }
}
