use serde::Serialize;

use crate::storage::ObjectId;

/// How the want filter judged an advertised ref. Ordered: `Want` sorts above `Unclassified`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    #[default]
    Unclassified,
    Want,
}

/// One reference advertised by the remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteHead {
    pub name: String,
    pub remote_oid: ObjectId,
    /// Id of the local counterpart; only set when `has_local` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_oid: Option<ObjectId>,
    pub has_local: bool,
    pub classification: Classification,
}

impl RemoteHead {
    pub fn new(name: impl Into<String>, remote_oid: impl Into<ObjectId>) -> Self {
        RemoteHead {
            name: name.into(),
            remote_oid: remote_oid.into(),
            local_oid: None,
            has_local: false,
            classification: Classification::Unclassified,
        }
    }

    pub fn is_want(&self) -> bool {
        self.classification == Classification::Want
    }
}

/// The refs chosen by the want filter, wanted ones first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WantList(Vec<RemoteHead>);

impl WantList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RemoteHead> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[RemoteHead] {
        &self.0
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|head| head.name.as_str())
    }

    pub fn into_inner(self) -> Vec<RemoteHead> {
        self.0
    }
}

/// Takes ownership of an already sorted working list.
impl From<Vec<RemoteHead>> for WantList {
    fn from(heads: Vec<RemoteHead>) -> Self {
        WantList(heads)
    }
}

impl IntoIterator for WantList {
    type Item = RemoteHead;
    type IntoIter = std::vec::IntoIter<RemoteHead>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a WantList {
    type Item = &'a RemoteHead;
    type IntoIter = std::slice::Iter<'a, RemoteHead>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_want_sorts_above_unclassified() {
        assert!(Classification::Want > Classification::Unclassified);
        assert_eq!(Classification::default(), Classification::Unclassified);
    }

    #[test]
    fn test_json_shape() {
        let mut head = RemoteHead::new("refs/heads/main", "aaaa");
        head.classification = Classification::Want;
        let list = WantList::from(vec![head]);

        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "name": "refs/heads/main",
                "remote_oid": "aaaa",
                "has_local": false,
                "classification": "want"
            }])
        );
    }
}
