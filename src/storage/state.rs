use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::ObjectId;

/// The repository state stored in state.yaml
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct State {
    /// Maps ref names to the commit they point at
    #[serde(default)]
    pub refs: BTreeMap<String, ObjectId>, // ref_name -> commit

    /// Maps each known commit to its parents
    #[serde(default)]
    pub commits: HashMap<ObjectId, Vec<ObjectId>>, // commit -> parents
}

impl State {
    /// Record a commit with its parents.
    pub fn add_commit(&mut self, id: impl Into<ObjectId>, parents: &[&str]) {
        self.commits
            .insert(id.into(), parents.iter().map(|p| p.to_string()).collect());
    }

    /// Point `name` at `id`.
    pub fn set_ref(&mut self, name: impl Into<String>, id: impl Into<ObjectId>) {
        self.refs.insert(name.into(), id.into());
    }
}
