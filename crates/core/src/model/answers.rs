use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::option::OptionCode;

/// Recorded selections keyed by 0-based question position.
///
/// Entries are only ever inserted or overwritten; nothing removes them while
/// a test is running.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(BTreeMap<usize, OptionCode>);

impl AnswerMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `code` at `position`, returning the previous answer if any.
    pub fn record(&mut self, position: usize, code: OptionCode) -> Option<OptionCode> {
        self.0.insert(position, code)
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<OptionCode> {
        self.0.get(&position).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, OptionCode)> + '_ {
        self.0.iter().map(|(position, code)| (*position, *code))
    }
}

impl FromIterator<(usize, OptionCode)> for AnswerMap {
    fn from_iter<T: IntoIterator<Item = (usize, OptionCode)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
