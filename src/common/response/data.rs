// src/common/response/data.rs

use core::ops::Deref;

use crate::common::timing::DEFAULT_MAX_SUB_VALUES;
use crate::common::types::{Metadata, Status, VarType};

/// One decoded field of a data package.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubValue {
    pub variable_type: VarType,
    /// SI-scaled value in the unit of the variable type. May be NaN.
    pub value: f64,
    pub metadata: Metadata,
}

impl SubValue {
    pub fn new(variable_type: VarType, value: f64) -> Self {
        SubValue { variable_type, value, metadata: Metadata::absent() }
    }

    /// Status of the measurement, `None` if the field had no status tag.
    pub fn status(&self) -> Option<Status> {
        self.metadata.status()
    }

    /// Range code, `None` if the field had no range tag.
    pub fn range(&self) -> Option<u32> {
        self.metadata.range()
    }

    pub fn unit(&self) -> &'static str {
        self.variable_type.unit()
    }
}

/// The sub-values of one data package line, in field order.
///
/// Holds at most `N` sub-values. Fields beyond that are dropped while
/// parsing and only counted, see [`Package::dropped`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Package<const N: usize = DEFAULT_MAX_SUB_VALUES> {
    values: heapless::Vec<SubValue, N>,
    dropped: usize,
}

impl<const N: usize> Package<N> {
    /// Maximum number of sub-values.
    pub const CAPACITY: usize = N;

    pub const fn new() -> Self {
        Package { values: heapless::Vec::new(), dropped: 0 }
    }

    /// Appends a sub-value, or counts it as dropped when the package is full.
    pub(crate) fn push(&mut self, value: SubValue) {
        if self.values.push(value).is_err() {
            self.dropped += 1;
        }
    }

    /// Number of non-empty fields that did not fit into the package.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn is_truncated(&self) -> bool {
        self.dropped > 0
    }

    pub fn as_slice(&self) -> &[SubValue] {
        &self.values
    }

    /// Variable types of the sub-values, in field order.
    pub fn variable_types(&self) -> impl Iterator<Item = VarType> + '_ {
        self.values.iter().map(|sub_value| sub_value.variable_type)
    }

    /// First sub-value of the given variable type.
    pub fn find(&self, variable_type: VarType) -> Option<&SubValue> {
        self.values.iter().find(|sub_value| sub_value.variable_type == variable_type)
    }
}

impl<const N: usize> Deref for Package<N> {
    type Target = [SubValue];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<'a, const N: usize> IntoIterator for &'a Package<N> {
    type Item = &'a SubValue;
    type IntoIter = core::slice::Iter<'a, SubValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
