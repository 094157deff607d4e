use indexmap::IndexSet;

/// Insertion-ordered set of numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackedSet {
    members: IndexSet<String>,
}

impl TrackedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value; returns false when it was already present.
    pub fn add(&mut self, value: impl Into<String>) -> bool {
        self.members.insert(value.into())
    }

    pub fn contains(&self, value: &str) -> bool {
        self.members.contains(value)
    }

    /// Removes every member and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.members.len();
        self.members.clear();
        count
    }

    /// Counts members of exactly `length` characters that start with `prefix`.
    pub fn count_with_prefix(&self, prefix: &str, length: usize) -> usize {
        self.members
            .iter()
            .filter(|member| member.len() == length && member.starts_with(prefix))
            .count()
    }

    /// Puts `values` first, followed by the existing members not among them.
    pub fn merge_front<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut merged: IndexSet<String> = values.into_iter().map(Into::into).collect();
        merged.extend(self.members.drain(..));
        self.members = merged;
    }

    /// Swaps in a new member list, keeping the first occurrence of duplicates.
    pub fn replace<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members = values.into_iter().map(Into::into).collect();
    }

    pub fn all(&self) -> Vec<String> {
        self.members.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// The two sets a generated number is checked against.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSets {
    /// Every number accepted by a unique generation.
    pub generated: TrackedSet,
    /// Numbers the caller never wants returned.
    pub excluded: TrackedSet,
}

impl ConstraintSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `value` may be returned; the generated set only counts
    /// when `unique` is requested.
    pub fn allows(&self, value: &str, unique: bool) -> bool {
        !self.excluded.contains(value) && !(unique && self.generated.contains(value))
    }
}
