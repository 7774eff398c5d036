use crate::domain::value_objects::BindValue;

/// Positional placeholder token, rendered as `$n` (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Placeholder(usize);

impl Placeholder {
    /// 1-based position in the parameter list
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for Placeholder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Ordered bound values; entry `i - 1` belongs to placeholder `$i`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterList(Vec<BindValue>);

impl ParameterList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value bound to the given placeholder
    pub fn get(&self, placeholder: Placeholder) -> Option<&BindValue> {
        placeholder
            .index()
            .checked_sub(1)
            .and_then(|i| self.0.get(i))
    }

    pub fn as_slice(&self) -> &[BindValue] {
        &self.0
    }
}

impl IntoIterator for ParameterList {
    type Item = BindValue;
    type IntoIter = std::vec::IntoIter<BindValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParameterList {
    type Item = &'a BindValue;
    type IntoIter = std::slice::Iter<'a, BindValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Hands out placeholder indices in lockstep with the bound values.
///
/// One binder per statement. Indices are never reused or skipped, so the
/// highest placeholder handed out always equals the parameter count.
#[derive(Debug, Default)]
pub struct ParameterBinder {
    params: Vec<BindValue>,
}

impl ParameterBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value and return the placeholder that refers to it
    pub fn allocate(&mut self, value: BindValue) -> Placeholder {
        self.params.push(value);
        Placeholder(self.params.len())
    }

    /// Allocate one placeholder per value, preserving iteration order
    pub fn allocate_all<I>(&mut self, values: I) -> Vec<Placeholder>
    where
        I: IntoIterator<Item = BindValue>,
    {
        values.into_iter().map(|v| self.allocate(v)).collect()
    }

    /// Number of placeholders handed out so far
    pub fn allocated(&self) -> usize {
        self.params.len()
    }

    pub fn finish(self) -> ParameterList {
        ParameterList(self.params)
    }
}
