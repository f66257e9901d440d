//! Element Attributes
//!
//! Ordered attribute storage that reports what each write did, so element
//! behaviours can react to the mutation.

/// What a write did to an attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeMutation {
    /// Attribute was set; `old` holds the previous value if there was one
    Set { old: Option<String> },
    /// Attribute was removed
    Removed { old: String },
}

impl AttributeMutation {
    /// The value before the mutation
    pub fn old_value(&self) -> Option<&str> {
        match self {
            Self::Set { old } => old.as_deref(),
            Self::Removed { old } => Some(old),
        }
    }
}

/// Attribute collection in source order
#[derive(Debug, Clone, Default)]
pub struct AttributeMap {
    entries: Vec<(String, String)>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get attribute value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Check if attribute exists
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Set attribute, keeping its original position if it already existed
    pub fn set(&mut self, name: &str, value: &str) -> AttributeMutation {
        if let Some((_, v)) = self.entries.iter_mut().find(|(n, _)| n == name) {
            let old = std::mem::replace(v, value.to_string());
            AttributeMutation::Set { old: Some(old) }
        } else {
            self.entries.push((name.to_string(), value.to_string()));
            AttributeMutation::Set { old: None }
        }
    }

    /// Remove attribute by name
    pub fn remove(&mut self, name: &str) -> Option<AttributeMutation> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        let (_, old) = self.entries.remove(index);
        Some(AttributeMutation::Removed { old })
    }

    /// Iterate over (name, value) pairs in source order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}
