use crate::error::{FontError, FontResult};

pub struct RegistryEntry<T> {
    pub name: &'static str,
    pub description: &'static str,
    pub value: T,
}

/// Named implementations of one capability (renderers, font writers, image
/// writers), kept in registration order.
pub struct Registry<T> {
    kind: &'static str,
    entries: Vec<RegistryEntry<T>>,
}

impl<T> Registry<T> {
    /// `kind` names the capability in error messages, e.g. "font renderer"
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Adds an entry, replacing any earlier one with the same name in place
    pub fn register(&mut self, name: &'static str, description: &'static str, value: T) {
        let entry = RegistryEntry {
            name,
            description,
            value,
        };

        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> FontResult<&T> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.value)
            .ok_or_else(|| FontError::validation(format!("No such {}: \"{}\"", self.kind, name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn first(&self) -> Option<&RegistryEntry<T>> {
        self.entries.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegistryEntry<T>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
