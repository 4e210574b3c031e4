use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::types::{ContactRecord, Entity};

pub const CONTACT_SORT: &str = "contact";

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("duplicate contact name: {0}")]
    DuplicateContact(String),
}

/// Read-only mapping from contact name to an optional phone number.
///
/// Unknown contacts and contacts without a number look the same from here:
/// both yield `None` / `false`.
#[derive(Debug, Clone)]
pub struct ContactDirectory {
    records: Vec<ContactRecord>,
    index: HashMap<String, usize>,
}

impl ContactDirectory {
    pub fn new(records: Vec<ContactRecord>) -> Result<Self, DirectoryError> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if index.insert(record.name().to_string(), position).is_some() {
                return Err(DirectoryError::DuplicateContact(record.name().to_string()));
            }
        }
        Ok(Self { records, index })
    }

    /// The phone book used by the demo domain.
    pub fn example() -> Self {
        let records = vec![
            ContactRecord::new("Andy", None),
            ContactRecord::new("John", Some("0701234567")),
            ContactRecord::new("Lisa", Some("0709876543")),
            ContactRecord::new("Mary", Some("0706574839")),
        ];
        let index = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name().to_string(), i))
            .collect();
        Self { records, index }
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.index
            .get(name)
            .and_then(|&i| self.records[i].phone_number())
    }

    pub fn has_reachable_number(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Contact names in directory order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(ContactRecord::name)
    }

}

/// Matches free text against the contact directory, one whitespace token at a time.
#[derive(Debug, Clone)]
pub struct EntityResolver {
    directory: Arc<ContactDirectory>,
}

impl EntityResolver {
    pub fn new(directory: Arc<ContactDirectory>) -> Self {
        Self { directory }
    }

    /// Contacts whose lower-cased name equals one of the lower-cased tokens
    /// of `search`, in directory order.
    ///
    /// Names containing whitespace never match since matching is per token.
    pub fn recognize(&self, search: &str) -> Vec<Entity> {
        let search = search.to_lowercase();
        let tokens: HashSet<&str> = search.split_whitespace().collect();

        self.directory
            .names()
            .filter(|name| tokens.contains(name.to_lowercase().as_str()))
            .map(|name| {
                Entity::new()
                    .with("sort", CONTACT_SORT)
                    .with("grammar_entry", name)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> EntityResolver {
        EntityResolver::new(Arc::new(ContactDirectory::example()))
    }

    fn grammar_entries(entities: &[Entity]) -> Vec<&str> {
        entities
            .iter()
            .filter_map(|e| e.field("grammar_entry"))
            .collect()
    }

    #[test]
    fn reachable_numbers() {
        let directory = ContactDirectory::example();
        assert!(!directory.has_reachable_number("Andy"));
        assert!(directory.has_reachable_number("John"));
        assert!(!directory.has_reachable_number("Unknown"));
        assert_eq!(directory.lookup("Lisa"), Some("0709876543"));
        assert_eq!(directory.lookup("Andy"), None);
    }

    #[test]
    fn names_keep_directory_order() {
        let directory = ContactDirectory::example();
        let names: Vec<&str> = directory.names().collect();
        assert_eq!(names, vec!["Andy", "John", "Lisa", "Mary"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = ContactDirectory::new(vec![
            ContactRecord::new("John", Some("1")),
            ContactRecord::new("John", None),
        ]);
        assert!(matches!(result, Err(DirectoryError::DuplicateContact(name)) if name == "John"));
    }

    #[test]
    fn recognizes_single_contact() {
        let entities = resolver().recognize("call john now");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].field("sort"), Some("contact"));
        assert_eq!(entities[0].field("grammar_entry"), Some("John"));
    }

    #[test]
    fn recognizes_in_directory_order() {
        let entities = resolver().recognize("call mary and LISA");
        assert_eq!(grammar_entries(&entities), vec!["Lisa", "Mary"]);
    }

    #[test]
    fn substrings_do_not_match() {
        assert!(resolver().recognize("johnny marylou").is_empty());
        assert!(resolver().recognize("").is_empty());
    }

    #[test]
    fn multi_word_names_never_match() {
        let directory = ContactDirectory::new(vec![ContactRecord::new("Anna Berg", Some("1"))])
            .unwrap();
        let resolver = EntityResolver::new(Arc::new(directory));
        assert!(resolver.recognize("call anna berg").is_empty());
    }
}
