//! Change tracking for tracked writes
//!
//! A tracked write (insert, point update, restore, hard delete) loads the
//! entity, applies the change in memory and records what it is about to
//! persist as an `EntityEntry`. Entries are grouped into a `ChangeSet` that
//! the save interceptors observe. Bulk statements never load entities and
//! so never produce entries.

use chrono::{DateTime, SecondsFormat, Utc};
use domain_catalog::{Category, Product};
use std::fmt;
use uuid::Uuid;

/// State of a tracked entity relative to the database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityState {
    Added,
    Modified,
    Deleted,
}

impl fmt::Display for EntityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityState::Added => "Added",
            EntityState::Modified => "Modified",
            EntityState::Deleted => "Deleted",
        };
        write!(f, "{}", name)
    }
}

/// An entity whose properties can be snapshotted for change tracking
pub trait Tracked {
    /// Name used in audit output
    const ENTITY_NAME: &'static str;

    /// Primary key rendered as text
    fn key(&self) -> String;

    /// Property names and values, in a stable order
    fn properties(&self) -> Vec<(&'static str, String)>;
}

/// Original and current value of a single property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    pub name: &'static str,
    pub original: Option<String>,
    pub current: Option<String>,
}

/// A single tracked entity and its pending change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityEntry {
    pub entity: &'static str,
    pub key: String,
    pub state: EntityState,
    pub properties: Vec<PropertyEntry>,
}

impl EntityEntry {
    /// Tracks an entity about to be inserted
    pub fn added<T: Tracked>(entity: &T) -> Self {
        Self {
            entity: T::ENTITY_NAME,
            key: entity.key(),
            state: EntityState::Added,
            properties: entity
                .properties()
                .into_iter()
                .map(|(name, value)| PropertyEntry {
                    name,
                    original: None,
                    current: Some(value),
                })
                .collect(),
        }
    }

    /// Tracks an entity about to be removed
    pub fn deleted<T: Tracked>(entity: &T) -> Self {
        Self {
            entity: T::ENTITY_NAME,
            key: entity.key(),
            state: EntityState::Deleted,
            properties: entity
                .properties()
                .into_iter()
                .map(|(name, value)| PropertyEntry {
                    name,
                    original: Some(value),
                    current: None,
                })
                .collect(),
        }
    }

    /// Tracks an entity whose state moves from `original` to `current`
    pub fn modified<T: Tracked>(original: &T, current: &T) -> Self {
        let before = original.properties();
        let after = current.properties();

        let properties = before
            .into_iter()
            .zip(after)
            .map(|((name, old), (_, new))| PropertyEntry {
                name,
                original: Some(old),
                current: Some(new),
            })
            .collect();

        Self {
            entity: T::ENTITY_NAME,
            key: current.key(),
            state: EntityState::Modified,
            properties,
        }
    }
}

/// Entries saved together, under one correlation id
#[derive(Debug, Clone)]
pub struct ChangeSet {
    id: Uuid,
    entries: Vec<EntityEntry>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            entries: Vec::new(),
        }
    }

    /// Creates a change set holding a single entry
    pub fn single(entry: EntityEntry) -> Self {
        let mut changes = Self::new();
        changes.track(entry);
        changes
    }

    pub fn track(&mut self, entry: EntityEntry) -> &mut Self {
        self.entries.push(entry);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the plain-text audit trail for this change set
    ///
    /// One header line per entry, then `New record added` for additions or
    /// one ` name : original - current` line per property for modifications.
    pub fn audit_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for entry in &self.entries {
            lines.push(format!("{}: {} #{}", entry.state, entry.entity, entry.key));
            match entry.state {
                EntityState::Added => lines.push("New record added".to_string()),
                EntityState::Modified => {
                    for property in &entry.properties {
                        lines.push(format!(
                            " {} : {} - {}",
                            property.name,
                            property.original.as_deref().unwrap_or_default(),
                            property.current.as_deref().unwrap_or_default()
                        ));
                    }
                }
                EntityState::Deleted => {}
            }
        }
        lines
    }
}

impl Default for ChangeSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Key shown for entities that have not been assigned an identity yet
pub const PENDING_KEY: &str = "new";

fn timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "null".to_string())
}

fn key_of(id: i32) -> String {
    if id > 0 {
        id.to_string()
    } else {
        PENDING_KEY.to_string()
    }
}

impl Tracked for Product {
    const ENTITY_NAME: &'static str = "Product";

    fn key(&self) -> String {
        key_of(self.id)
    }

    fn properties(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("description", optional(&self.description)),
            ("price", self.price.to_string()),
            ("category_id", self.category_id.to_string()),
            ("created_date", timestamp(&self.created_date)),
            ("modified_date", timestamp(&self.modified_date)),
            ("is_deleted", self.is_deleted.to_string()),
            ("specifications", self.specifications.to_document().to_string()),
        ]
    }
}

impl Tracked for Category {
    const ENTITY_NAME: &'static str = "Category";

    fn key(&self) -> String {
        key_of(self.id)
    }

    fn properties(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("description", optional(&self.description)),
            ("created_date", timestamp(&self.created_date)),
            ("modified_date", timestamp(&self.modified_date)),
            ("is_deleted", self.is_deleted.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use core_kernel::Price;
    use domain_catalog::ProductSpecifications;
    use rust_decimal_macros::dec;

    fn product() -> Product {
        Product {
            id: 3,
            name: "Headphones".to_string(),
            description: None,
            price: Price::new(dec!(120.00)).unwrap(),
            category_id: 1,
            created_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            modified_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            is_deleted: true,
            specifications: ProductSpecifications::default(),
        }
    }

    #[test]
    fn test_modified_entry_diffs_properties() {
        let before = product();
        let mut after = before.clone();
        after.restore(Utc.with_ymd_and_hms(2024, 2, 1, 8, 30, 0).unwrap());

        let entry = EntityEntry::modified(&before, &after);
        let changed: Vec<_> = entry
            .properties
            .iter()
            .filter(|p| p.original != p.current)
            .map(|p| p.name)
            .collect();

        assert_eq!(entry.state, EntityState::Modified);
        assert_eq!(entry.key, "3");
        assert_eq!(changed, vec!["modified_date", "is_deleted"]);
    }

    #[test]
    fn test_added_entry_has_no_originals() {
        let mut pending = product();
        pending.id = 0;

        let entry = EntityEntry::added(&pending);
        assert_eq!(entry.key, PENDING_KEY);
        assert!(entry.properties.iter().all(|p| p.original.is_none()));
    }

    #[test]
    fn test_audit_lines_for_each_state() {
        let before = product();
        let mut after = before.clone();
        after.price = Price::new(dec!(99.99)).unwrap();

        let mut changes = ChangeSet::new();
        changes
            .track(EntityEntry::added(&after))
            .track(EntityEntry::modified(&before, &after))
            .track(EntityEntry::deleted(&before));

        let lines = changes.audit_lines();
        assert_eq!(lines[0], "Added: Product #3");
        assert_eq!(lines[1], "New record added");
        assert_eq!(lines[2], "Modified: Product #3");
        assert!(lines.contains(&" price : 120.00 - 99.99".to_string()));
        assert!(lines.contains(&" description : null - null".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("Deleted: Product #3"));
        assert_eq!(changes.len(), 3);
    }

    #[test]
    fn test_change_sets_have_distinct_ids() {
        assert_ne!(ChangeSet::new().id(), ChangeSet::new().id());
        assert!(ChangeSet::default().is_empty());
    }
}
