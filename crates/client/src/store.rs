//! Immutable client-side caches of server entities.
//!
//! Every mutation returns a new [`Snapshot`]; the receiver is never
//! changed. Entries are reference counted so unchanged entries are shared
//! between snapshots. Reconciliation is replace-by-id with the server's
//! response: no merging, the last server write wins.

use std::sync::Arc;

use habitry_core::types::DbId;

use crate::models::{Category, Habit};

/// An entity with a server-assigned id.
pub trait Keyed {
    fn key(&self) -> DbId;
}

impl Keyed for Habit {
    fn key(&self) -> DbId {
        self.id
    }
}

impl Keyed for Category {
    fn key(&self) -> DbId {
        self.id
    }
}

/// An ordered, immutable list of entities.
#[derive(Debug)]
pub struct Snapshot<T> {
    items: Arc<[Arc<T>]>,
}

pub type HabitStore = Snapshot<Habit>;
pub type CategoryStore = Snapshot<Category>;

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            items: Arc::from(Vec::new()),
        }
    }
}

impl<T: Keyed> Snapshot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole cache with a freshly fetched list.
    pub fn with_loaded(items: Vec<T>) -> Self {
        Self::from_vec(items.into_iter().map(Arc::new).collect())
    }

    /// Append a newly created entity. An entity already cached under the
    /// same id is replaced instead.
    pub fn with_created(&self, item: T) -> Self {
        if self.contains(item.key()) {
            return self.with_replaced(item);
        }
        let mut items = self.items.to_vec();
        items.push(Arc::new(item));
        Self::from_vec(items)
    }

    /// Replace the cached copy that has the same id. Unknown ids leave the
    /// snapshot unchanged.
    pub fn with_replaced(&self, item: T) -> Self {
        let key = item.key();
        let replacement = Arc::new(item);
        let items = self
            .items
            .iter()
            .map(|existing| {
                if existing.key() == key {
                    Arc::clone(&replacement)
                } else {
                    Arc::clone(existing)
                }
            })
            .collect();
        Self::from_vec(items)
    }

    /// Remove the entity with `id`.
    pub fn without(&self, id: DbId) -> Self {
        let items = self
            .items
            .iter()
            .filter(|item| item.key() != id)
            .cloned()
            .collect();
        Self::from_vec(items)
    }

    pub fn get(&self, id: DbId) -> Option<&T> {
        self.items.iter().find(|item| item.key() == id).map(|i| &**i)
    }

    pub fn contains(&self, id: DbId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().map(|i| &**i)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `other` holds the same allocation for the entry `id`.
    pub fn shares_entry(&self, other: &Self, id: DbId) -> bool {
        let find = |s: &Self| s.items.iter().find(|i| i.key() == id).cloned();
        match (find(self), find(other)) {
            (Some(a), Some(b)) => Arc::ptr_eq(&a, &b),
            _ => false,
        }
    }

    fn from_vec(items: Vec<Arc<T>>) -> Self {
        Self {
            items: Arc::from(items),
        }
    }
}

impl Snapshot<Habit> {
    /// Habits whose resolved category is `category`.
    pub fn in_category(&self, category: DbId) -> impl Iterator<Item = &Habit> {
        self.iter()
            .filter(move |h| h.category.as_ref().is_some_and(|c| c.id == category))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use habitry_core::ids::new_id;

    use super::*;

    fn habit(title: &str) -> Habit {
        Habit {
            id: new_id(),
            title: title.to_string(),
            description: String::new(),
            category: None,
            completed: false,
            streak: 0,
            best_streak: 0,
            completion_history: Vec::new(),
            created_at: Utc::now(),
        }
    }

    fn category(name: &str) -> Category {
        Category {
            id: new_id(),
            name: name.to_string(),
            color: "blue".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn create_appends_in_order() {
        let a = habit("a");
        let b = habit("b");
        let store = HabitStore::new().with_created(a.clone()).with_created(b.clone());

        let titles: Vec<&str> = store.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, ["a", "b"]);
    }

    #[test]
    fn replace_swaps_by_id_and_leaves_previous_snapshot_alone() {
        let drink = habit("Drink water");
        let other = habit("Read");
        let before = HabitStore::with_loaded(vec![drink.clone(), other.clone()]);

        let mut updated = drink.clone();
        updated.completed = true;
        updated.streak = 1;
        let after = before.with_replaced(updated);

        assert_eq!(after.get(drink.id).unwrap().streak, 1);
        assert_eq!(before.get(drink.id).unwrap().streak, 0);
        assert_eq!(after.len(), 2);
        assert!(after.shares_entry(&before, other.id));
        assert!(!after.shares_entry(&before, drink.id));
    }

    #[test]
    fn replace_of_unknown_id_is_a_no_op() {
        let store = HabitStore::with_loaded(vec![habit("a")]);
        let stranger = habit("stranger");
        let next = store.with_replaced(stranger.clone());

        assert_eq!(next.len(), 1);
        assert!(!next.contains(stranger.id));
    }

    #[test]
    fn create_of_known_id_replaces() {
        let a = habit("a");
        let store = HabitStore::with_loaded(vec![a.clone()]);
        let mut renamed = a.clone();
        renamed.title = "renamed".into();

        let next = store.with_created(renamed);
        assert_eq!(next.len(), 1);
        assert_eq!(next.get(a.id).unwrap().title, "renamed");
    }

    #[test]
    fn delete_removes_only_that_entry() {
        let a = habit("a");
        let b = habit("b");
        let before = HabitStore::with_loaded(vec![a.clone(), b.clone()]);
        let after = before.without(a.id);

        assert!(!after.contains(a.id));
        assert!(after.contains(b.id));
        assert_eq!(before.len(), 2);
    }

    #[test]
    fn in_category_filters_on_resolved_category() {
        let health = category("Health");
        let mut run = habit("Run");
        run.category = Some(health.clone());
        let walk = habit("Walk");

        let store = HabitStore::with_loaded(vec![run, walk]);
        let titles: Vec<&str> = store.in_category(health.id).map(|h| h.title.as_str()).collect();
        assert_eq!(titles, ["Run"]);
    }

    #[test]
    fn category_store_uses_same_rules() {
        let work = category("Work");
        let store = CategoryStore::new().with_created(work.clone());
        let mut recolored = work.clone();
        recolored.color = "green".into();

        let next = store.with_replaced(recolored);
        assert_eq!(next.get(work.id).unwrap().color, "green");
        assert_eq!(store.get(work.id).unwrap().color, "blue");
    }
}
