//! Accordion List State
//!
//! Generic state behind every reorderable list editor: at most one open
//! item, removal gated by confirmation, contiguous `sortOrder`, and
//! per-item upload flags.

use std::collections::{HashMap, HashSet};

use leptos_dragdrop::{reorder, restamp, Orderable};

use crate::forms::FieldSpec;
use crate::ids::next_id;

/// A list entry editable through the accordion editor
pub trait AccordionItem: Orderable + Clone + PartialEq + Send + Sync + 'static {
    /// Prefix used for fresh ids
    const ID_PREFIX: &'static str;
    /// Singular noun shown on buttons and in the confirm modal
    const NOUN: &'static str;
    /// Whether the item carries an uploadable image
    const HAS_IMAGE: bool = false;

    fn with_id(id: String, sort_order: i32) -> Self;

    /// Header text for the collapsed row
    fn title(&self) -> String;

    fn fields() -> Vec<FieldSpec<Self>>;

    fn image(&self) -> Option<&str> {
        None
    }

    fn set_image(&mut self, _url: String) {}
}

/// State of one list editor
#[derive(Clone, Debug, PartialEq)]
pub struct AccordionList<T: AccordionItem> {
    items: Vec<T>,
    open: Option<String>,
    pending_removal: Option<String>,
    uploading: HashSet<String>,
    upload_errors: HashMap<String, String>,
}

impl<T: AccordionItem> Default for AccordionList<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: AccordionItem> AccordionList<T> {
    /// Wrap existing items; display order follows their sort order
    pub fn new(mut items: Vec<T>) -> Self {
        items.sort_by_key(|i| i.sort_order());
        restamp(&mut items);
        Self {
            items,
            open: None,
            pending_removal: None,
            uploading: HashSet::new(),
            upload_errors: HashMap::new(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|i| i.id() == id)
    }

    // ---- open/closed ----

    pub fn open_id(&self) -> Option<&str> {
        self.open.as_deref()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.as_deref() == Some(id)
    }

    /// Open `id`, replacing any other open item; close it if already open
    pub fn toggle(&mut self, id: &str) {
        if self.is_open(id) {
            self.open = None;
        } else if self.get(id).is_some() {
            self.open = Some(id.to_string());
        }
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    // ---- mutations ----

    /// Append a fresh item and open it. Returns its id.
    pub fn add(&mut self) -> String {
        let id = next_id(T::ID_PREFIX);
        let item = T::with_id(id.clone(), self.items.len() as i32);
        self.items.push(item);
        self.open = Some(id.clone());
        id
    }

    /// Edit one item in place. Sort order is not touched.
    pub fn update<F: FnOnce(&mut T)>(&mut self, id: &str, f: F) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id() == id) {
            let order = item.sort_order();
            f(item);
            item.set_sort_order(order);
        }
    }

    pub fn move_item(&mut self, from: usize, to: usize) {
        let items = std::mem::take(&mut self.items);
        self.items = reorder(items, from, to);
    }

    // ---- confirmed removal ----

    pub fn pending_removal(&self) -> Option<&str> {
        self.pending_removal.as_deref()
    }

    /// Trash click: only remembers the id until the modal is answered
    pub fn request_remove(&mut self, id: &str) {
        if self.get(id).is_some() {
            self.pending_removal = Some(id.to_string());
        }
    }

    pub fn cancel_remove(&mut self) {
        self.pending_removal = None;
    }

    /// Remove the pending item. Returns the removed item, if any.
    pub fn confirm_remove(&mut self) -> Option<T> {
        let id = self.pending_removal.take()?;
        let idx = self.items.iter().position(|i| i.id() == id)?;
        let removed = self.items.remove(idx);
        restamp(&mut self.items);
        if self.is_open(&id) {
            self.open = None;
        }
        self.uploading.remove(&id);
        self.upload_errors.remove(&id);
        Some(removed)
    }

    // ---- per-item uploads ----

    pub fn begin_upload(&mut self, id: &str) {
        self.upload_errors.remove(id);
        self.uploading.insert(id.to_string());
    }

    /// Apply an upload outcome to one item; other fields stay as they are
    pub fn finish_upload(&mut self, id: &str, outcome: Result<String, String>) {
        self.uploading.remove(id);
        match outcome {
            Ok(url) => self.update(id, |item| item.set_image(url)),
            Err(message) => {
                if self.get(id).is_some() {
                    self.upload_errors.insert(id.to_string(), message);
                }
            }
        }
    }

    pub fn is_uploading(&self, id: &str) -> bool {
        self.uploading.contains(id)
    }

    pub fn upload_error(&self, id: &str) -> Option<&str> {
        self.upload_errors.get(id).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ExpertiseTopic, TeamMember};
    use leptos_dragdrop::is_contiguous;

    fn three_topics() -> AccordionList<ExpertiseTopic> {
        let mut list = AccordionList::<ExpertiseTopic>::default();
        for title in ["a", "b", "c"] {
            let id = list.add();
            list.update(&id, |t| t.title = title.to_string());
        }
        list
    }

    fn titles(list: &AccordionList<ExpertiseTopic>) -> Vec<String> {
        list.items().iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn test_add_appends_and_opens() {
        let mut list = AccordionList::<TeamMember>::default();
        let first = list.add();
        let second = list.add();
        assert_ne!(first, second);
        assert_eq!(list.len(), 2);
        assert!(list.is_open(&second));
        assert_eq!(list.items()[1].sort_order, 1);
    }

    #[test]
    fn test_toggle_switches_directly() {
        let mut list = three_topics();
        let a = list.items()[0].id.clone();
        let b = list.items()[1].id.clone();
        list.toggle(&a);
        assert!(list.is_open(&a));
        list.toggle(&b);
        assert!(list.is_open(&b));
        assert!(!list.is_open(&a));
        list.toggle(&b);
        assert_eq!(list.open_id(), None);
    }

    #[test]
    fn test_drag_last_to_first() {
        let mut list = three_topics();
        list.move_item(2, 0);
        assert_eq!(titles(&list), vec!["c", "a", "b"]);
        let orders: Vec<i32> = list.items().iter().map(|t| t.sort_order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_remove_requires_confirmation() {
        let mut list = three_topics();
        let before = list.clone();
        let target = list.items()[1].id.clone();

        list.request_remove(&target);
        assert_eq!(list.len(), 3);
        list.cancel_remove();
        assert_eq!(list, before);

        list.request_remove(&target);
        let removed = list.confirm_remove().unwrap();
        assert_eq!(removed.title, "b");
        assert_eq!(titles(&list), vec!["a", "c"]);
        assert!(is_contiguous(list.items()));
        assert_eq!(list.pending_removal(), None);
    }

    #[test]
    fn test_confirm_without_request_is_noop() {
        let mut list = three_topics();
        assert!(list.confirm_remove().is_none());
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_update_leaves_siblings_and_order() {
        let mut list = three_topics();
        let id = list.items()[2].id.clone();
        list.update(&id, |t| {
            t.description = "nova".into();
            t.sort_order = 99;
        });
        assert_eq!(list.items()[2].description, "nova");
        assert_eq!(list.items()[2].sort_order, 2);
        assert_eq!(list.items()[0].description, "");
    }

    #[test]
    fn test_sort_orders_stay_contiguous_after_mixed_operations() {
        let mut list = three_topics();
        list.move_item(0, 2);
        list.add();
        let id = list.items()[1].id.clone();
        list.request_remove(&id);
        list.confirm_remove();
        list.move_item(2, 1);
        list.add();
        assert!(is_contiguous(list.items()));
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_upload_flags_are_per_item() {
        let mut list = AccordionList::<TeamMember>::default();
        let a = list.add();
        let b = list.add();
        list.update(&a, |m| m.name = "Ana".into());

        list.begin_upload(&a);
        assert!(list.is_uploading(&a));
        assert!(!list.is_uploading(&b));

        list.update(&b, |m| m.name = "Bia".into());
        assert_eq!(list.get(&b).unwrap().name, "Bia");

        list.finish_upload(&a, Err("arquivo grande demais".into()));
        assert!(!list.is_uploading(&a));
        assert_eq!(list.upload_error(&a), Some("arquivo grande demais"));
        assert_eq!(list.get(&a).unwrap().name, "Ana");

        list.begin_upload(&a);
        list.finish_upload(&a, Ok("https://cdn/x.png".into()));
        assert_eq!(list.upload_error(&a), None);
        assert_eq!(list.get(&a).unwrap().photo, "https://cdn/x.png");
    }

    #[test]
    fn test_new_sorts_by_existing_order() {
        let mut a = ExpertiseTopic::with_id("a".into(), 5);
        a.title = "a".into();
        let mut b = ExpertiseTopic::with_id("b".into(), 1);
        b.title = "b".into();
        let list = AccordionList::new(vec![a, b]);
        assert_eq!(titles(&list), vec!["b", "a"]);
        assert!(is_contiguous(list.items()));
    }
}
