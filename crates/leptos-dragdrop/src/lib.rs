//! Leptos DragDrop Utilities
//!
//! Index-based drag-and-drop reordering for flat lists.
//! The pure part (`Orderable`, `reorder`, `DragState`) has no DOM dependency;
//! the Leptos part wires it to HTML5 drag events.

use leptos::prelude::*;

/// An item that lives in an ordered list and carries its own position
pub trait Orderable {
    fn id(&self) -> &str;
    fn sort_order(&self) -> i32;
    fn set_sort_order(&mut self, order: i32);
}

/// Rewrite every item's sort order to its index
pub fn restamp<T: Orderable>(items: &mut [T]) {
    for (idx, item) in items.iter_mut().enumerate() {
        item.set_sort_order(idx as i32);
    }
}

/// Move the item at `from` to position `to` and restamp the list.
///
/// Same-index drops and out-of-range indices leave the list untouched.
pub fn reorder<T: Orderable>(mut items: Vec<T>, from: usize, to: usize) -> Vec<T> {
    if from == to || from >= items.len() || to >= items.len() {
        return items;
    }
    let moved = items.remove(from);
    items.insert(to, moved);
    restamp(&mut items);
    items
}

/// True when sort orders are exactly 0..n-1 in display order
pub fn is_contiguous<T: Orderable>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(idx, item)| item.sort_order() == idx as i32)
}

/// Drag bookkeeping for one list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragState {
    pub dragged_index: Option<usize>,
    pub drag_over_index: Option<usize>,
}

impl DragState {
    pub fn start(&mut self, index: usize) {
        self.dragged_index = Some(index);
        self.drag_over_index = None;
    }

    pub fn over(&mut self, index: usize) {
        if self.dragged_index.is_some() {
            self.drag_over_index = Some(index);
        }
    }

    pub fn leave(&mut self) {
        self.drag_over_index = None;
    }

    /// Finish a drop on `index`. Returns the move to apply, if any.
    /// State is cleared regardless of the outcome.
    pub fn drop_on(&mut self, index: usize) -> Option<(usize, usize)> {
        let from = self.dragged_index;
        self.end();
        match from {
            Some(from) if from != index => Some((from, index)),
            _ => None,
        }
    }

    pub fn end(&mut self) {
        self.dragged_index = None;
        self.drag_over_index = None;
    }

    pub fn is_dragging(&self, index: usize) -> bool {
        self.dragged_index == Some(index)
    }

    pub fn is_drag_over(&self, index: usize) -> bool {
        self.drag_over_index == Some(index) && self.dragged_index != Some(index)
    }
}

/// DnD state signal for one list
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub state: RwSignal<DragState>,
    /// When set, every handler is inert
    pub disabled: Signal<bool>,
}

pub fn create_dnd_signals(disabled: Signal<bool>) -> DndSignals {
    DndSignals {
        state: RwSignal::new(DragState::default()),
        disabled,
    }
}

pub fn make_on_dragstart(dnd: DndSignals, index: usize) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |ev: web_sys::DragEvent| {
        if dnd.disabled.get_untracked() {
            ev.prevent_default();
            return;
        }
        if let Some(dt) = ev.data_transfer() {
            dt.set_effect_allowed("move");
            // Firefox refuses to start a drag without payload
            let _ = dt.set_data("text/plain", &index.to_string());
        }
        dnd.state.update(|s| s.start(index));
    }
}

pub fn make_on_dragover(dnd: DndSignals, index: usize) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |ev: web_sys::DragEvent| {
        if dnd.disabled.get_untracked() {
            return;
        }
        // Required for the element to accept a drop
        ev.prevent_default();
        if dnd.state.get_untracked().drag_over_index != Some(index) {
            dnd.state.update(|s| s.over(index));
        }
    }
}

pub fn make_on_dragleave(dnd: DndSignals) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |_ev: web_sys::DragEvent| {
        if dnd.state.get_untracked().drag_over_index.is_some() {
            dnd.state.update(|s| s.leave());
        }
    }
}

/// Drop handler. `on_move(from, to)` fires only for a real move.
pub fn make_on_drop<F>(dnd: DndSignals, index: usize, on_move: F) -> impl Fn(web_sys::DragEvent) + Clone + 'static
where
    F: Fn(usize, usize) + Clone + 'static,
{
    move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        let mut mv = None;
        dnd.state.update(|s| mv = s.drop_on(index));
        if dnd.disabled.get_untracked() {
            return;
        }
        if let Some((from, to)) = mv {
            on_move(from, to);
        }
    }
}

pub fn make_on_dragend(dnd: DndSignals) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |_ev: web_sys::DragEvent| {
        dnd.state.update(|s| s.end());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: String,
        order: i32,
    }

    impl Orderable for Row {
        fn id(&self) -> &str {
            &self.id
        }
        fn sort_order(&self) -> i32 {
            self.order
        }
        fn set_sort_order(&mut self, order: i32) {
            self.order = order;
        }
    }

    fn rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| Row { id: format!("r{}", i), order: i as i32 })
            .collect()
    }

    fn ids(items: &[Row]) -> Vec<&str> {
        items.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_reorder_last_to_first() {
        let out = reorder(rows(3), 2, 0);
        assert_eq!(ids(&out), vec!["r2", "r0", "r1"]);
        assert_eq!(out.iter().map(|r| r.order).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_reorder_first_to_last() {
        let out = reorder(rows(4), 0, 3);
        assert_eq!(ids(&out), vec!["r1", "r2", "r3", "r0"]);
        assert!(is_contiguous(&out));
    }

    #[test]
    fn test_reorder_same_index_is_noop() {
        let before = rows(3);
        let out = reorder(before.clone(), 1, 1);
        assert_eq!(out, before);
    }

    #[test]
    fn test_reorder_out_of_range_is_noop() {
        let before = rows(2);
        assert_eq!(reorder(before.clone(), 0, 5), before);
        assert_eq!(reorder(before.clone(), 7, 0), before);
    }

    #[test]
    fn test_restamp_fills_gaps() {
        let mut items = vec![
            Row { id: "a".into(), order: 4 },
            Row { id: "b".into(), order: 9 },
        ];
        restamp(&mut items);
        assert!(is_contiguous(&items));
    }

    #[test]
    fn test_drag_state_clears_on_drop() {
        let mut s = DragState::default();
        s.start(2);
        s.over(0);
        assert!(s.is_drag_over(0));
        assert_eq!(s.drop_on(0), Some((2, 0)));
        assert_eq!(s, DragState::default());
    }

    #[test]
    fn test_drag_state_drop_on_self_clears_without_move() {
        let mut s = DragState::default();
        s.start(1);
        s.over(1);
        assert!(!s.is_drag_over(1));
        assert_eq!(s.drop_on(1), None);
        assert_eq!(s, DragState::default());
    }

    #[test]
    fn test_drag_over_ignored_without_drag() {
        let mut s = DragState::default();
        s.over(3);
        assert_eq!(s.drag_over_index, None);
        s.start(0);
        s.over(3);
        s.leave();
        assert_eq!(s.drag_over_index, None);
        s.end();
        assert_eq!(s.dragged_index, None);
    }
}
