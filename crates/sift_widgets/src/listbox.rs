//! Listbox controller - the ordered option collection
//!
//! The listbox owns every [`ComboboxOption`] in document order and keeps a
//! *matching subset*: all options when no filter is applied, otherwise only
//! those whose label satisfies the [`FilterMethod`]. Traversal and typeahead
//! operate on the matching subset and skip disabled options. Non-matching
//! options are hidden.
//!
//! Structural edits here are raw; the owning field records them into its
//! mutation batch and reconciles selection afterwards.

use rustc_hash::FxHashSet;
use slotmap::SlotMap;

use crate::config::FilterMethod;
use crate::option::{ComboboxOption, OptionId};

/// Traversal direction for the active pointer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Traverse {
    First,
    Last,
    Next,
    Previous,
}

pub struct Listbox {
    options: SlotMap<OptionId, ComboboxOption>,
    /// Document order
    order: Vec<OptionId>,
    /// Matching subset in document order
    matching: Vec<OptionId>,
    matching_set: FxHashSet<OptionId>,
    /// Filter the matching subset was computed for (None = not filtering)
    query: Option<String>,
    filter_method: FilterMethod,
}

impl std::fmt::Debug for Listbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listbox")
            .field("len", &self.order.len())
            .field("matching", &self.matching.len())
            .field("query", &self.query)
            .field("filter_method", &self.filter_method)
            .finish()
    }
}

impl Default for Listbox {
    fn default() -> Self {
        Self::new(FilterMethod::default())
    }
}

impl Listbox {
    pub fn new(filter_method: FilterMethod) -> Self {
        Self {
            options: SlotMap::with_key(),
            order: Vec::new(),
            matching: Vec::new(),
            matching_set: FxHashSet::default(),
            query: None,
            filter_method,
        }
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Insert an option at `index` (clamped to the end)
    pub(crate) fn insert(&mut self, index: usize, option: ComboboxOption) -> OptionId {
        let id = self.options.insert(option);
        let index = index.min(self.order.len());
        self.order.insert(index, id);
        self.refresh_matching();
        id
    }

    pub(crate) fn remove(&mut self, id: OptionId) -> Option<ComboboxOption> {
        let option = self.options.remove(id)?;
        self.order.retain(|&o| o != id);
        self.refresh_matching();
        Some(option)
    }

    /// Move an existing option to `index` (clamped)
    pub(crate) fn move_to(&mut self, id: OptionId, index: usize) -> bool {
        let Some(from) = self.index_of(id) else {
            return false;
        };
        self.order.remove(from);
        let index = index.min(self.order.len());
        self.order.insert(index, id);
        self.refresh_matching();
        true
    }

    pub(crate) fn get_mut(&mut self, id: OptionId) -> Option<&mut ComboboxOption> {
        self.options.get_mut(id)
    }

    pub fn get(&self, id: OptionId) -> Option<&ComboboxOption> {
        self.options.get(id)
    }

    pub fn contains(&self, id: OptionId) -> bool {
        self.options.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Option ids in document order
    pub fn ids(&self) -> &[OptionId] {
        &self.order
    }

    /// Options in document order
    pub fn iter(&self) -> impl Iterator<Item = (OptionId, &ComboboxOption)> + '_ {
        self.order
            .iter()
            .filter_map(move |&id| self.options.get(id).map(|o| (id, o)))
    }

    /// Position among siblings
    pub fn index_of(&self, id: OptionId) -> Option<usize> {
        self.order.iter().position(|&o| o == id)
    }

    pub fn first(&self) -> Option<OptionId> {
        self.order.first().copied()
    }

    // =========================================================================
    // Selection flags
    // =========================================================================

    /// The selected option, if any
    pub fn selected(&self) -> Option<OptionId> {
        self.iter().find(|(_, o)| o.is_selected()).map(|(id, _)| id)
    }

    /// First option with the given value, in document order
    pub fn find_by_value(&self, value: &str) -> Option<OptionId> {
        self.iter().find(|(_, o)| o.value() == value).map(|(id, _)| id)
    }

    /// Last default-selected option in document order
    pub fn last_default_selected(&self) -> Option<OptionId> {
        self.iter()
            .filter(|(_, o)| o.is_default_selected())
            .last()
            .map(|(id, _)| id)
    }

    /// Select `id` and deselect every sibling
    pub(crate) fn select_exclusive(&mut self, id: OptionId) {
        for (key, option) in self.options.iter_mut() {
            option.set_selected(key == id);
        }
    }

    pub(crate) fn deselect_all(&mut self) {
        for option in self.options.values_mut() {
            option.set_selected(false);
        }
    }

    // =========================================================================
    // Matching subset
    // =========================================================================

    pub fn filter_method(&self) -> FilterMethod {
        self.filter_method
    }

    pub(crate) fn set_filter_method(&mut self, method: FilterMethod) {
        self.filter_method = method;
        self.refresh_matching();
    }

    /// Restrict the matching subset to labels matching `query`
    pub(crate) fn apply_filter(&mut self, query: &str) {
        self.query = Some(query.to_string());
        self.refresh_matching();
    }

    /// Make every option match again
    pub(crate) fn clear_filter(&mut self) {
        self.query = None;
        self.refresh_matching();
    }

    /// Whether a filter is currently applied
    pub fn is_filtering(&self) -> bool {
        self.query.is_some()
    }

    /// Matching subset in document order
    pub fn matching(&self) -> &[OptionId] {
        &self.matching
    }

    pub fn is_matching(&self, id: OptionId) -> bool {
        self.matching_set.contains(&id)
    }

    /// Whether an option is shown; non-matching options are hidden
    pub fn is_visible(&self, id: OptionId) -> bool {
        self.is_matching(id)
    }

    /// Position of `id` within the matching subset
    pub fn matching_index_of(&self, id: OptionId) -> Option<usize> {
        self.matching.iter().position(|&o| o == id)
    }

    pub(crate) fn refresh_matching(&mut self) {
        let method = self.filter_method;
        let query = self.query.as_deref().unwrap_or("");
        self.matching = self
            .order
            .iter()
            .copied()
            .filter(|&id| {
                self.options
                    .get(id)
                    .is_some_and(|o| method.matches(o.label(), query))
            })
            .collect();
        self.matching_set = self.matching.iter().copied().collect();
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// An option the user may activate: matching and not disabled
    pub fn is_eligible(&self, id: OptionId) -> bool {
        self.is_matching(id) && self.get(id).is_some_and(|o| !o.is_disabled())
    }

    /// Resolve a traversal step relative to `from`
    ///
    /// Clamps at the boundaries: stepping past the last eligible option
    /// yields the current one. Without a starting point, `Next` yields the
    /// first and `Previous` the last eligible option.
    pub fn traverse(&self, from: Option<OptionId>, direction: Traverse) -> Option<OptionId> {
        let from_pos = from.and_then(|id| self.matching_index_of(id));
        let found = match (direction, from_pos) {
            (Traverse::First, _) | (Traverse::Next, None) => self.first_eligible_from(0),
            (Traverse::Last, _) | (Traverse::Previous, None) => {
                self.last_eligible_before(self.matching.len())
            }
            (Traverse::Next, Some(pos)) => self.first_eligible_from(pos + 1),
            (Traverse::Previous, Some(pos)) => self.last_eligible_before(pos),
        };
        found.or(from.filter(|&id| self.is_eligible(id)))
    }

    fn first_eligible_from(&self, start: usize) -> Option<OptionId> {
        self.matching
            .iter()
            .skip(start)
            .copied()
            .find(|&id| self.is_eligible(id))
    }

    fn last_eligible_before(&self, end: usize) -> Option<OptionId> {
        self.matching[..end.min(self.matching.len())]
            .iter()
            .rev()
            .copied()
            .find(|&id| self.is_eligible(id))
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Eligible option whose label equals `text` (case-insensitive)
    pub fn exact_match(&self, text: &str) -> Option<OptionId> {
        if text.is_empty() {
            return None;
        }
        let text_lower = text.to_lowercase();
        self.matching.iter().copied().find(|&id| {
            self.is_eligible(id)
                && self
                    .get(id)
                    .is_some_and(|o| o.label().to_lowercase() == text_lower)
        })
    }

    /// First eligible option whose label matches `query` with the filter method
    pub fn search(&self, query: &str) -> Option<OptionId> {
        if query.is_empty() {
            return None;
        }
        let method = self.filter_method;
        self.matching.iter().copied().find(|&id| {
            self.is_eligible(id)
                && self
                    .get(id)
                    .is_some_and(|o| method.matches(o.label(), query))
        })
    }
}
