//! Active filter values and the controller that keeps the filtered view in step.
//!
//! [`Explorer`] owns the document store and the selection. Every mutation
//! takes `&mut self` and recomputes the visible set before returning, so a
//! reader can never observe a selection that disagrees with the view.

use tracing::debug;

use crate::domain::DocumentRecord;
use crate::filter::{Dimension, FilterSelection};
use crate::flow::{ColumnScheme, FlowGraph, FlowGraphBuilder, NodeKey};
use crate::store::DocumentStore;
use crate::summary::{compose, ComposeOutcome};

/// Selection sets with a revision counter bumped on every effective change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selection: FilterSelection,
    revision: u64,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership; returns whether the value is selected afterwards.
    pub fn toggle(&mut self, dimension: Dimension, value: &str) -> bool {
        let now_selected = if self.selection.contains(dimension, value) {
            self.selection.remove(dimension, value);
            false
        } else {
            self.selection.insert(dimension, value);
            true
        };
        self.revision += 1;
        now_selected
    }

    /// Add values without toggling ones already selected.
    pub fn select<I, S>(&mut self, dimension: Dimension, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut changed = false;
        for value in values {
            changed |= self.selection.insert(dimension, value);
        }
        if changed {
            self.revision += 1;
        }
    }

    pub fn clear(&mut self, dimension: Dimension) {
        if self.selection.values(dimension).next().is_some() {
            self.selection.clear(dimension);
            self.revision += 1;
        }
    }

    pub fn clear_all(&mut self) {
        if !self.selection.is_unconstrained() {
            self.selection.clear_all();
            self.revision += 1;
        }
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

pub struct Explorer {
    store: DocumentStore,
    state: SelectionState,
    visible: Vec<usize>,
}

impl Explorer {
    pub fn new(store: DocumentStore) -> Self {
        let visible = (0..store.len()).collect();
        Self { store, state: SelectionState::new(), visible }
    }

    pub fn toggle(&mut self, dimension: Dimension, value: &str) -> bool {
        let selected = self.state.toggle(dimension, value);
        self.refresh();
        selected
    }

    pub fn select<I, S>(&mut self, dimension: Dimension, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.select(dimension, values);
        self.refresh();
    }

    pub fn clear(&mut self, dimension: Dimension) {
        self.state.clear(dimension);
        self.refresh();
    }

    pub fn clear_all(&mut self) {
        self.state.clear_all();
        self.refresh();
    }

    /// Diagram click: drop every selection, then select the node's value in
    /// its dimension. Returns `false` (and leaves the selection alone) for
    /// columns that have no filter dimension.
    pub fn focus(&mut self, node: &NodeKey) -> bool {
        let Some(dimension) = Dimension::for_column(node.column) else {
            return false;
        };
        self.state.clear_all();
        self.state.select(dimension, [node.name.clone()]);
        self.refresh();
        true
    }

    fn refresh(&mut self) {
        let selection = self.state.selection();
        self.visible = self
            .store
            .documents()
            .iter()
            .enumerate()
            .filter(|(_, doc)| selection.matches(doc))
            .map(|(i, _)| i)
            .collect();
        debug!(
            "Selection revision {}: {} of {} documents visible",
            self.state.revision(),
            self.visible.len(),
            self.store.len()
        );
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn selection(&self) -> &FilterSelection {
        self.state.selection()
    }

    pub fn revision(&self) -> u64 {
        self.state.revision()
    }

    /// Documents passing the current selection, in store order.
    pub fn visible(&self) -> Vec<&DocumentRecord> {
        let docs = self.store.documents();
        self.visible.iter().map(|&i| &docs[i]).collect()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Flow graph over the visible documents.
    pub fn flow(&self, scheme: ColumnScheme) -> FlowGraph {
        FlowGraphBuilder::new(scheme).build(self.visible())
    }

    pub fn compose_summary(&self) -> ComposeOutcome {
        compose(self.visible())
    }
}
