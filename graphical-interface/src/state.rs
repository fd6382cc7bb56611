use std::collections::HashSet;

use crate::types::Protest;

/// Tracks which protest is selected (popup open) and which one is hovered.
#[derive(Debug, Default)]
pub struct SelectionState {
    pub selected: Option<String>,
    pub hovered: Option<String>,
}

impl SelectionState {
    pub fn new() -> SelectionState {
        Self::default()
    }

    /// If the provided protest is already selected, it will be deselected.
    /// Otherwise, it will be selected.
    pub fn toggle_protest_selection(&mut self, protest: &Protest) {
        if self.selected.as_deref() == Some(protest.id.as_str()) {
            self.selected = None;
        } else {
            self.selected = Some(protest.id.clone());
        }
    }

    pub fn set_hovered(&mut self, protest_id: Option<&str>) {
        self.hovered = protest_id.map(str::to_string);
    }

    pub fn is_hovered(&self, protest: &Protest) -> bool {
        self.hovered.as_deref() == Some(protest.id.as_str())
    }

    pub fn is_selected(&self, protest: &Protest) -> bool {
        self.selected.as_deref() == Some(protest.id.as_str())
    }
}

/// Tracks the markers drawn on the map and the protests listed as nearby.
#[derive(Debug, Default)]
pub struct ViewState {
    pub markers: Vec<Protest>,
    pub nearby: Vec<Protest>,
}

impl ViewState {
    /// Replaces everything with the result of a full refresh.
    pub fn replace(&mut self, protests: Vec<Protest>) {
        let mut nearby = protests.clone();
        nearby.sort_by(|a, b| {
            a.distance
                .unwrap_or(f64::INFINITY)
                .total_cmp(&b.distance.unwrap_or(f64::INFINITY))
        });

        self.markers = protests;
        self.nearby = nearby;
    }

    /// Adds the markers whose id is not known yet. Returns how many were added.
    pub fn merge_markers(&mut self, protests: Vec<Protest>) -> usize {
        let mut known: HashSet<String> = self.markers.iter().map(|p| p.id.clone()).collect();
        let before = self.markers.len();

        for protest in protests {
            if known.insert(protest.id.clone()) {
                self.markers.push(protest);
            }
        }

        self.markers.len() - before
    }

    pub fn find_marker(&self, protest_id: &str) -> Option<&Protest> {
        self.markers.iter().find(|protest| protest.id == protest_id)
    }
}
