use viewport::{Coordinate, FetchRequest};

use crate::{state::ViewState, types::Protest};

/// A change to the store, delivered to subscribers on [`Store::publish`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    UserPositionChanged(Coordinate),
    MarkersChanged { total: usize, added: usize },
    NearbyChanged(usize),
}

pub type Subscriber = Box<dyn FnMut(&StoreEvent)>;

/// Holds the protests on display and the user's position.
///
/// Mutations only queue events; nothing is notified until `publish` is
/// called, so a batch of changes made during one frame reaches subscribers
/// together and in order.
#[derive(Default)]
pub struct Store {
    view: ViewState,
    user_position: Option<Coordinate>,
    pending: Vec<StoreEvent>,
    subscribers: Vec<Subscriber>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The markers to draw on the map: none until the user position is known.
    pub fn visible_markers(&self) -> &[Protest] {
        match self.user_position {
            Some(_) => &self.view.markers,
            None => &[],
        }
    }

    pub fn user_position(&self) -> Option<&Coordinate> {
        self.user_position.as_ref()
    }

    pub fn set_user_position(&mut self, position: Coordinate) {
        self.user_position = Some(position);
        self.pending.push(StoreEvent::UserPositionChanged(position));
    }

    /// Applies the protests fetched for `request`.
    ///
    /// A full refresh replaces the markers and the nearby list; an
    /// incremental fetch only adds the markers that are not known yet.
    pub fn apply_fetch(&mut self, request: &FetchRequest, protests: Vec<Protest>) {
        if request.only_markers {
            let added = self.view.merge_markers(protests);
            if added > 0 {
                self.pending.push(StoreEvent::MarkersChanged {
                    total: self.view.markers.len(),
                    added,
                });
            }
        } else {
            self.view.replace(protests);
            self.pending.push(StoreEvent::MarkersChanged {
                total: self.view.markers.len(),
                added: self.view.markers.len(),
            });
            self.pending.push(StoreEvent::NearbyChanged(self.view.nearby.len()));
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Notifies every subscriber of the queued events. Returns how many events were sent.
    pub fn publish(&mut self) -> usize {
        let events: Vec<StoreEvent> = self.pending.drain(..).collect();
        for event in &events {
            for subscriber in self.subscribers.iter_mut() {
                subscriber(event);
            }
        }
        events.len()
    }
}
