//! In-memory order and add-to-order notifications.
//!
//! # Design
//! The order belongs to the UI layer; `OrderingClient` only ever sees the
//! ids from `Order::menu_ids`. Screens that add dishes do not hold the order
//! themselves: they get an `OrderNotifier` and post `OrderEvent`s, and the
//! screen that owns the `Order` drains its `OrderUpdates` and applies them.

use tokio::sync::mpsc;

use crate::types::{format_price, MenuItem};

/// Dishes picked so far, in the order they were added. Duplicates allowed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Order {
    items: Vec<MenuItem>,
}

impl Order {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: MenuItem) {
        self.items.push(item);
    }

    /// Remove the entry at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<MenuItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ids to submit, one per entry.
    pub fn menu_ids(&self) -> Vec<u64> {
        self.items.iter().map(|item| item.id).collect()
    }

    pub fn total(&self) -> f64 {
        self.items.iter().fold(0.0, |acc, item| acc + item.price)
    }

    pub fn formatted_total(&self) -> String {
        format_price(self.total())
    }

    pub fn apply(&mut self, event: OrderEvent) {
        match event {
            OrderEvent::Added(item) => self.add(item),
        }
    }
}

/// Change posted by a screen that modifies the order.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderEvent {
    Added(MenuItem),
}

/// Sending half, handed to every screen that can add dishes.
#[derive(Debug, Clone)]
pub struct OrderNotifier {
    tx: mpsc::UnboundedSender<OrderEvent>,
}

impl OrderNotifier {
    /// Returns `false` once the receiving screen is gone.
    pub fn added(&self, item: MenuItem) -> bool {
        self.tx.send(OrderEvent::Added(item)).is_ok()
    }
}

/// Receiving half, held by the screen that owns the `Order`.
#[derive(Debug)]
pub struct OrderUpdates {
    rx: mpsc::UnboundedReceiver<OrderEvent>,
}

impl OrderUpdates {
    /// Next event; `None` when every notifier has been dropped.
    pub async fn recv(&mut self) -> Option<OrderEvent> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<OrderEvent> {
        self.rx.try_recv().ok()
    }

    /// Apply every event already queued; returns how many were applied.
    pub fn drain_into(&mut self, order: &mut Order) -> usize {
        let mut applied = 0;
        while let Some(event) = self.try_recv() {
            order.apply(event);
            applied += 1;
        }
        applied
    }
}

pub fn order_channel() -> (OrderNotifier, OrderUpdates) {
    let (tx, rx) = mpsc::unbounded_channel();
    (OrderNotifier { tx }, OrderUpdates { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(id: u64, price: f64) -> MenuItem {
        MenuItem {
            id,
            name: format!("Dish {id}"),
            description: String::new(),
            price,
            category: "entrees".into(),
            image_url: String::new(),
        }
    }

    #[test]
    fn duplicates_are_separate_entries() {
        let mut order = Order::new();
        order.add(dish(1, 9.0));
        order.add(dish(2, 10.0));
        order.add(dish(2, 10.0));
        assert_eq!(order.len(), 3);
        assert_eq!(order.menu_ids(), vec![1, 2, 2]);
    }

    #[test]
    fn totals_are_summed_and_formatted() {
        let mut order = Order::new();
        assert_eq!(order.formatted_total(), "$0.00");
        order.add(dish(1, 9.0));
        order.add(dish(5, 3.25));
        assert_eq!(order.total(), 12.25);
        assert_eq!(order.formatted_total(), "$12.25");
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut order = Order::new();
        order.add(dish(1, 9.0));
        assert!(order.remove(3).is_none());
        assert_eq!(order.remove(0).map(|i| i.id), Some(1));
        assert!(order.is_empty());
    }

    #[test]
    fn clear_empties_order() {
        let mut order = Order::new();
        order.add(dish(1, 9.0));
        order.clear();
        assert!(order.menu_ids().is_empty());
    }

    #[test]
    fn drained_events_are_applied_in_order() {
        let (notifier, mut updates) = order_channel();
        let other = notifier.clone();
        assert!(notifier.added(dish(3, 9.0)));
        assert!(other.added(dish(1, 9.0)));

        let mut order = Order::new();
        assert_eq!(updates.drain_into(&mut order), 2);
        assert_eq!(order.menu_ids(), vec![3, 1]);
        assert_eq!(updates.drain_into(&mut order), 0);
    }

    #[test]
    fn notifier_reports_closed_receiver() {
        let (notifier, updates) = order_channel();
        drop(updates);
        assert!(!notifier.added(dish(1, 9.0)));
    }

    #[tokio::test]
    async fn recv_ends_when_notifiers_are_dropped() {
        let (notifier, mut updates) = order_channel();
        tokio::spawn(async move {
            notifier.added(dish(6, 5.0));
        });
        assert_eq!(updates.recv().await, Some(OrderEvent::Added(dish(6, 5.0))));
        assert_eq!(updates.recv().await, None);
    }
}
