use std::cell::RefCell;
use std::rc::Rc;

use crate::models::CleaningRequest;

/// In-process events the mock backend publishes in place of server push.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    NewRequest(CleaningRequest),
    StatusChange(CleaningRequest),
}

type Subscriber = Rc<dyn Fn(&Notification)>;

/// Publish/subscribe channel with deterministic delivery: publishing happens
/// after the triggering operation has persisted, and subscribers run
/// synchronously in subscription order.
#[derive(Clone, Default)]
pub struct NotificationHub {
    subscribers: Rc<RefCell<Vec<Subscriber>>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&Notification) + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    pub fn publish(&self, notification: &Notification) {
        // Snapshot first: a subscriber may subscribe again while running
        let subscribers: Vec<Subscriber> = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            subscriber(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RequestStatus;
    use chrono::Utc;

    fn sample() -> CleaningRequest {
        CleaningRequest {
            id: "r-1".to_string(),
            owner_email: "demo@email.com".to_string(),
            cabin_address: "123 Lakeshore Drive".to_string(),
            checkout_date: "2025-08-05".to_string(),
            checkout_time: "11:00".to_string(),
            special_requests: String::new(),
            status: RequestStatus::Pending,
            submitted_at: Utc::now(),
            approved_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn delivers_in_subscription_order() {
        let hub = NotificationHub::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let seen = seen.clone();
            hub.subscribe(move |_| seen.borrow_mut().push(tag));
        }

        hub.publish(&Notification::NewRequest(sample()));
        assert_eq!(*seen.borrow(), ["first", "second", "third"]);
    }

    #[test]
    fn subscribers_receive_the_payload() {
        let hub = NotificationHub::new();
        let seen = Rc::new(RefCell::new(None));

        let seen_clone = seen.clone();
        hub.subscribe(move |n| *seen_clone.borrow_mut() = Some(n.clone()));

        let request = sample();
        hub.publish(&Notification::StatusChange(request.clone()));
        assert_eq!(*seen.borrow(), Some(Notification::StatusChange(request)));
    }
}
