use crate::date::CalendarDate;

/// Changes a host can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notification {
    /// A new day was selected
    DateChanged(CalendarDate),
    /// The selection was removed
    DateCleared,
    /// Another month is displayed, carries the new view date
    MonthChanged(CalendarDate),
    /// The picker was opened
    Shown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&Notification)>;

/// Registered callbacks, invoked in registration order.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

impl Observers {
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Notification) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Returns whether `id` was subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(other, _)| *other != id);
        self.callbacks.len() != before
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn notify(&mut self, notification: &Notification) {
        log::debug!("{:?}", notification);
        for (_, callback) in self.callbacks.iter_mut() {
            callback(notification);
        }
    }
}
