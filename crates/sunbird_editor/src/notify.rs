use std::time::Duration;

use bevy::prelude::*;

pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_secs(5);
const MAX_NOTIFICATIONS: usize = 5;

pub fn plugin(app: &mut App) {
    app.init_resource::<Notifications>()
        .add_observer(on_notify)
        .add_systems(Update, expire_notifications);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyVariant {
    Success,
    Warning,
    Error,
}

#[derive(Event, Debug, Clone)]
pub struct NotifyEvent {
    pub variant: NotifyVariant,
    pub message: String,
}

impl NotifyEvent {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            variant: NotifyVariant::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            variant: NotifyVariant::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            variant: NotifyVariant::Error,
            message: message.into(),
        }
    }
}

pub struct Notification {
    pub variant: NotifyVariant,
    pub message: String,
    timer: Timer,
}

#[derive(Resource, Default)]
pub struct Notifications {
    entries: Vec<Notification>,
}

impl Notifications {
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn on_notify(event: On<NotifyEvent>, mut notifications: ResMut<Notifications>) {
    notifications.entries.push(Notification {
        variant: event.variant,
        message: event.message.clone(),
        timer: Timer::new(DEFAULT_NOTIFICATION_DURATION, TimerMode::Once),
    });

    let overflow = notifications.entries.len().saturating_sub(MAX_NOTIFICATIONS);
    if overflow > 0 {
        notifications.entries.drain(..overflow);
    }
}

fn expire_notifications(time: Res<Time>, mut notifications: ResMut<Notifications>) {
    if notifications.entries.is_empty() {
        return;
    }

    let delta = time.delta();
    notifications.entries.retain_mut(|notification| {
        notification.timer.tick(delta);
        !notification.timer.just_finished()
    });
}
