use std::collections::HashMap;
use std::time::Duration;

use bevy::prelude::*;
use sunbird::prelude::*;

use crate::form::SectionForm;

pub const DEFAULT_PREVIEW_DELAY: Duration = Duration::from_millis(300);

pub fn plugin(app: &mut App) {
    app.init_resource::<PreviewSynchronizer>()
        .init_resource::<LivePreview>()
        .add_systems(Update, pump_previews);
}

/// The stable value the preview renderer consumes once edits settle.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionPreview {
    pub section: SectionId,
    pub title: String,
    pub body: String,
    pub background: GradientSpec,
}

impl SectionPreview {
    pub fn of(form: &SectionForm) -> Self {
        Self {
            section: form.id,
            title: form.title.clone(),
            body: form.body.clone(),
            background: GradientSpec::parse(&form.background),
        }
    }
}

/// One cancellable pending value behind a delay window. Pushing replaces
/// the pending value and restarts the window, so a burst of N updates
/// inside one window yields exactly one emission carrying the Nth value.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Timer)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Timer::new(self.delay, TimerMode::Once)));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn tick(&mut self, delta: Duration) -> Option<T> {
        let (_, timer) = self.pending.as_mut()?;
        timer.tick(delta);
        if timer.just_finished() {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }
}

/// Debounces the in-progress edit model into live previews, one pending
/// entry per section so cancellation semantics stay uniform across fields.
#[derive(Resource)]
pub struct PreviewSynchronizer {
    delay: Duration,
    pending: HashMap<SectionId, Debouncer<SectionPreview>>,
}

impl Default for PreviewSynchronizer {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_DELAY)
    }
}

impl PreviewSynchronizer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: HashMap::new(),
        }
    }

    pub fn push(&mut self, preview: SectionPreview) {
        let delay = self.delay;
        self.pending
            .entry(preview.section)
            .or_insert_with(|| Debouncer::new(delay))
            .push(preview);
    }

    /// Teardown: nothing may emit into a consumer that is being reset.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn has_pending(&self) -> bool {
        self.pending.values().any(Debouncer::is_pending)
    }
}

#[derive(Event)]
pub struct PreviewReadyEvent(pub SectionPreview);

#[derive(Resource, Default)]
pub struct LivePreview {
    sections: HashMap<SectionId, SectionPreview>,
}

impl LivePreview {
    pub fn get(&self, id: SectionId) -> Option<&SectionPreview> {
        self.sections.get(&id)
    }
}

fn pump_previews(
    time: Res<Time>,
    mut sync: ResMut<PreviewSynchronizer>,
    mut live: ResMut<LivePreview>,
    mut commands: Commands,
) {
    let delta = time.delta();
    for debouncer in sync.pending.values_mut() {
        if let Some(preview) = debouncer.tick(delta) {
            live.sections.insert(preview.section, preview.clone());
            commands.trigger(PreviewReadyEvent(preview));
        }
    }
}
