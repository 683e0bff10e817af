use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, warn};

use crate::clamp::ObservedSpawner;
use crate::settings::{EntityType, Settings, SpawnerField};

/// A spawner block owned by the host. Writes are buffered until `commit`.
pub trait LiveSpawner {
    type Error: fmt::Display;

    fn world_name(&self) -> &str;
    fn spawned_type(&self) -> Option<EntityType>;
    fn observed(&self) -> ObservedSpawner;
    fn write_field(&mut self, field: SpawnerField, value: u32) -> Result<(), Self::Error>;
    fn commit(&mut self) -> Result<(), Self::Error>;

    fn location(&self) -> String {
        self.world_name().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweakReason {
    ChunkLoad,
    Place,
    ApplyAll,
    Command,
}

impl TweakReason {
    pub fn label(self) -> &'static str {
        match self {
            TweakReason::ChunkLoad => "chunk",
            TweakReason::Place => "place",
            TweakReason::ApplyAll => "applyall",
            TweakReason::Command => "command",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TweakOutcome {
    Rejected,
    Unchanged,
    Updated { fields: BTreeSet<SpawnerField> },
}

pub fn tweak_spawner<S: LiveSpawner>(
    settings: &Settings,
    spawner: &mut S,
    reason: TweakReason,
) -> Result<TweakOutcome, S::Error> {
    let entity_type = spawner.spawned_type();
    let observed = spawner.observed();
    let Some(update) = settings.plan_update(spawner.world_name(), entity_type.as_ref(), &observed)
    else {
        return Ok(TweakOutcome::Rejected);
    };
    if !update.changed() {
        return Ok(TweakOutcome::Unchanged);
    }

    for write in &update.writes {
        spawner.write_field(write.field, write.value)?;
    }
    spawner.commit()?;

    let fields = update.touched();
    debug!(
        location = %spawner.location(),
        entity_type = ?entity_type.as_ref().map(EntityType::as_str),
        reason = reason.label(),
        fields = ?fields,
        "spawner_tweaked"
    );
    Ok(TweakOutcome::Updated { fields })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub processed: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub rejected: usize,
    pub failed: usize,
}

/// Runs [`tweak_spawner`] over every spawner; one failing spawner never stops the rest.
pub fn tweak_all<'a, S, I>(settings: &Settings, spawners: I, reason: TweakReason) -> SweepSummary
where
    S: LiveSpawner + 'a,
    I: IntoIterator<Item = &'a mut S>,
{
    let mut summary = SweepSummary::default();
    for spawner in spawners {
        summary.processed += 1;
        match tweak_spawner(settings, &mut *spawner, reason) {
            Ok(TweakOutcome::Updated { .. }) => summary.updated += 1,
            Ok(TweakOutcome::Unchanged) => summary.unchanged += 1,
            Ok(TweakOutcome::Rejected) => summary.rejected += 1,
            Err(error) => {
                summary.failed += 1;
                warn!(
                    location = %spawner.location(),
                    reason = reason.label(),
                    error = %error,
                    "spawner_tweak_failed"
                );
            }
        }
    }
    summary
}
