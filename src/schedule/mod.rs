// src/schedule/mod.rs

//! Calendar state machine over the persisted schedule document.
//!
//! Each date moves `unscheduled → has entries → finalized`. Entries can only
//! be added or removed while the date is not finalized; finalizing requires
//! a clean conflict pass and is one-way. Deleting a date's whole schedule
//! removes it from events, assignments and the finalized set at once and is
//! the only way back to the unscheduled state.

pub mod detect;

pub use detect::{Conflict, ScheduleScan, find_conflicts, parse_clock, scan_schedule_text};

use crate::error::{AppError, Result};
use crate::models::{Assignment, ScheduleData, ScheduleEvent};
use crate::storage::ScheduleStore;

/// Outcome of a finalize attempt.
#[derive(Debug)]
pub enum FinalizeOutcome {
    /// The date was added to the finalized set.
    Finalized,
    /// The date was already finalized; nothing changed.
    AlreadyFinalized,
    /// Overlapping events block finalization.
    Conflicts(Vec<Conflict>),
}

/// An event paired with its date, for the upcoming view.
#[derive(Debug, Clone)]
pub struct UpcomingEvent {
    pub date: String,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

/// The timetable manager. Loads the document wholesale at session start,
/// mutates it in place and persists it synchronously after every change.
pub struct Scheduler<S: ScheduleStore> {
    store: S,
    data: ScheduleData,
}

impl<S: ScheduleStore> Scheduler<S> {
    /// Open the scheduler, loading the current document from the store.
    pub async fn open(store: S) -> Result<Self> {
        let data = store.load().await?;
        Ok(Self { store, data })
    }

    pub fn data(&self) -> &ScheduleData {
        &self.data
    }

    fn ensure_editable(&self, date: &str) -> Result<()> {
        if self.data.is_finalized(date) {
            return Err(AppError::validation(format!(
                "Schedule for {date} is finalized; delete the full schedule to edit it"
            )));
        }
        Ok(())
    }

    /// Add an event to a non-finalized date.
    pub async fn add_event(&mut self, date: &str, event: ScheduleEvent) -> Result<()> {
        self.ensure_editable(date)?;
        self.data
            .events
            .entry(date.to_string())
            .or_default()
            .push(event);
        self.store.save(&self.data).await
    }

    /// Delete all events with the given name from a non-finalized date.
    pub async fn delete_event(&mut self, date: &str, name: &str) -> Result<()> {
        self.ensure_editable(date)?;
        if let Some(events) = self.data.events.get_mut(date) {
            events.retain(|e| e.name != name);
        }
        self.store.save(&self.data).await
    }

    /// Add an assignment to a non-finalized date.
    pub async fn add_assignment(&mut self, date: &str, assignment: Assignment) -> Result<()> {
        self.ensure_editable(date)?;
        self.data
            .assignments
            .entry(date.to_string())
            .or_default()
            .push(assignment);
        self.store.save(&self.data).await
    }

    /// Delete all assignments with the given name from a non-finalized date.
    pub async fn delete_assignment(&mut self, date: &str, name: &str) -> Result<()> {
        self.ensure_editable(date)?;
        if let Some(assignments) = self.data.assignments.get_mut(date) {
            assignments.retain(|a| a.name != name);
        }
        self.store.save(&self.data).await
    }

    /// Finalize a date if its stored events have no overlapping pairs.
    ///
    /// Idempotent: finalizing a finalized date changes nothing. There is no
    /// un-finalize operation.
    pub async fn finalize(&mut self, date: &str) -> Result<FinalizeOutcome> {
        if self.data.is_finalized(date) {
            return Ok(FinalizeOutcome::AlreadyFinalized);
        }

        let conflicts = find_conflicts(self.data.events_for(date));
        if !conflicts.is_empty() {
            return Ok(FinalizeOutcome::Conflicts(conflicts));
        }

        self.data.finalized_dates.push(date.to_string());
        self.store.save(&self.data).await?;
        Ok(FinalizeOutcome::Finalized)
    }

    /// Remove a date from events, assignments and the finalized set at once.
    pub async fn delete_schedule(&mut self, date: &str) -> Result<()> {
        self.data.events.remove(date);
        self.data.assignments.remove(date);
        self.data.finalized_dates.retain(|d| d != date);
        self.store.save(&self.data).await
    }

    /// Events for a date ordered by parsed start time; entries with
    /// unparsable times keep insertion order at the end.
    pub fn events_sorted(&self, date: &str) -> Vec<ScheduleEvent> {
        let mut events = self.data.events_for(date).to_vec();
        events.sort_by_key(|e| {
            let t = parse_clock(&e.start_time);
            (t.is_none(), t)
        });
        events
    }

    /// Up to `limit` events on dates at or after `today`, earliest first.
    pub fn upcoming_events(&self, today: &str, limit: usize) -> Vec<UpcomingEvent> {
        self.data
            .events
            .range(today.to_string()..)
            .flat_map(|(date, events)| {
                events.iter().map(move |e| UpcomingEvent {
                    date: date.clone(),
                    name: e.name.clone(),
                    start_time: e.start_time.clone(),
                    end_time: e.end_time.clone(),
                })
            })
            .take(limit)
            .collect()
    }
}
