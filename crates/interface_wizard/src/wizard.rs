//! Wizard controller
//!
//! Drives the four-section flow
//!
//! ```text
//! Renter -> Property -> Stay -> Payment -> Completed
//! ```
//!
//! Every accepted submission replaces that section's record, writes the full
//! snapshot and moves one step forward. Submitting Payment also composes and
//! renders the reservation document; the wizard only reaches `Completed` when
//! rendering succeeds.
//!
//! State sits behind a mutex so a shared controller can report
//! [`WizardError::Busy`] to callers that act while a render is in flight.
//! The lock is never held across an await point.

use rust_decimal::Decimal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

use domain_document::{DocumentComposer, DocumentRenderer, RenderedArtifact, SectionKind};
use domain_reservation::{
    PaymentForm, ReservationAggregate, Section, SectionInput, SectionValidator, SnapshotVault,
    WizardSnapshot, WizardStep, DEFAULT_DAMAGE_DEPOSIT,
};

use crate::error::WizardError;

/// Result of an accepted submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The section was stored and the wizard moved to `step`
    Advanced { step: WizardStep },
    /// The reservation was finalised
    Completed {
        reservation_number: String,
        artifact: RenderedArtifact,
    },
}

/// One entry of the step indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepProgress {
    pub section: Section,
    pub label: String,
    pub completed: bool,
    pub active: bool,
}

#[derive(Debug)]
struct WizardState {
    aggregate: ReservationAggregate,
    step: WizardStep,
    persistence_degraded: bool,
    last_artifact: Option<RenderedArtifact>,
}

/// Clears the finalising flag when a render ends, however it ends
struct FinalizingGuard<'a>(&'a AtomicBool);

impl Drop for FinalizingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct WizardController {
    vault: SnapshotVault,
    composer: DocumentComposer,
    renderer: Arc<dyn DocumentRenderer>,
    default_deposit: Decimal,
    state: Mutex<WizardState>,
    finalizing: AtomicBool,
}

impl WizardController {
    /// Creates the controller and restores any stored snapshot
    ///
    /// A missing or unreadable snapshot starts an empty wizard.
    pub fn new(
        vault: SnapshotVault,
        composer: DocumentComposer,
        renderer: Arc<dyn DocumentRenderer>,
    ) -> Self {
        let (aggregate, step) = rehydrate(&vault);
        Self {
            vault,
            composer,
            renderer,
            default_deposit: DEFAULT_DAMAGE_DEPOSIT,
            state: Mutex::new(WizardState {
                aggregate,
                step,
                persistence_degraded: false,
                last_artifact: None,
            }),
            finalizing: AtomicBool::new(false),
        }
    }

    /// Damage deposit pre-filled on a fresh payment form
    pub fn with_default_deposit(mut self, deposit: Decimal) -> Self {
        self.default_deposit = deposit;
        self
    }

    fn state(&self) -> MutexGuard<'_, WizardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current_step(&self) -> WizardStep {
        self.state().step
    }

    pub fn aggregate(&self) -> ReservationAggregate {
        self.state().aggregate.clone()
    }

    /// True while the reservation document is being rendered
    pub fn is_finalizing(&self) -> bool {
        self.finalizing.load(Ordering::SeqCst)
    }

    /// True when the last snapshot write failed
    ///
    /// The in-memory state stays authoritative; only resume is affected.
    pub fn persistence_degraded(&self) -> bool {
        self.state().persistence_degraded
    }

    /// The artifact of the last successful finalisation
    pub fn last_artifact(&self) -> Option<RenderedArtifact> {
        self.state().last_artifact.clone()
    }

    /// Draft for `section`, pre-filled from its stored record
    pub fn form_for(&self, section: Section) -> SectionInput {
        let state = self.state();
        match (section, &state.aggregate.payment) {
            (Section::Payment, None) => {
                SectionInput::Payment(PaymentForm::with_deposit(self.default_deposit))
            }
            _ => state.aggregate.form_for(section),
        }
    }

    /// Draft for the active section, `None` once completed
    pub fn active_form(&self) -> Option<SectionInput> {
        let section = self.current_step().section()?;
        Some(self.form_for(section))
    }

    /// The four sections with their labels and position markers
    pub fn progress(&self) -> Vec<StepProgress> {
        let step = self.current_step();
        let localizer = self.composer.localizer();
        Section::ALL
            .into_iter()
            .map(|section| StepProgress {
                section,
                label: localizer.text(document_kind(section).title_id()),
                completed: section.index() < step.index(),
                active: step.section() == Some(section),
            })
            .collect()
    }

    /// Validates and stores the active section
    ///
    /// Invalid input returns [`WizardError::Validation`] with no change to
    /// the aggregate, the step or the stored snapshot. Payment submissions
    /// continue into finalisation.
    ///
    /// The finalising flag is only read and claimed under the state lock, so
    /// a competing submission is turned away before it can merge anything.
    pub async fn submit_section(&self, input: SectionInput) -> Result<SubmitOutcome, WizardError> {
        let submitted = input.section();
        let (guard, aggregate) = {
            let mut state = self.state();
            if self.is_finalizing() {
                return Err(WizardError::Busy);
            }
            let active = state.step.section();
            if active != Some(submitted) {
                return Err(WizardError::WrongSection { active, submitted });
            }

            let record = SectionValidator::validate(input).map_err(|errors| {
                WizardError::Validation {
                    section: submitted,
                    errors,
                }
            })?;

            if submitted != Section::Payment {
                state.aggregate.merge(record);
                let next = state.step.next();
                state.step = next;
                self.persist(&mut state);
                info!(section = %submitted, step = ?next, "Section accepted");
                return Ok(SubmitOutcome::Advanced { step: next });
            }

            if self.finalizing.swap(true, Ordering::SeqCst) {
                return Err(WizardError::Busy);
            }
            let guard = FinalizingGuard(&self.finalizing);
            state.aggregate.merge(record);
            self.persist(&mut state);
            info!(section = %submitted, "Payment accepted, finalising");
            (guard, state.aggregate.clone())
        };

        self.finalize(guard, &aggregate).await
    }

    /// Composes and renders the document for the aggregate captured at
    /// submission
    ///
    /// On failure the wizard stays on Payment and may be resubmitted.
    async fn finalize(
        &self,
        _guard: FinalizingGuard<'_>,
        aggregate: &ReservationAggregate,
    ) -> Result<SubmitOutcome, WizardError> {
        let document = self.composer.compose(aggregate).map_err(|e| {
            warn!(error = %e, "Reservation could not be composed");
            WizardError::from(e)
        })?;

        let artifact = match self.renderer.render(&document).await {
            Ok(artifact) => artifact,
            Err(e) => {
                warn!(
                    reservation_number = %document.reservation_number,
                    error = %e,
                    "Reservation document render failed"
                );
                return Err(WizardError::from(e));
            }
        };

        let mut state = self.state();
        state.step = WizardStep::Completed;
        state.last_artifact = Some(artifact.clone());
        info!(
            reservation_number = %document.reservation_number,
            file_name = %artifact.file_name,
            pages = artifact.pages,
            "Reservation finalised"
        );

        Ok(SubmitOutcome::Completed {
            reservation_number: document.reservation_number.to_string(),
            artifact,
        })
    }

    /// Moves one step back from Property, Stay or Payment
    ///
    /// Does nothing on Renter and Completed. Stored records are untouched.
    pub fn go_back(&self) -> Result<WizardStep, WizardError> {
        let mut state = self.state();
        if self.is_finalizing() {
            return Err(WizardError::Busy);
        }
        if let Some(previous) = state.step.previous() {
            info!(from = ?state.step, to = ?previous, "Stepped back");
            state.step = previous;
        }
        Ok(state.step)
    }

    /// Empties the aggregate, returns to Renter and deletes the snapshot
    ///
    /// The in-memory reset always happens; a failed delete is reported.
    pub fn reset(&self) -> Result<(), WizardError> {
        let mut state = self.state();
        if self.is_finalizing() {
            return Err(WizardError::Busy);
        }
        state.aggregate = ReservationAggregate::new();
        state.step = WizardStep::Renter;
        state.last_artifact = None;
        info!("Wizard reset");

        if let Err(e) = self.vault.clear() {
            warn!(key = %self.vault.key(), error = %e, "Stored snapshot could not be removed");
            state.persistence_degraded = true;
            return Err(e.into());
        }
        state.persistence_degraded = false;
        Ok(())
    }

    /// Writes the full snapshot; failures only mark persistence as degraded
    fn persist(&self, state: &mut WizardState) {
        let snapshot = WizardSnapshot::new(state.aggregate.clone(), state.step);
        match self.vault.save(&snapshot) {
            Ok(()) => state.persistence_degraded = false,
            Err(e) => {
                warn!(key = %self.vault.key(), error = %e, "Snapshot write failed");
                state.persistence_degraded = true;
            }
        }
    }
}

impl std::fmt::Debug for WizardController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardController")
            .field("vault", &self.vault)
            .field("state", &*self.state())
            .field("finalizing", &self.is_finalizing())
            .finish()
    }
}

fn rehydrate(vault: &SnapshotVault) -> (ReservationAggregate, WizardStep) {
    match vault.load() {
        Ok(Some(snapshot)) => {
            let step = snapshot.step();
            info!(step = ?step, "Wizard restored from snapshot");
            (snapshot.aggregate, step)
        }
        Ok(None) => (ReservationAggregate::new(), WizardStep::Renter),
        Err(e) => {
            warn!(key = %vault.key(), error = %e, "Stored snapshot unreadable, starting empty");
            (ReservationAggregate::new(), WizardStep::Renter)
        }
    }
}

fn document_kind(section: Section) -> SectionKind {
    match section {
        Section::Renter => SectionKind::Renter,
        Section::Property => SectionKind::Property,
        Section::Stay => SectionKind::Stay,
        Section::Payment => SectionKind::Payment,
    }
}
