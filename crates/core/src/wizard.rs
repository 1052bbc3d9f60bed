//! Multi-step form wizard state machine.
//!
//! Each enquiry form is collected over numbered steps (1-based). The
//! wizard holds the draft payload and the current phase, gates forward
//! navigation on the current step's completeness, and tracks the
//! submission lifecycle: editing, an in-flight submission, and the
//! success or failure outcome. Going back is never gated; partially
//! filled steps are kept.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// StepForm
// ---------------------------------------------------------------------------

/// A form payload collected across numbered wizard steps.
///
/// `step_complete` checks one step's fields and reports the first
/// violated rule; `validate` re-runs every step in order, which is what
/// the submission endpoint calls so client gating can never be the only
/// line of defense.
pub trait StepForm {
    /// Number of steps, 1-based. The last step hosts the submit action.
    const STEP_COUNT: u8;

    /// Check the fields belonging to `step` (1-based).
    fn step_complete(&self, step: u8) -> Result<(), CoreError>;

    /// Check every step in order, failing on the first violation.
    fn validate(&self) -> Result<(), CoreError> {
        for step in 1..=Self::STEP_COUNT {
            self.step_complete(step)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Wizard phase
// ---------------------------------------------------------------------------

/// Lifecycle phase of a wizard instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardPhase {
    /// The user is filling in the given step (1-based).
    Editing { step: u8 },
    /// A submission is in flight; the draft is frozen.
    Submitting,
    /// The submission was recorded; the draft has been cleared.
    Succeeded,
    /// The submission failed; the draft is retained for another try.
    Failed { message: String },
}

// ---------------------------------------------------------------------------
// Wizard
// ---------------------------------------------------------------------------

/// Drives a [`StepForm`] draft through the step/submit lifecycle.
#[derive(Debug)]
pub struct Wizard<F: StepForm + Default> {
    draft: F,
    phase: WizardPhase,
}

impl<F: StepForm + Default> Wizard<F> {
    /// A fresh wizard on step 1 with an empty draft.
    pub fn new() -> Self {
        Self {
            draft: F::default(),
            phase: WizardPhase::Editing { step: 1 },
        }
    }

    pub fn phase(&self) -> &WizardPhase {
        &self.phase
    }

    /// The current step, when the wizard is in the editing phase.
    pub fn step(&self) -> Option<u8> {
        match self.phase {
            WizardPhase::Editing { step } => Some(step),
            _ => None,
        }
    }

    pub fn draft(&self) -> &F {
        &self.draft
    }

    /// Mutable access to the draft. `None` while a submission is in
    /// flight or after it succeeded, so late edits cannot race the
    /// payload that was sent.
    pub fn draft_mut(&mut self) -> Option<&mut F> {
        match self.phase {
            WizardPhase::Submitting | WizardPhase::Succeeded => None,
            _ => Some(&mut self.draft),
        }
    }

    /// Advance to the next step. Fails if the current step is
    /// incomplete, if already on the last step, or outside the editing
    /// phase. Returns the new step number.
    pub fn next(&mut self) -> Result<u8, CoreError> {
        let step = match self.phase {
            WizardPhase::Editing { step } => step,
            _ => {
                return Err(CoreError::Validation(
                    "Form is not being edited".to_string(),
                ))
            }
        };
        if step >= F::STEP_COUNT {
            return Err(CoreError::Validation(
                "Already on the last step".to_string(),
            ));
        }
        self.draft.step_complete(step)?;
        let next = step + 1;
        self.phase = WizardPhase::Editing { step: next };
        Ok(next)
    }

    /// Go back one step. Never gated; returns the new step number, or
    /// `None` when already on step 1 or outside the editing phase.
    pub fn back(&mut self) -> Option<u8> {
        if let WizardPhase::Editing { step } = self.phase {
            if step > 1 {
                let prev = step - 1;
                self.phase = WizardPhase::Editing { step: prev };
                return Some(prev);
            }
        }
        None
    }

    /// Start a submission. Allowed from the last editing step or from
    /// the failed phase (retry). Runs the full multi-step validation
    /// and, on success, freezes the draft and returns a reference to
    /// the payload to send.
    pub fn begin_submit(&mut self) -> Result<&F, CoreError> {
        match &self.phase {
            WizardPhase::Submitting => {
                return Err(CoreError::Validation(
                    "A submission is already in flight".to_string(),
                ))
            }
            WizardPhase::Editing { step } if *step == F::STEP_COUNT => {}
            WizardPhase::Failed { .. } => {}
            _ => {
                return Err(CoreError::Validation(
                    "Finish the remaining steps first".to_string(),
                ))
            }
        }
        self.draft.validate()?;
        self.phase = WizardPhase::Submitting;
        Ok(&self.draft)
    }

    /// Record the outcome of an in-flight submission. Success clears
    /// the draft; failure keeps it so the user can retry. A completion
    /// arriving in any other phase is stale and ignored.
    pub fn resolve_submit(&mut self, outcome: Result<(), String>) {
        if self.phase != WizardPhase::Submitting {
            return;
        }
        match outcome {
            Ok(()) => {
                self.draft = F::default();
                self.phase = WizardPhase::Succeeded;
            }
            Err(message) => {
                self.phase = WizardPhase::Failed { message };
            }
        }
    }

    /// Return from the failed phase to editing, landing on the last
    /// step with the draft intact. `false` when not in the failed
    /// phase.
    pub fn resume_editing(&mut self) -> bool {
        if matches!(self.phase, WizardPhase::Failed { .. }) {
            self.phase = WizardPhase::Editing {
                step: F::STEP_COUNT,
            };
            true
        } else {
            false
        }
    }

    /// Discard everything and start over on step 1 ("submit another
    /// response").
    pub fn reset(&mut self) {
        self.draft = F::default();
        self.phase = WizardPhase::Editing { step: 1 };
    }
}

impl<F: StepForm + Default> Default for Wizard<F> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
