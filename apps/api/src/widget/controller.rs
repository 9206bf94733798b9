//! Form controller: owns the widget's two-screen flow.
//!
//! Inputs arrive as plain values (selections, contact fields, scroll metrics);
//! outputs leave as render instructions. Submission goes through a
//! `SubmissionSink`, so the controller never talks HTTP itself.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::assessment::models::{FitAssessment, Selections};
use crate::assessment::scoring::compute_fit_assessment;
use crate::config::Config;
use crate::contact::client::{SubmissionSink, SubmitAck};
use crate::contact::models::{ContactForm, ContactPayload};
use crate::contact::validation::{evaluate_contact_gate, ContactGate};
use crate::widget::render::{
    render_plan, uncheck_orphan_ecs, Element, RenderInstruction, Renderer, ScrollPosition,
};

/// How long "Sent!" stays on the button before it reverts.
pub const CONFIRMATION_DELAY: Duration = Duration::from_secs(2);

pub const SUBMIT_LABEL: &str = "Book a call";
const SENDING_LABEL: &str = "Sending...";
const SENT_LABEL: &str = "Sent!";
const SENDING_HINT: &str = "Submitting your details...";
const SENT_HINT: &str = "Thanks! Your request was submitted.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Quiz,
    Contact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Sending,
    /// Showing "Sent!" until `revert_confirmation`.
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Delivered. Call `revert_confirmation` once `revert_after` has elapsed.
    Sent {
        ack: SubmitAck,
        revert_after: Duration,
    },
    /// Not delivered; `message` is already on screen.
    Failed { message: String },
    /// The gate was closed, nothing was sent.
    Blocked,
}

pub struct FormController<R: Renderer> {
    renderer: R,
    page: String,
    selections: Selections,
    assessment: FitAssessment,
    scroll: ScrollPosition,
    contact: ContactForm,
    gate: ContactGate,
    screen: Screen,
    submit: SubmitState,
}

impl<R: Renderer> FormController<R> {
    /// Draws the untouched quiz and the closed contact gate.
    pub fn new(renderer: R, page: impl Into<String>) -> Self {
        let selections = Selections::default();
        let contact = ContactForm::default();
        let mut controller = FormController {
            renderer,
            page: page.into(),
            assessment: compute_fit_assessment(&selections),
            gate: evaluate_contact_gate(&contact),
            selections,
            scroll: ScrollPosition::default(),
            contact,
            screen: Screen::Quiz,
            submit: SubmitState::Idle,
        };
        controller.render_quiz(false);
        controller.render_gate();
        controller
    }

    /// Same as `new`, with the page taken from `WIDGET_PAGE`.
    pub fn from_config(renderer: R, config: &Config) -> Self {
        Self::new(renderer, config.widget_page.as_str())
    }

    pub fn page(&self) -> &str {
        &self.page
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn assessment(&self) -> &FitAssessment {
        &self.assessment
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn gate(&self) -> &ContactGate {
        &self.gate
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn submit_state(&self) -> SubmitState {
        self.submit
    }

    /// Re-scores after any quiz input changed.
    pub fn on_selections_changed(&mut self, mut selections: Selections) -> &FitAssessment {
        let dropped_ecs = selections.enforce_ecs_requires_aws();
        self.assessment = compute_fit_assessment(&selections);
        self.selections = selections;
        self.render_quiz(dropped_ecs);
        &self.assessment
    }

    pub fn on_scroll(&mut self, scroll: ScrollPosition) {
        self.scroll = scroll;
        self.renderer
            .apply(&RenderInstruction::SetSticky(scroll.fit_bar_sticky()));
    }

    /// Re-evaluates the submit gate after any contact input changed.
    pub fn on_contact_changed(&mut self, form: ContactForm) -> &ContactGate {
        self.contact = form;
        self.gate = evaluate_contact_gate(&self.contact);
        if self.submit != SubmitState::Confirmed {
            self.render_gate();
        }
        &self.gate
    }

    /// Moves to the contact screen. Refused while the assessment doesn't allow it.
    pub fn continue_to_contact(&mut self) -> bool {
        if self.screen == Screen::Contact {
            return true;
        }
        if !self.assessment.can_continue {
            return false;
        }
        self.screen = Screen::Contact;
        self.renderer.apply_all(&[
            hide(Element::QuizSection, true),
            hide(Element::ContactSection, false),
            hide(Element::FitBar, true),
            hide(Element::AssessmentCard, true),
            hide(Element::AssessmentText, false),
            RenderInstruction::ScrollToTop,
        ]);
        true
    }

    pub fn back_to_quiz(&mut self) {
        if self.screen == Screen::Quiz {
            return;
        }
        self.screen = Screen::Quiz;
        self.renderer.apply_all(&[
            hide(Element::ContactSection, true),
            hide(Element::QuizSection, false),
            hide(Element::FitBar, false),
            hide(Element::AssessmentCard, false),
            hide(Element::AssessmentText, true),
        ]);
    }

    /// Sends the current answers and contact details. At most one submission is
    /// in flight: the `&mut self` borrow is held until the sink settles.
    pub async fn submit<S>(&mut self, sink: &S, now: DateTime<Utc>) -> SubmitOutcome
    where
        S: SubmissionSink + ?Sized,
    {
        if !self.gate.can_submit || self.submit == SubmitState::Sending {
            return SubmitOutcome::Blocked;
        }

        let payload = ContactPayload::build(
            &self.contact,
            &self.selections,
            &self.assessment,
            now,
            &self.page,
        );

        self.submit = SubmitState::Sending;
        self.renderer.apply_all(&[
            disable(Element::BookCallButton, true),
            text(Element::BookCallButton, SENDING_LABEL),
            text(Element::BookCallHint, SENDING_HINT),
            hide(Element::BookCallHint, false),
        ]);

        match sink.submit(&payload).await {
            Ok(ack) => {
                debug!("Contact submission delivered: {:?}", ack.request_id);
                self.submit = SubmitState::Confirmed;
                self.renderer.apply_all(&[
                    text(Element::BookCallButton, SENT_LABEL),
                    disable(Element::BookCallButton, false),
                    text(Element::BookCallHint, SENT_HINT),
                    hide(Element::BookCallHint, false),
                ]);
                SubmitOutcome::Sent {
                    ack,
                    revert_after: CONFIRMATION_DELAY,
                }
            }
            Err(e) => {
                let message = e.to_string();
                warn!("Contact submission failed: {message}");
                self.submit = SubmitState::Idle;
                self.renderer.apply_all(&[
                    disable(Element::BookCallButton, false),
                    text(Element::BookCallButton, SUBMIT_LABEL),
                    text(Element::BookCallHint, &message),
                    hide(Element::BookCallHint, false),
                ]);
                SubmitOutcome::Failed { message }
            }
        }
    }

    /// Restores the button after the "Sent!" confirmation and re-checks the gate.
    pub fn revert_confirmation(&mut self) {
        if self.submit != SubmitState::Confirmed {
            return;
        }
        self.submit = SubmitState::Idle;
        self.renderer.apply(&text(Element::BookCallButton, SUBMIT_LABEL));
        self.gate = evaluate_contact_gate(&self.contact);
        self.render_gate();
    }

    fn render_quiz(&mut self, dropped_ecs: bool) {
        if dropped_ecs {
            self.renderer.apply(&uncheck_orphan_ecs());
        }
        let plan = render_plan(&self.selections, &self.assessment, self.scroll);
        self.renderer.apply_all(&plan.instructions());
    }

    fn render_gate(&mut self) {
        self.renderer.apply_all(&[
            disable(Element::BookCallButton, !self.gate.can_submit),
            text(Element::BookCallHint, &self.gate.hint),
            hide(Element::BookCallHint, self.gate.can_submit),
        ]);
    }
}

fn hide(element: Element, hidden: bool) -> RenderInstruction {
    RenderInstruction::SetHidden { element, hidden }
}

fn disable(element: Element, disabled: bool) -> RenderInstruction {
    RenderInstruction::SetDisabled { element, disabled }
}

fn text(element: Element, text: &str) -> RenderInstruction {
    RenderInstruction::SetText {
        element,
        text: text.to_string(),
    }
}
