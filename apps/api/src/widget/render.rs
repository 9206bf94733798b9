//! Render plan: what the widget should show for a given assessment.
//!
//! Everything here is pure. The display layer implements `Renderer` and only
//! ever receives `RenderInstruction`s.

use serde::Serialize;

use crate::assessment::models::{
    CapabilityKind, FitAssessment, FitLevel, Selections, FIELD_INFRASTRUCTURE, INFRA_ECS,
};

/// Pixels of slack when deciding whether the scroll container is at its bottom.
pub const STICKY_THRESHOLD_PX: f64 = 2.0;

/// Elements the widget touches, by DOM id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Element {
    AssessTitle,
    AssessDesc,
    CapabilitiesSection,
    FitBar,
    FitBarLabel,
    FitBarCount,
    FitBarNote,
    FitBarNoteMobile,
    ContinueButton,
    InfraEcsWrap,
    QuizSection,
    ContactSection,
    AssessmentCard,
    AssessmentText,
    BookCallButton,
    BookCallHint,
}

impl Element {
    pub fn dom_id(&self) -> &'static str {
        match self {
            Element::AssessTitle => "assessTitle",
            Element::AssessDesc => "assessDesc",
            Element::CapabilitiesSection => "capabilitiesSection",
            Element::FitBar => "fitBar",
            Element::FitBarLabel => "fitBarLabel",
            Element::FitBarCount => "fitBarCount",
            Element::FitBarNote => "fitBarNote",
            Element::FitBarNoteMobile => "fitBarNoteMobile",
            Element::ContinueButton => "continueBtn",
            Element::InfraEcsWrap => "infra-ecs-wrap",
            Element::QuizSection => "form-sect-1",
            Element::ContactSection => "form-sect-2",
            Element::AssessmentCard => "assessmentCard",
            Element::AssessmentText => "assessmentText",
            Element::BookCallButton => "bookCallBtn",
            Element::BookCallHint => "bookCallHint",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusIcon {
    CircleCheck,
    CircleX,
    CircleAlert,
    Info,
}

/// Colour family of the fit bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Caution,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FitBarTheme {
    pub tone: Tone,
    pub icon: StatusIcon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityRow {
    pub kind: CapabilityKind,
    pub icon: StatusIcon,
    /// Disabled rows are drawn in muted text.
    pub muted: bool,
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RenderInstruction {
    SetText { element: Element, text: String },
    SetHidden { element: Element, hidden: bool },
    SetDisabled { element: Element, disabled: bool },
    ReplaceCapabilities(Vec<CapabilityRow>),
    SetFitBarTheme(FitBarTheme),
    SetSticky(bool),
    Uncheck { field: &'static str, value: &'static str },
    ScrollToTop,
}

/// The display mutation layer.
pub trait Renderer {
    fn apply(&mut self, instruction: &RenderInstruction);

    fn apply_all(&mut self, instructions: &[RenderInstruction]) {
        for instruction in instructions {
            self.apply(instruction);
        }
    }
}

/// Scroll metrics of the widget's scroll container.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollPosition {
    pub scroll_top: f64,
    pub client_height: f64,
    pub scroll_height: f64,
}

impl ScrollPosition {
    pub fn is_at_bottom(&self) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height - STICKY_THRESHOLD_PX
    }

    /// The fit bar sticks to the viewport until the container is scrolled to the end.
    pub fn fit_bar_sticky(&self) -> bool {
        !self.is_at_bottom()
    }
}

/// Everything the quiz screen shows for one assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan {
    pub title: String,
    pub description: String,
    pub capabilities: Vec<CapabilityRow>,
    pub capabilities_hidden: bool,
    pub theme: FitBarTheme,
    pub bar_label: &'static str,
    pub bar_note: &'static str,
    pub count_text: String,
    pub continue_hidden: bool,
    pub ecs_visible: bool,
    pub sticky: bool,
}

pub fn fit_bar_theme(level: FitLevel, enabled_count: usize) -> FitBarTheme {
    if matches!(level, FitLevel::Good | FitLevel::Excellent) || enabled_count >= 3 {
        return FitBarTheme {
            tone: Tone::Positive,
            icon: StatusIcon::CircleCheck,
        };
    }
    match enabled_count {
        2 => FitBarTheme {
            tone: Tone::Caution,
            icon: StatusIcon::Info,
        },
        1 => FitBarTheme {
            tone: Tone::Caution,
            icon: StatusIcon::CircleAlert,
        },
        _ => FitBarTheme {
            tone: Tone::Neutral,
            icon: StatusIcon::CircleAlert,
        },
    }
}

/// Fit bar label and note for a level.
pub fn fit_bar_copy(level: FitLevel) -> (&'static str, &'static str) {
    match level {
        FitLevel::Excellent => ("Complete coverage", "Ready for comprehensive investigations"),
        FitLevel::Good => ("Good fit", "Ready for comprehensive investigations"),
        FitLevel::Minimal => ("Basic fit", "Some integrations missing"),
        FitLevel::Poor => ("Poor fit", "Requires logs or metrics integration"),
        FitLevel::Initial => ("Select your stack", "See what Cleric can do for you"),
    }
}

pub fn render_plan(
    selections: &Selections,
    assessment: &FitAssessment,
    scroll: ScrollPosition,
) -> RenderPlan {
    let capabilities = assessment
        .capabilities
        .iter()
        .map(|c| CapabilityRow {
            kind: c.kind,
            icon: if c.enabled {
                StatusIcon::CircleCheck
            } else {
                StatusIcon::CircleX
            },
            muted: !c.enabled,
            label: c.label.clone(),
            description: c.description.clone(),
        })
        .collect();
    let (bar_label, bar_note) = fit_bar_copy(assessment.level);

    RenderPlan {
        title: assessment.title.clone(),
        description: assessment.description.clone(),
        capabilities,
        capabilities_hidden: assessment.enabled_count == 0,
        theme: fit_bar_theme(assessment.level, assessment.enabled_count),
        bar_label,
        bar_note,
        count_text: format!(
            "{}/{} enabled",
            assessment.enabled_count, assessment.total_count
        ),
        continue_hidden: !assessment.can_continue,
        ecs_visible: selections.shows_ecs_option(),
        sticky: scroll.fit_bar_sticky(),
    }
}

impl RenderPlan {
    pub fn instructions(&self) -> Vec<RenderInstruction> {
        vec![
            RenderInstruction::SetHidden {
                element: Element::InfraEcsWrap,
                hidden: !self.ecs_visible,
            },
            RenderInstruction::SetText {
                element: Element::AssessTitle,
                text: self.title.clone(),
            },
            RenderInstruction::SetText {
                element: Element::AssessDesc,
                text: self.description.clone(),
            },
            RenderInstruction::ReplaceCapabilities(self.capabilities.clone()),
            RenderInstruction::SetHidden {
                element: Element::CapabilitiesSection,
                hidden: self.capabilities_hidden,
            },
            RenderInstruction::SetFitBarTheme(self.theme),
            RenderInstruction::SetText {
                element: Element::FitBarLabel,
                text: self.bar_label.to_string(),
            },
            RenderInstruction::SetText {
                element: Element::FitBarCount,
                text: self.count_text.clone(),
            },
            RenderInstruction::SetText {
                element: Element::FitBarNote,
                text: self.bar_note.to_string(),
            },
            RenderInstruction::SetText {
                element: Element::FitBarNoteMobile,
                text: self.bar_note.to_string(),
            },
            RenderInstruction::SetHidden {
                element: Element::ContinueButton,
                hidden: self.continue_hidden,
            },
            RenderInstruction::SetSticky(self.sticky),
        ]
    }
}

/// Instruction that clears a checked `ecs` option whose parent `aws` went away.
pub fn uncheck_orphan_ecs() -> RenderInstruction {
    RenderInstruction::Uncheck {
        field: FIELD_INFRASTRUCTURE,
        value: INFRA_ECS,
    }
}
