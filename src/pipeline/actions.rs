//! Pure decision logic: which actions a candidate's pipeline state allows.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{Error, Result};
use crate::models::assessment::Assessment;
use crate::models::candidate::{Candidate, PipelineStatus};
use crate::models::interview::{Interview, Stage};
use crate::models::AssessmentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScheduleInterview(Stage),
    /// Records a held interview round in the candidate's status.
    CompleteInterview(Stage),
    SendAssessment,
    /// Navigation to the assessment detail view; changes nothing.
    CheckAssessment,
    Hire,
    Reject,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::ScheduleInterview(Stage::First) => "Schedule first interview",
            Action::ScheduleInterview(Stage::Second) => "Schedule second interview",
            Action::CompleteInterview(Stage::First) => "Complete first interview",
            Action::CompleteInterview(Stage::Second) => "Complete second interview",
            Action::SendAssessment => "Send Assessment",
            Action::CheckAssessment => "Check Assessment",
            Action::Hire => "Hire",
            Action::Reject => "Reject",
        }
    }

    pub fn is_transition(&self) -> bool {
        !matches!(self, Action::CheckAssessment)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One remote step of a pipeline workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Load,
    CreateInterview(Stage),
    CreateAssessment,
    UpdateStatus(PipelineStatus),
    Refresh,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Load => f.write_str("load candidate"),
            Step::CreateInterview(stage) => write!(f, "create {stage} interview"),
            Step::CreateAssessment => f.write_str("create assessment"),
            Step::UpdateStatus(status) => write!(f, "set status to {status}"),
            Step::Refresh => f.write_str("refresh candidate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentProgress {
    pub id: AssessmentId,
    pub is_completed: bool,
}

impl From<&Assessment> for AssessmentProgress {
    fn from(assessment: &Assessment) -> Self {
        Self {
            id: assessment.id.clone(),
            is_completed: assessment.is_completed,
        }
    }
}

/// Everything the state machine looks at for one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PipelineContext {
    pub status: PipelineStatus,
    pub stages: BTreeSet<Stage>,
    /// In server order; the first entry is the "first assessment".
    pub assessments: Vec<AssessmentProgress>,
}

impl PipelineContext {
    pub fn new(status: PipelineStatus) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn from_candidate(candidate: &Candidate) -> Self {
        Self::new(candidate.interview_status)
            .with_interviews(&candidate.interview_schedules)
            .with_assessments(&candidate.assessments)
    }

    pub fn with_interviews(mut self, interviews: &[Interview]) -> Self {
        self.stages.extend(interviews.iter().map(|i| i.stage));
        self
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stages.insert(stage);
        self
    }

    /// Merges by id; a later copy of the same assessment replaces the earlier one.
    pub fn with_assessments(mut self, assessments: &[Assessment]) -> Self {
        for assessment in assessments {
            let progress = AssessmentProgress::from(assessment);
            match self.assessments.iter_mut().find(|a| a.id == progress.id) {
                Some(existing) => *existing = progress,
                None => self.assessments.push(progress),
            }
        }
        self
    }

    pub fn has_stage(&self, stage: Stage) -> bool {
        self.stages.contains(&stage)
    }

    /// The interview round the candidate is in, `None` once terminal.
    pub fn current_stage(&self) -> Option<Stage> {
        match self.status {
            PipelineStatus::Shortlisted => Some(Stage::First),
            PipelineStatus::FirstInterviewComplete | PipelineStatus::SecondInterviewComplete => {
                Some(Stage::Second)
            }
            PipelineStatus::Hired | PipelineStatus::Rejected | PipelineStatus::Blacklisted => None,
        }
    }

    fn shows_check_assessment(&self) -> bool {
        match self.current_stage() {
            Some(Stage::First) => self.assessments.first().is_some_and(|a| !a.is_completed),
            Some(Stage::Second) => !self.assessments.is_empty(),
            None => false,
        }
    }
}

pub fn available_actions(ctx: &PipelineContext) -> Vec<Action> {
    use PipelineStatus::*;

    if ctx.status.is_terminal() {
        return Vec::new();
    }

    let mut actions = Vec::new();
    match ctx.status {
        Shortlisted if !ctx.has_stage(Stage::First) => {
            actions.push(Action::ScheduleInterview(Stage::First))
        }
        Shortlisted => actions.push(Action::CompleteInterview(Stage::First)),
        FirstInterviewComplete if !ctx.has_stage(Stage::Second) => {
            actions.push(Action::ScheduleInterview(Stage::Second))
        }
        FirstInterviewComplete => actions.push(Action::CompleteInterview(Stage::Second)),
        _ => {}
    }

    if matches!(ctx.status, Shortlisted | FirstInterviewComplete) && ctx.assessments.is_empty() {
        actions.push(Action::SendAssessment);
    }
    if ctx.shows_check_assessment() {
        actions.push(Action::CheckAssessment);
    }

    actions.push(Action::Hire);
    actions.push(Action::Reject);
    actions
}

pub fn is_allowed(ctx: &PipelineContext, action: Action) -> bool {
    available_actions(ctx).contains(&action)
}

/// Status the candidate ends up in once `action` completes; `None` if unchanged.
pub fn resulting_status(action: Action) -> Option<PipelineStatus> {
    match action {
        Action::ScheduleInterview(Stage::First) | Action::CompleteInterview(Stage::First) => {
            Some(PipelineStatus::FirstInterviewComplete)
        }
        Action::CompleteInterview(Stage::Second) => Some(PipelineStatus::SecondInterviewComplete),
        Action::Hire => Some(PipelineStatus::Hired),
        Action::Reject => Some(PipelineStatus::Rejected),
        Action::ScheduleInterview(Stage::Second)
        | Action::SendAssessment
        | Action::CheckAssessment => None,
    }
}

/// Remote steps for `action`, or `InvalidTransition` if the context refuses it.
pub fn plan(ctx: &PipelineContext, action: Action) -> Result<Vec<Step>> {
    if !is_allowed(ctx, action) {
        return Err(Error::InvalidTransition {
            action: action.label().to_string(),
            status: ctx.status,
        });
    }

    let mut steps = Vec::new();
    match action {
        Action::ScheduleInterview(stage) => steps.push(Step::CreateInterview(stage)),
        Action::SendAssessment => steps.push(Step::CreateAssessment),
        Action::CheckAssessment => return Ok(steps),
        Action::CompleteInterview(_) | Action::Hire | Action::Reject => {}
    }
    if let Some(status) = resulting_status(action) {
        steps.push(Step::UpdateStatus(status));
    }
    steps.push(Step::Refresh);
    Ok(steps)
}
