pub mod actions;
pub mod workflow;

pub use actions::{available_actions, is_allowed, plan, resulting_status, Action, PipelineContext, Step};
pub use workflow::{PipelineWorkflow, WorkflowError, WorkflowReport, WorkflowResult};
