//! Orchestration services for the workflow engine.

pub mod orchestrator;
pub mod registry;
pub mod strategies;

pub use orchestrator::{
    AssignTaskRequest, CreateTaskRequest, TaskActionRequest, TaskView, TaskWorkflowService,
    UpdateTaskRequest,
};
pub use registry::TaskActionRegistry;
pub use strategies::TaskActionStrategy;
