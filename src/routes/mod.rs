mod health_check;
mod register;
mod stats;
mod status;

pub use health_check::health_check;
pub use register::handle_register;
pub use stats::handle_get_stats;
pub use status::{
    handle_ecosystem_nodes, handle_system_status, handle_tools_status, handle_workflow_progress,
};
