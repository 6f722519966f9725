pub mod plan_session;

pub use plan_session::PlanSession;
