//! Value Objects - Immutable, identity-less domain primitives

mod endpoint;
mod fault_class;
mod fragment_handle;
mod injection_schedule;
mod injection_site;
mod query_id;
mod site_class;

pub use endpoint::{Endpoint, EndpointFilter};
pub use fault_class::FaultClass;
pub use fragment_handle::FragmentHandle;
pub use injection_schedule::InjectionSchedule;
pub use injection_site::InjectionSite;
pub use query_id::QueryId;
pub use site_class::SiteClass;
