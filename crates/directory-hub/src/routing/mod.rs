pub mod matcher;
pub mod resolver;
mod router;
mod service;
pub mod slug;

pub use matcher::{match_subdirectory_request, match_subdomain_request, RouteMatch};
pub use resolver::{resolve_request, Disposition, REDIRECT_STATUS};
pub use router::gateway_router;
pub use service::DirectoryGateway;
