pub mod files_request;
pub mod files_route;
