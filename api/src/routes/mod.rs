pub mod ask;
pub mod files;
pub mod general_route;
pub mod history;
