//! Route table and resource route derivation

pub mod resource;
pub mod table;

pub use resource::ResourceAction;
pub use table::{match_template, to_axum_path, Resolution, RouteEntry, RouteTable};
