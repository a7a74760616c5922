pub mod analyze_files_route;
pub mod analyze_request;
pub mod analyze_route;
