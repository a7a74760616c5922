pub mod health_route;
pub mod llm_health_route;
