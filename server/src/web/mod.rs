// server/src/web/mod.rs

// Declare child modules
pub mod handlers;
pub mod routes;
pub mod serializers;

#[cfg(test)]
mod tests;

pub use routes::configure_app_routes;
