// core/src/cart/mod.rs

pub mod model;
pub mod service;
pub mod store;

pub use model::{Cart, CartId, CartItem, CartItemId, CartSummary, UserId};
pub use service::CartService;
pub use store::CartStore;
