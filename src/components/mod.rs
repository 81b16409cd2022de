//! UI Components
//!
//! Leptos components for the cart drawer.

mod cart_drawer;
mod cart_row;
mod drawer_footer;

pub use cart_drawer::CartDrawer;
pub use cart_row::CartRow;
pub use drawer_footer::DrawerFooter;
