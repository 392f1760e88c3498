//! Headless board: store, columns, cards, reordering and composition.
//!
//! # Responsibility
//! - Hold what a frontend renders and react to what a frontend reports
//!   (clicks, typing, blur, drags, resizes).
//! - Leave drawing to the frontend.

pub mod card;
pub mod collision;
pub mod controller;
pub mod reorder;
pub mod store;
pub mod view;
