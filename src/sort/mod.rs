pub mod element;
pub mod engine;
pub mod event;
