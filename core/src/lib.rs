#[macro_use]
extern crate derive_more;

pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod snake;
pub mod speed;
pub mod vector;
