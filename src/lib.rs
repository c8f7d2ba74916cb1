pub mod board;
pub mod config;
pub mod food;
pub mod frontend;
pub mod game;
pub mod input;
pub mod session;
pub mod snake;
pub mod terminal;
