pub mod byte;
pub mod game;
pub mod protocol;
pub mod solve;
