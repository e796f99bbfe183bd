pub use board::*;
pub use bridge::*;
pub use errors::*;
pub use exec::*;
pub use game_loop::*;
pub use protocol::*;
pub use turn::*;
pub use writer::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod bridge;
mod errors;
mod exec;
mod game_loop;
mod protocol;
mod turn;
mod writer;
