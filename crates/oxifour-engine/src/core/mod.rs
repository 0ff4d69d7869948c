pub use self::{board::*, cell::*, lines::*};

pub(crate) mod board;
pub(crate) mod cell;
pub mod lines;
