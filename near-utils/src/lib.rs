mod cache;
mod gas;
mod time;

pub use self::{cache::*, gas::*, time::*};
