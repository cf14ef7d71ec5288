mod all;
mod clock;
mod footer;
mod log;
mod todo;
mod translator;
mod weather;

use self::log::log;
use super::*;
use clock::clock;
use footer::footer;
use todo::todo;
use translator::translator;
use weather::weather;

pub use all::all as render;
