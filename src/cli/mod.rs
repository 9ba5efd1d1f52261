mod command;
mod runner;
mod util;

pub use command::Command;
pub use runner::{OutputMode, run};
pub use util::{build_spec, parse_filter_arg};
