mod boards;
mod common;
mod routing;
