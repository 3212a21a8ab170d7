pub mod routing;
pub mod runtime;
