mod common;
mod routing;
mod validation;
