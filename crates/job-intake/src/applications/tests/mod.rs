mod common;
mod validation;
