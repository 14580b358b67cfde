#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]

pub mod errors;
pub mod config;
pub mod algebra;
pub mod utils;
pub mod abs;
