//MIT License
#![allow(non_snake_case)]
pub mod symbolic;
