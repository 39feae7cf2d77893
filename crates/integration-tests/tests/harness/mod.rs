#![allow(dead_code)]

pub mod config;
pub mod doodles;
pub mod mock_openai;
pub mod server;
