#![allow(dead_code)]

pub mod bot;
pub mod temp_db;
