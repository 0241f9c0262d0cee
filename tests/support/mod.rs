#![allow(dead_code)]

pub mod book;
pub mod catalog;
pub mod http;
pub mod source;
