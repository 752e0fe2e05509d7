//! Data models module
//!
//! Defines request and response data structures for the upstream OpenAI API

pub mod openai;
