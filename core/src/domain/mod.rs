pub mod assessment;
pub mod chat;
pub mod common;
pub mod label;
pub mod ocr;
pub mod recommendation;
pub mod retrieval;
