pub mod http;
pub mod llm;
pub mod ocr;
pub mod vector;
