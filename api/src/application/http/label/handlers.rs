pub mod extract_label;
pub mod extract_nutrition_label;
