/// The fixed structured-extraction prompt sent with every pair
///
/// Kept as one constant so every extraction run asks the model for the same
/// field set; the parser in this module mirrors these field names.
pub(crate) const CARD_EXTRACTION_PROMPT: &str = "\
You are a trading card identification expert. You are given the front image \
of a trading card and, when available, the back image of the same card. \
Identify the card and respond with a single JSON object and nothing else, \
using exactly these fields:

{
  \"player\": \"player or character name, or null\",
  \"year\": 1989,
  \"card_number\": \"card number as printed, or null\",
  \"set_name\": \"product/set name, or null\",
  \"condition_estimate\": \"one of: gem_mint, near_mint, excellent, good, poor, or null\",
  \"is_parallel\": false,
  \"parallel_type\": \"parallel or insert name, or null\",
  \"confidence\": 0.0
}

Use null for anything you cannot read from the images. \"confidence\" is your \
overall confidence in the identification between 0 and 1.";
