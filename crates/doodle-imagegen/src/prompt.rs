const BASE_PROMPT: &str =
    "Children's coloring book style, vibrant colors, simple and fun, based on the provided sketch";

const SAFETY_PROMPT: &str = "Ensure output is safe for children, not scary, not violent, not NSFW.";

/// Build the text prompt for a doodle, optionally naming its subject
pub fn build_prompt(hint: Option<&str>) -> String {
    match hint.filter(|h| !h.is_empty()) {
        Some(hint) => format!("{BASE_PROMPT} of a {hint}. {SAFETY_PROMPT}"),
        None => format!("{BASE_PROMPT}. {SAFETY_PROMPT}"),
    }
}
