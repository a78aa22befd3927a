use itertools::Itertools;

pub const MAX_DESCRIPTION_LENGTH: usize = 155;
const ELLIPSIS: &str = "...";

/// Joins the selected sentences with a single space and truncates the result
/// to [`MAX_DESCRIPTION_LENGTH`] characters.
pub fn format_description<S: AsRef<str>>(sentences: &[S]) -> String {
    let description = sentences.iter().map(AsRef::as_ref).join(" ");
    truncate(&description)
}

/// Cuts at a fixed character offset, not at a word boundary.
pub fn truncate(description: &str) -> String {
    if description.chars().count() <= MAX_DESCRIPTION_LENGTH {
        return description.to_string();
    }

    let mut truncated: String = description
        .chars()
        .take(MAX_DESCRIPTION_LENGTH - ELLIPSIS.len())
        .collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
