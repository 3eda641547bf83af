use common::{Language, Problem};

/// Resolve the editor's initial contents for a problem/language pair.
///
/// Returns the problem's template for the language when it carries one,
/// otherwise the language's placeholder comment. Draft lookup happens one
/// layer up; this function never consults the store or the network.
pub fn starter_code(problem: &Problem, language: Language) -> String {
    match problem.starter_for(language) {
        Some(template) => template.to_string(),
        None => language.placeholder().to_string(),
    }
}
