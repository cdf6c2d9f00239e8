/// Skills offered as suggestions when a typed skill looks like a typo.
pub const KNOWN_SKILLS: [&str; 13] = [
    "python",
    "java",
    "c++",
    "data science",
    "machine learning",
    "artificial intelligence",
    "deep learning",
    "sql",
    "hadoop",
    "spark",
    "html",
    "css",
    "javascript",
];

pub const SUGGESTION_LIMIT: usize = 5;
/// Minimum Jaro-Winkler similarity for a suggestion.
pub const SUGGESTION_CUTOFF: f64 = 0.85;

/// Known skills similar to `skill`, best match first. Empty when the skill
/// is already known (case-insensitive) or nothing is close enough.
pub fn suggest_similar_skills(skill: &str) -> Vec<String> {
    let typed = skill.trim().to_lowercase();
    if typed.is_empty() || KNOWN_SKILLS.contains(&typed.as_str()) {
        return Vec::new();
    }

    let mut scored: Vec<(f64, &str)> = KNOWN_SKILLS
        .iter()
        .map(|known| (strsim::jaro_winkler(&typed, known), *known))
        .filter(|(score, _)| *score >= SUGGESTION_CUTOFF)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(SUGGESTION_LIMIT)
        .map(|(_, known)| known.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typo_suggests_the_known_skill() {
        assert_eq!(suggest_similar_skills("pyhton"), vec!["python".to_string()]);
        assert_eq!(suggest_similar_skills("javscript")[0], "javascript");
    }

    #[test]
    fn exact_match_is_not_suggested() {
        assert!(suggest_similar_skills("Python").is_empty());
        assert!(suggest_similar_skills("machine learning").is_empty());
    }

    #[test]
    fn unrelated_input_has_no_suggestions() {
        assert!(suggest_similar_skills("underwater basket weaving").is_empty());
        assert!(suggest_similar_skills("").is_empty());
    }
}
