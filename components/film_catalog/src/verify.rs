use crate::model::FilmHash;

/// Check a guess against the hash of the right answer
///
/// The guess is lowercased and hashed, nothing else. Surrounding whitespace
/// and punctuation count, so "Casablanca " is wrong.
pub fn verify(guess: &str, target_hash: &str) -> bool {
    FilmHash::of_title(guess).as_str().as_bytes() == target_hash.as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("casablanca")]
    #[case("Casablanca")]
    #[case("")]
    #[case("2001: A Space Odyssey")]
    #[case("Léon")]
    fn guess_matches_its_own_hash(#[case] title: &str) {
        let hash = FilmHash::of_title(&title.to_lowercase());
        assert!(verify(title, hash.as_str()));
    }

    #[rstest]
    #[case("Casablanca ", "casablanca")]
    #[case(" casablanca", "casablanca")]
    #[case("casablanca.", "casablanca")]
    #[case("Vertigo", "casablanca")]
    #[case("", "casablanca")]
    fn different_titles_do_not_match(#[case] guess: &str, #[case] answer: &str) {
        let hash = FilmHash::of_title(answer);
        assert!(!verify(guess, hash.as_str()));
    }

    #[test]
    fn uppercase_target_hash_does_not_match() {
        let hash = FilmHash::of_title("heat").as_str().to_uppercase();
        assert!(!verify("heat", &hash));
    }
}
