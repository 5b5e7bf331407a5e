//! Price plot matching.
//!
//! Price trend plots live flat in `findings/onion_price/` and carry no naming
//! convention. The only link between a taluka and its plot is the taluka name
//! appearing somewhere in the filename, so matching is a case-insensitive
//! substring test. No scoring, no edit distance.
//!
//! First match in candidate order wins. The scanner sorts the candidate list
//! lexicographically before it reaches this function, so the tie-break does
//! not depend on directory enumeration order. When several candidates match,
//! the extras are logged at debug level and otherwise ignored.

/// Return the first candidate whose lowercase form contains the lowercase
/// taluka name, or `None` when nothing matches.
pub fn match_price_plot<'a>(taluka: &str, candidates: &'a [String]) -> Option<&'a str> {
    let needle = taluka.to_lowercase();
    let mut matches = candidates
        .iter()
        .filter(|name| name.to_lowercase().contains(&needle));

    let first = matches.next()?;
    let extras = matches.count();
    if extras > 0 {
        log::debug!("{} additional price plots match '{taluka}', using {first}", extras);
    }
    Some(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn matches_by_substring() {
        let files = candidates(&["nashik_price.jpg", "sinnar_price.jpg"]);
        assert_eq!(match_price_plot("Sinnar", &files), Some("sinnar_price.jpg"));
    }

    #[test]
    fn no_match_is_none() {
        let files = candidates(&["nashik_price.jpg", "sinnar_price.jpg"]);
        assert_eq!(match_price_plot("Malegaon", &files), None);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let files = candidates(&["DINDORI_mandi.jpg"]);
        assert_eq!(match_price_plot("dindori", &files), Some("DINDORI_mandi.jpg"));
    }

    #[test]
    fn first_candidate_wins_on_ties() {
        let files = candidates(&["sinnar_2020.jpg", "sinnar_2021.jpg"]);
        assert_eq!(match_price_plot("Sinnar", &files), Some("sinnar_2020.jpg"));
    }

    #[test]
    fn empty_candidate_list() {
        assert_eq!(match_price_plot("Sinnar", &[]), None);
    }
}
