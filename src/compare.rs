use std::collections::BTreeSet;

/// Usernames are case-sensitive string identities; `BTreeSet` gives us
/// set semantics plus a stable lexicographic iteration order for rendering.
pub type UserSet = BTreeSet<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonResult {
    pub followers_total: usize,
    pub following_total: usize,
    /// Users you follow who do not follow you back, sorted.
    pub non_followers: Vec<String>,
    /// Users who follow you but whom you do not follow back, sorted.
    pub fans: Vec<String>,
}

/// Pure set comparison: `non_followers = following \ followers`,
/// `fans = followers \ following`.
pub fn compare(followers: &UserSet, following: &UserSet) -> ComparisonResult {
    ComparisonResult {
        followers_total: followers.len(),
        following_total: following.len(),
        non_followers: following.difference(followers).cloned().collect(),
        fans: followers.difference(following).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(users: &[&str]) -> UserSet {
        users.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn overlapping_sets() {
        let r = compare(&set(&["alice", "bob"]), &set(&["bob", "carol"]));
        assert_eq!(r.followers_total, 2);
        assert_eq!(r.following_total, 2);
        assert_eq!(r.non_followers, vec!["carol"]);
        assert_eq!(r.fans, vec!["alice"]);
    }

    #[test]
    fn empty_followers() {
        let r = compare(&set(&[]), &set(&["dave"]));
        assert_eq!(r.non_followers, vec!["dave"]);
        assert!(r.fans.is_empty());
    }

    #[test]
    fn mutual_users_appear_in_neither_list() {
        let r = compare(&set(&["mutual", "fan"]), &set(&["mutual", "oneway"]));
        assert!(!r.non_followers.contains(&"mutual".to_string()));
        assert!(!r.fans.contains(&"mutual".to_string()));
        assert_eq!(r.non_followers, vec!["oneway"]);
        assert_eq!(r.fans, vec!["fan"]);
    }

    #[test]
    fn identical_sets_produce_empty_lists() {
        let r = compare(&set(&["a", "b"]), &set(&["a", "b"]));
        assert!(r.non_followers.is_empty());
        assert!(r.fans.is_empty());
    }

    #[test]
    fn comparison_is_deterministic() {
        let followers = set(&["zed", "amy", "kim"]);
        let following = set(&["amy", "bob", "zed", "ann"]);
        let first = compare(&followers, &following);
        let second = compare(&followers, &following);
        assert_eq!(first, second);
        // Output lists come out lexicographically sorted.
        assert_eq!(first.non_followers, vec!["ann", "bob"]);
    }

    #[test]
    fn logins_are_case_sensitive() {
        let r = compare(&set(&["Alice"]), &set(&["alice"]));
        assert_eq!(r.non_followers, vec!["alice"]);
        assert_eq!(r.fans, vec!["Alice"]);
    }
}
