use std::fmt::Write as _;

use crate::compare::ComparisonResult;
use crate::github::UserDetails;

/// One row per listed username. Header and column order are part of the
/// compatibility surface; keep them stable.
pub fn format_comparison(r: &ComparisonResult) -> String {
    let mut out = String::from("category,username\n");
    for user in &r.non_followers {
        let _ = writeln!(out, "non_follower,{user}");
    }
    for user in &r.fans {
        let _ = writeln!(out, "fan,{user}");
    }
    out
}

pub fn format_repo_audit(flagged: &[UserDetails]) -> String {
    let mut out = String::from("username,public_repos\n");
    for d in flagged {
        let _ = writeln!(out, "{},{}", d.login, d.public_repos);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_rows_are_pinned() {
        let r = ComparisonResult {
            followers_total: 2,
            following_total: 2,
            non_followers: vec!["carol".to_string()],
            fans: vec!["alice".to_string()],
        };
        assert_eq!(
            format_comparison(&r),
            "category,username\nnon_follower,carol\nfan,alice\n"
        );
    }

    #[test]
    fn empty_result_is_header_only() {
        let r = ComparisonResult {
            followers_total: 0,
            following_total: 0,
            non_followers: Vec::new(),
            fans: Vec::new(),
        };
        assert_eq!(format_comparison(&r), "category,username\n");
    }

    #[test]
    fn repo_audit_rows_are_pinned() {
        let flagged = vec![UserDetails {
            login: "quiet".to_string(),
            public_repos: 0,
        }];
        assert_eq!(
            format_repo_audit(&flagged),
            "username,public_repos\nquiet,0\n"
        );
    }
}
