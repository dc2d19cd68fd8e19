use std::fmt::Write as _;

use crate::compare::ComparisonResult;
use crate::github::UserDetails;

/// Human-readable report, used verbatim for the console and for txt export.
pub fn format(r: &ComparisonResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total followers: {}", r.followers_total);
    let _ = writeln!(out, "Total following: {}", r.following_total);
    out.push('\n');
    push_section(
        &mut out,
        "Users you follow who do not follow you back",
        &r.non_followers,
    );
    out.push('\n');
    push_section(
        &mut out,
        "Users who follow you but you do not follow back",
        &r.fans,
    );
    out
}

pub fn format_repo_audit(flagged: &[UserDetails], max_repos: u32, checked: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Checked {checked} followed users.");
    out.push('\n');
    let _ = writeln!(
        out,
        "Followed users with {max_repos} or fewer public repositories ({}):",
        flagged.len()
    );
    if flagged.is_empty() {
        out.push_str("(none)\n");
    } else {
        for d in flagged {
            let _ = writeln!(out, "- {} ({} public repos)", d.login, d.public_repos);
        }
    }
    out
}

fn push_section(out: &mut String, heading: &str, users: &[String]) {
    let _ = writeln!(out, "{heading} ({}):", users.len());
    if users.is_empty() {
        out.push_str("(none)\n");
    } else {
        for user in users {
            let _ = writeln!(out, "- {user}");
        }
    }
}
