use std::thread;
use std::time::Duration;

use anyhow::Result;

use crate::github::{FetchError, GithubClient, RelationKind, UserDetails};
use crate::{export, formatters};

use super::{Args, OutputFormat, ReposArgs};

/// Audits the followed accounts for low public-repo counts, one detail
/// request per user with a pacing delay between requests.
pub fn run_repos(args: &Args, repos: &ReposArgs) -> Result<()> {
    let creds = args.credentials()?;
    let client = GithubClient::new(creds)?;

    if args.verbose > 0 {
        eprintln!("Fetching following list for '{}'", client.user());
    }
    let following = client.list_relation(RelationKind::Following)?;

    let pb = args.progress.then(|| {
        let pb = indicatif::ProgressBar::new(following.len() as u64);
        pb.set_style(
            indicatif::ProgressStyle::with_template("{spinner} {pos}/{len} users {wide_bar} {eta}")
                .unwrap(),
        );
        pb
    });

    let mut flagged: Vec<UserDetails> = Vec::new();
    // `following` iterates in sorted order, so `flagged` is born sorted.
    for (i, login) in following.iter().enumerate() {
        if i > 0 {
            thread::sleep(Duration::from_millis(repos.delay_ms));
        }
        match client.user_details(login) {
            Ok(details) => {
                if args.verbose > 1 {
                    eprintln!(
                        "{}/{}: '{}' has {} public repos",
                        i + 1,
                        following.len(),
                        details.login,
                        details.public_repos
                    );
                }
                if details.public_repos <= repos.max_repos {
                    flagged.push(details);
                }
            }
            Err(e @ (FetchError::Auth | FetchError::RateLimit { .. })) => {
                if let Some(ref pb) = pb {
                    pb.finish_and_clear();
                }
                return Err(e.into());
            }
            Err(e) => {
                // A single missing or malformed profile shouldn't sink the
                // whole audit.
                if args.verbose > 0 {
                    eprintln!("skipping '{login}': {e}");
                }
            }
        }
        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let text = formatters::text::format_repo_audit(&flagged, repos.max_repos, following.len());
    print!("{text}");

    if let Some(path) = &args.output {
        let contents = match args.format {
            OutputFormat::Txt => text,
            OutputFormat::Csv => formatters::csv::format_repo_audit(&flagged),
        };
        export::write_report(path, &contents)?;
        if args.verbose > 0 {
            eprintln!("Report written to {}", path.display());
        }
    }
    Ok(())
}
