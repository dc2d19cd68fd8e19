use anyhow::Result;

use crate::compare::compare;
use crate::github::{GithubClient, collect_both};
use crate::{export, formatters};

use super::{Args, OutputFormat};

pub fn run_with_args(args: &Args) -> Result<()> {
    let creds = args.credentials()?;
    let client = GithubClient::new(creds)?;

    let pb = args.progress.then(|| {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.enable_steady_tick(std::time::Duration::from_millis(120));
        pb
    });

    let listed = collect_both(|kind| {
        if args.verbose > 0 {
            eprintln!("Fetching {} list for '{}'", kind.label(), client.user());
        }
        if let Some(ref pb) = pb {
            pb.set_message(format!("fetching {}", kind.label()));
        }
        client.list_relation(kind)
    });
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    // A failed collection discards anything already fetched; a one-sided
    // comparison would be misleading.
    let (followers, following) = listed?;

    let result = compare(&followers, &following);
    if args.verbose > 1 {
        eprintln!(
            "Compared sets: followers={}, following={}, non_followers={}, fans={}",
            result.followers_total,
            result.following_total,
            result.non_followers.len(),
            result.fans.len()
        );
    }

    let text = formatters::text::format(&result);
    print!("{text}");

    // Export only after the console report is fully rendered.
    if let Some(path) = &args.output {
        let contents = match args.format {
            OutputFormat::Txt => text,
            OutputFormat::Csv => formatters::csv::format_comparison(&result),
        };
        export::write_report(path, &contents)?;
        if args.verbose > 0 {
            eprintln!("Report written to {}", path.display());
        }
    }
    Ok(())
}
