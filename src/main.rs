use ghmutuals::cli;
use ghmutuals::export::ExportError;
use ghmutuals::github::FetchError;

fn main() {
    // Delegate to CLI runner; errors are printed nicely inside.
    if let Err(err) = cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(exit_code(&err));
    }
}

/// Maps the error taxonomy to distinct exit codes: 2 auth, 3 rate limit,
/// 4 network, 5 export, 1 anything else.
fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(fetch) = err.downcast_ref::<FetchError>() {
        return fetch.exit_code();
    }
    if err.downcast_ref::<ExportError>().is_some() {
        return 5;
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_failure_maps_to_code_5() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = anyhow::Error::from(ExportError::Write {
            path: "/nope/report.txt".to_string(),
            source: io,
        });
        assert_eq!(exit_code(&err), 5);
    }

    #[test]
    fn fetch_errors_keep_their_own_codes_through_anyhow() {
        assert_eq!(exit_code(&anyhow::Error::from(FetchError::Auth)), 2);
        assert_eq!(
            exit_code(&anyhow::Error::from(FetchError::RateLimit {
                status: 403,
                detail: String::new(),
            })),
            3
        );
    }

    #[test]
    fn other_errors_fall_back_to_code_1() {
        assert_eq!(exit_code(&anyhow::anyhow!("unexpected")), 1);
    }
}
