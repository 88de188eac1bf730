use crate::options::{ConnectionOptions, RedirectOptions};

use super::args::Args;

pub(super) fn push(args: &mut Args, connection: &ConnectionOptions) {
    args.value_if_set("--connect-timeout", &connection.connect_timeout);
    args.value_if_set("-m", &connection.max_time);
    args.value_if_set("--limit-rate", &connection.limit_rate);
    args.value_if_set("-Y", &connection.speed_limit);
    args.value_if_set("-y", &connection.speed_time);
    args.value_if_set("--retry", &connection.retry);
    args.value_if_set("--retry-delay", &connection.retry_delay);
    args.value_if_set("--retry-max-time", &connection.retry_max_time);
    args.flag_if(connection.retry_all_errors, "--retry-all-errors");
    args.flag_if(connection.compressed, "--compressed");
    args.flag_if(connection.tcp_nodelay, "--tcp-nodelay");
    args.flag_if(connection.tcp_fastopen, "--tcp-fastopen");
    args.flag_if(connection.no_keepalive, "--no-keepalive");
    args.value_if_set("--keepalive-time", &connection.keepalive_time);
}

pub(super) fn push_redirects(args: &mut Args, redirects: &RedirectOptions) {
    if !redirects.follow {
        return;
    }
    args.flag("-L");
    args.value_if_set("--max-redirs", &redirects.max_redirects);
    if redirects.post_on_redirect {
        args.flag("--post301");
        args.flag("--post302");
        args.flag("--post303");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tuning_flags_in_order() {
        let connection = ConnectionOptions {
            connect_timeout: "5".to_string(),
            max_time: "30".to_string(),
            limit_rate: "100K".to_string(),
            speed_limit: "1000".to_string(),
            speed_time: "10".to_string(),
            retry: "3".to_string(),
            retry_delay: "2".to_string(),
            retry_max_time: "60".to_string(),
            retry_all_errors: true,
            compressed: true,
            tcp_nodelay: true,
            tcp_fastopen: true,
            no_keepalive: true,
            keepalive_time: "15".to_string(),
        };
        let mut args = Args::default();
        push(&mut args, &connection);
        assert_eq!(
            args.into_tokens(),
            vec![
                "--connect-timeout",
                "5",
                "-m",
                "30",
                "--limit-rate",
                "100K",
                "-Y",
                "1000",
                "-y",
                "10",
                "--retry",
                "3",
                "--retry-delay",
                "2",
                "--retry-max-time",
                "60",
                "--retry-all-errors",
                "--compressed",
                "--tcp-nodelay",
                "--tcp-fastopen",
                "--no-keepalive",
                "--keepalive-time",
                "15",
            ]
        );
    }

    #[test]
    fn redirect_details_require_following() {
        let redirects = RedirectOptions {
            follow: false,
            max_redirects: "5".to_string(),
            post_on_redirect: true,
            auto_referer: false,
        };
        let mut args = Args::default();
        push_redirects(&mut args, &redirects);
        assert!(args.into_tokens().is_empty());
    }

    #[test]
    fn repost_expands_to_three_flags() {
        let redirects = RedirectOptions {
            max_redirects: "5".to_string(),
            post_on_redirect: true,
            ..RedirectOptions::default()
        };
        let mut args = Args::default();
        push_redirects(&mut args, &redirects);
        assert_eq!(
            args.into_tokens(),
            vec!["-L", "--max-redirs", "5", "--post301", "--post302", "--post303"]
        );
    }
}
