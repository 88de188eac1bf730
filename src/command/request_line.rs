use crate::options::{HttpMethod, RequestOptions};

use super::args::Args;

const AUTO_REFERER: &str = ";auto";

pub(super) fn push(args: &mut Args, options: &RequestOptions) {
    if !options.custom_method.is_empty() {
        args.value("-X", &options.custom_method);
    } else if options.method != HttpMethod::Get {
        args.literal("-X", options.method.as_str());
    }

    if let Some(flag) = options.http_version.curl_flag() {
        args.flag(flag);
    }

    for header in options.headers.iter().filter(|h| h.is_active()) {
        args.value("-H", &format!("{}: {}", header.key, header.value));
    }

    args.value_if_set("-A", &options.user_agent);

    let auto_referer = options.redirects.auto_referer;
    if !options.referer.is_empty() {
        if auto_referer {
            args.value("-e", &format!("{}{}", options.referer, AUTO_REFERER));
        } else {
            args.value("-e", &options.referer);
        }
    } else if auto_referer {
        args.value("-e", AUTO_REFERER);
    }
}
