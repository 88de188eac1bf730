use crate::options::CookieOptions;

use super::args::Args;

pub(super) fn push(args: &mut Args, cookies: &CookieOptions) {
    args.value_if_set("-b", &cookies.file);

    // curl accepts -b repeatedly, so a cookie file and inline pairs can coexist.
    let inline = cookies
        .entries
        .iter()
        .filter(|cookie| cookie.is_active())
        .map(|cookie| format!("{}={}", cookie.name, cookie.value))
        .collect::<Vec<_>>()
        .join("; ");
    args.value_if_set("-b", &inline);

    args.value_if_set("-c", &cookies.jar);
}
