use crate::options::ProxyOptions;

use super::args::Args;

pub(super) fn push(args: &mut Args, proxy: &ProxyOptions) {
    if proxy.enabled && !proxy.host.is_empty() {
        let address = if proxy.port.is_empty() {
            proxy.host.clone()
        } else {
            format!("{}:{}", proxy.host, proxy.port)
        };
        args.value(proxy.kind.curl_flag(), &address);

        if !proxy.username.is_empty() {
            args.value("-U", &format!("{}:{}", proxy.username, proxy.password));
        }
        args.flag_if(proxy.tunnel, "-p");
    }

    args.value_if_set("--noproxy", &proxy.no_proxy);
}
