use crate::options::{DnsOptions, MiscOptions, NetworkOptions};

use super::args::Args;

pub(super) fn push_dns(args: &mut Args, dns: &DnsOptions) {
    args.value_if_set("--dns-servers", &dns.servers);
    args.value_if_set("--dns-interface", &dns.interface);
    args.value_if_set("--dns-ipv4-addr", &dns.ipv4_addr);
    args.value_if_set("--dns-ipv6-addr", &dns.ipv6_addr);
    for entry in dns.resolve.iter().filter(|entry| entry.is_active()) {
        args.value("--resolve", &format!("{}:{}", entry.key, entry.value));
    }
}

pub(super) fn push_interface(args: &mut Args, network: &NetworkOptions) {
    args.value_if_set("--interface", &network.interface);
    args.value_if_set("--local-port", &network.local_port);
    args.flag_if(network.ipv4_only, "-4");
    args.flag_if(network.ipv6_only, "-6");
}

pub(super) fn push_misc(args: &mut Args, misc: &MiscOptions) {
    args.value_if_set("-r", &misc.range);
    args.value_if_set("-C", &misc.continue_at);
    args.flag_if(misc.create_dirs, "--create-dirs");
    args.flag_if(misc.crlf, "--crlf");
    args.flag_if(misc.path_as_is, "--path-as-is");
    args.flag_if(misc.no_buffer, "-N");
    args.flag_if(misc.no_session_id, "--no-sessionid");
    args.flag_if(misc.remote_time, "-R");
    if misc.parallel {
        args.flag("-Z");
        args.value_if_set("--parallel-max", &misc.parallel_max);
    }
}
