use crate::options::TlsOptions;

use super::args::Args;

const DEFAULT_CERT_TYPE: &str = "PEM";

pub(super) fn push(args: &mut Args, tls: &TlsOptions) {
    args.flag_if(tls.insecure, "-k");

    if let Some(flag) = tls.version.curl_flag() {
        args.flag(flag);
    }

    if !tls.cert_path.is_empty() {
        args.value("--cert", &tls.cert_path);
        if tls.cert_type != DEFAULT_CERT_TYPE {
            args.value_if_set("--cert-type", &tls.cert_type);
        }
    }

    if !tls.key_path.is_empty() {
        args.value("--key", &tls.key_path);
        if tls.key_type != DEFAULT_CERT_TYPE {
            args.value_if_set("--key-type", &tls.key_type);
        }
    }

    args.value_if_set("--pass", &tls.key_password);
    args.value_if_set("--cacert", &tls.ca_cert_path);
    args.value_if_set("--capath", &tls.ca_path);
    args.value_if_set("--crlfile", &tls.crl_file);
    args.value_if_set("--pinnedpubkey", &tls.pinned_public_key);
    args.flag_if(tls.allow_beast, "--ssl-allow-beast");
    args.flag_if(tls.no_revoke, "--ssl-no-revoke");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::TlsVersion;
    use pretty_assertions::assert_eq;

    fn render(tls: &TlsOptions) -> Vec<String> {
        let mut args = Args::default();
        push(&mut args, tls);
        args.into_tokens()
    }

    #[test]
    fn defaults_emit_nothing() {
        assert!(render(&TlsOptions::default()).is_empty());
    }

    #[test]
    fn pem_types_are_implicit() {
        let tls = TlsOptions {
            cert_path: "client.pem".to_string(),
            key_path: "client.key".to_string(),
            ..TlsOptions::default()
        };
        assert_eq!(render(&tls), vec!["--cert", "client.pem", "--key", "client.key"]);
    }

    #[test]
    fn every_field_in_order() {
        let tls = TlsOptions {
            insecure: true,
            version: TlsVersion::Tls1_3,
            cert_path: "/certs/client.p12".to_string(),
            cert_type: "P12".to_string(),
            key_path: "/certs/client key.der".to_string(),
            key_type: "DER".to_string(),
            key_password: "hunter2!".to_string(),
            ca_cert_path: "/certs/ca.pem".to_string(),
            ca_path: "/etc/ssl/certs".to_string(),
            crl_file: "/certs/crl.pem".to_string(),
            pinned_public_key: "sha256//abc=".to_string(),
            allow_beast: true,
            no_revoke: true,
        };
        assert_eq!(
            render(&tls),
            vec![
                "-k",
                "--tlsv1.3",
                "--cert",
                "/certs/client.p12",
                "--cert-type",
                "P12",
                "--key",
                "'/certs/client key.der'",
                "--key-type",
                "DER",
                "--pass",
                "'hunter2!'",
                "--cacert",
                "/certs/ca.pem",
                "--capath",
                "/etc/ssl/certs",
                "--crlfile",
                "/certs/crl.pem",
                "--pinnedpubkey",
                "sha256//abc=",
                "--ssl-allow-beast",
                "--ssl-no-revoke",
            ]
        );
    }
}
