use crate::options::{AuthKind, AuthOptions};

use super::args::Args;

pub(super) fn push(args: &mut Args, auth: &AuthOptions) {
    match auth.kind {
        AuthKind::None => {}
        AuthKind::Bearer => {
            if !auth.bearer_token.is_empty() {
                args.value("-H", &format!("Authorization: Bearer {}", auth.bearer_token));
            }
        }
        AuthKind::Negotiate => {
            args.flag("--negotiate");
            // curl needs -u to enable SPNEGO; an empty pair means "use the ticket".
            if auth.username.is_empty() {
                args.literal("-u", ":");
            } else {
                push_credentials(args, auth);
            }
        }
        AuthKind::SigV4 => {
            let mut descriptor = auth.sigv4_provider.clone();
            for part in [&auth.sigv4_region, &auth.sigv4_service] {
                if !part.is_empty() {
                    descriptor.push(':');
                    descriptor.push_str(part);
                }
            }
            args.value("--aws-sigv4", &descriptor);
            push_credentials(args, auth);
        }
        AuthKind::Basic | AuthKind::Digest | AuthKind::Ntlm => {
            if let Some(flag) = auth.kind.curl_flag() {
                args.flag(flag);
            }
            push_credentials(args, auth);
        }
    }
}

fn push_credentials(args: &mut Args, auth: &AuthOptions) {
    if !auth.username.is_empty() {
        args.value("-u", &format!("{}:{}", auth.username, auth.password));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(auth: &AuthOptions) -> Vec<String> {
        let mut args = Args::default();
        push(&mut args, auth);
        args.into_tokens()
    }

    fn auth(kind: AuthKind, username: &str, password: &str) -> AuthOptions {
        AuthOptions {
            kind,
            username: username.to_string(),
            password: password.to_string(),
            ..AuthOptions::default()
        }
    }

    #[test]
    fn schemes_with_credentials() {
        assert_eq!(
            render(&auth(AuthKind::Basic, "ada", "s3cret")),
            vec!["--basic", "-u", "ada:s3cret"]
        );
        assert_eq!(
            render(&auth(AuthKind::Digest, "ada", "p w")),
            vec!["--digest", "-u", "'ada:p w'"]
        );
        assert_eq!(render(&auth(AuthKind::Ntlm, "", "")), vec!["--ntlm"]);
    }

    #[test]
    fn negotiate_always_passes_credentials() {
        assert_eq!(
            render(&auth(AuthKind::Negotiate, "", "")),
            vec!["--negotiate", "-u", ":"]
        );
        assert_eq!(
            render(&auth(AuthKind::Negotiate, "svc", "pw")),
            vec!["--negotiate", "-u", "svc:pw"]
        );
    }

    #[test]
    fn bearer_becomes_an_authorization_header() {
        let mut options = auth(AuthKind::Bearer, "ignored", "ignored");
        options.bearer_token = "tok123".to_string();
        assert_eq!(render(&options), vec!["-H", "'Authorization: Bearer tok123'"]);

        options.bearer_token.clear();
        assert!(render(&options).is_empty());
    }

    #[test]
    fn sigv4_descriptor_joins_optional_parts() {
        let mut options = auth(AuthKind::SigV4, "AKID", "secret");
        assert_eq!(
            render(&options),
            vec!["--aws-sigv4", "aws:amz", "-u", "AKID:secret"]
        );

        options.sigv4_region = "eu-west-1".to_string();
        options.sigv4_service = "s3".to_string();
        assert_eq!(
            render(&options),
            vec!["--aws-sigv4", "aws:amz:eu-west-1:s3", "-u", "AKID:secret"]
        );

        options.sigv4_region.clear();
        options.username.clear();
        assert_eq!(render(&options), vec!["--aws-sigv4", "aws:amz:s3"]);
    }

    #[test]
    fn none_emits_nothing() {
        assert!(render(&auth(AuthKind::None, "ada", "pw")).is_empty());
    }
}
