use once_cell::sync::Lazy;
use regex::Regex;

/// Token printed by curl's `-w` template right before the status code.
pub const SENTINEL_MARKER: &str = "__HTTP_CODE__";

static STATUS_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^HTTP/\d(?:\.\d)? \d{3}").expect("valid status line regex")
});

const HEADER_TERMINATOR: &str = "\r\n\r\n";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOutput {
    pub headers: String,
    pub body: String,
    pub status_code: Option<u16>,
}

/// Splits captured stdout into header block, body and the sentinel status.
///
/// A missing marker or an unparsable status is not an error; the status is
/// simply absent. curl reports `000` when no response arrived, which is
/// treated the same way.
pub fn parse_output(raw: &str) -> ParsedOutput {
    let separator = format!("\n{SENTINEL_MARKER}:");
    let (candidate, status_code) = match raw.rfind(&separator) {
        Some(index) => {
            let tail = &raw[index + separator.len()..];
            let status = tail.trim().parse::<u16>().ok().filter(|code| *code > 0);
            (&raw[..index], status)
        }
        None => (raw, None),
    };

    let (headers, body) = split_header_block(candidate);
    ParsedOutput {
        headers: headers.to_string(),
        body: body.to_string(),
        status_code,
    }
}

// Only the first blank line counts; later header blocks from redirect hops
// stay in the body. Without a blank line nothing is split off, so truncated
// output stays readable as body.
fn split_header_block(text: &str) -> (&str, &str) {
    if !STATUS_LINE.is_match(text) {
        return ("", text);
    }
    match text.split_once(HEADER_TERMINATOR) {
        Some((headers, body)) => (headers, body),
        None => ("", text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_is_read_from_the_sentinel() {
        let parsed = parse_output("body-text\n__HTTP_CODE__:404");
        assert_eq!(parsed.body, "body-text");
        assert_eq!(parsed.headers, "");
        assert_eq!(parsed.status_code, Some(404));
    }

    #[test]
    fn missing_marker_keeps_the_whole_text() {
        let parsed = parse_output("plain output\nwith lines");
        assert_eq!(parsed.body, "plain output\nwith lines");
        assert_eq!(parsed.status_code, None);
    }

    #[test]
    fn malformed_status_is_absent_but_body_is_stripped() {
        let parsed = parse_output("{}\n__HTTP_CODE__:abc");
        assert_eq!(parsed.body, "{}");
        assert_eq!(parsed.status_code, None);

        let parsed = parse_output("\n__HTTP_CODE__:  201 \n");
        assert_eq!(parsed.body, "");
        assert_eq!(parsed.status_code, Some(201));
    }

    #[test]
    fn no_response_code_means_no_status() {
        let parsed = parse_output("\n__HTTP_CODE__:000");
        assert_eq!(parsed.status_code, None);
    }

    #[test]
    fn marker_inside_the_body_does_not_split_early() {
        let parsed = parse_output("docs mention\n__HTTP_CODE__:xyz here\n__HTTP_CODE__:200");
        assert_eq!(parsed.body, "docs mention\n__HTTP_CODE__:xyz here");
        assert_eq!(parsed.status_code, Some(200));
    }

    #[test]
    fn header_block_is_split_from_the_body() {
        let raw = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n{\"ok\":true}\n__HTTP_CODE__:200";
        let parsed = parse_output(raw);
        assert_eq!(parsed.headers, "HTTP/1.1 200 OK\r\nContent-Type: application/json");
        assert_eq!(parsed.body, "{\"ok\":true}");
        assert_eq!(parsed.status_code, Some(200));
    }

    #[test]
    fn redirect_hops_are_folded_into_the_body() {
        let raw = concat!(
            "HTTP/2 301\r\nlocation: /next\r\n\r\n",
            "HTTP/2 200\r\ncontent-type: text/plain\r\n\r\n",
            "done",
            "\n__HTTP_CODE__:200"
        );
        let parsed = parse_output(raw);
        assert_eq!(parsed.headers, "HTTP/2 301\r\nlocation: /next");
        assert_eq!(parsed.body, "HTTP/2 200\r\ncontent-type: text/plain\r\n\r\ndone");
    }

    #[test]
    fn body_mentioning_http_is_not_mistaken_for_headers() {
        let raw = "see HTTP/1.1 spec\r\n\r\nsection 2\n__HTTP_CODE__:200";
        let parsed = parse_output(raw);
        assert_eq!(parsed.headers, "");
        assert_eq!(parsed.body, "see HTTP/1.1 spec\r\n\r\nsection 2");
    }

    #[test]
    fn headers_without_body() {
        let parsed =
            parse_output("HTTP/1.1 204 No Content\r\nServer: x\r\n\r\n\n__HTTP_CODE__:204");
        assert_eq!(parsed.headers, "HTTP/1.1 204 No Content\r\nServer: x");
        assert_eq!(parsed.body, "");
        assert_eq!(parsed.status_code, Some(204));
    }

    #[test]
    fn unterminated_header_block_stays_in_the_body() {
        let parsed =
            parse_output("HTTP/1.1 200 OK\r\nServer: x\r\npartial body\n__HTTP_CODE__:200");
        assert_eq!(parsed.headers, "");
        assert_eq!(parsed.body, "HTTP/1.1 200 OK\r\nServer: x\r\npartial body");
        assert_eq!(parsed.status_code, Some(200));

        let cut_off = parse_output("HTTP/1.1 200 OK\r\nContent-Le");
        assert_eq!(cut_off.headers, "");
        assert_eq!(cut_off.body, "HTTP/1.1 200 OK\r\nContent-Le");
        assert_eq!(cut_off.status_code, None);
    }
}
