use crate::{
    options::{BodyKind, RequestOptions},
    shell::escape,
};

use super::args::Args;

pub(super) fn push(args: &mut Args, options: &RequestOptions) {
    let body = &options.body;
    match body.kind {
        BodyKind::None => {}
        BodyKind::Raw => {
            if body.raw.is_empty() {
                return;
            }
            if !options.has_content_type_header() {
                args.value("-H", &format!("Content-Type: {}", body.raw_type.mime()));
            }
            args.value("-d", &body.raw);
        }
        BodyKind::FormData => {
            for field in body.form_data.iter().filter(|f| f.is_active()) {
                let value = if field.is_file {
                    let mut value = format!("{}=@{}", field.key, field.file_path);
                    if !field.content_type.is_empty() {
                        value.push_str(";type=");
                        value.push_str(&field.content_type);
                    }
                    value
                } else {
                    format!("{}={}", field.key, field.value)
                };
                args.value("-F", &value);
            }
        }
        BodyKind::UrlEncoded => {
            for field in body.url_encoded.iter().filter(|f| f.is_active()) {
                args.value("--data-urlencode", &format!("{}={}", field.key, field.value));
            }
        }
        BodyKind::Binary => {
            if !body.binary_path.is_empty() {
                args.literal("--data-binary", format!("@{}", escape(&body.binary_path)));
            }
        }
    }
}
