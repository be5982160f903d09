const ENTITIES: [(&str, &str); 6] = [
    ("&amp;", "&"),
    ("&#39;", "'"),
    ("&quot;", "\""),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&nbsp;", " "),
];

/// Decodes the handful of HTML character references that show up in caption
/// text. Works in a single pass, so `&amp;lt;` becomes `&lt;` and not `<`.
/// Anything else starting with `&` is copied through untouched.
pub fn decode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(idx) = rest.find('&') {
        out.push_str(&rest[..idx]);
        rest = &rest[idx..];
        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, literal)) => {
                out.push_str(literal);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
