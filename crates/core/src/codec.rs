//! Wire codec for the chat-completion endpoint.
//!
//! Requests are encoded with `serde_json`, so arbitrary answer text (quotes,
//! backslashes, newlines, other control characters) is always embedded safely.
//! Replies are not parsed as a whole: only one string field is ever needed, so
//! the decoder scans for it and treats any malformed or truncated body as
//! "no content" rather than an error.

use crate::prompt::Prompt;
use secrecy::SecretString;
use serde_json::json;
use std::str::Chars;

/// The field carrying the assistant's text in a chat-completion reply.
pub const CONTENT_KEY: &str = "content";

/// Generation parameters sent with every request.
///
/// These are fixed for the process; only the model identifier can be
/// overridden, once, from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
    pub stop: Vec<String>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            max_tokens: 200,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.6,
            stop: vec!["Q:".to_string()],
        }
    }
}

impl GenerationParams {
    /// Returns the default parameters with a different model identifier.
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }
}

/// A fully shaped outbound request, ready to be sent.
#[derive(Debug)]
pub struct WireRequest<'a> {
    pub endpoint: &'a str,
    /// Presented as `Authorization: Bearer <credential>`.
    pub credential: &'a SecretString,
    /// JSON request body.
    pub body: String,
}

/// Encodes a prompt into a chat-completion request with a single user message.
pub fn encode<'a>(
    prompt: &Prompt,
    params: &GenerationParams,
    endpoint: &'a str,
    credential: &'a SecretString,
) -> WireRequest<'a> {
    let body = json!({
        "model": params.model,
        "messages": [{ "role": "user", "content": prompt.as_str() }],
        "temperature": params.temperature,
        "max_tokens": params.max_tokens,
        "top_p": params.top_p,
        "frequency_penalty": params.frequency_penalty,
        "presence_penalty": params.presence_penalty,
        "stop": params.stop,
    });

    WireRequest {
        endpoint,
        credential,
        body: body.to_string(),
    }
}

/// Extracts the assistant text from a reply body.
///
/// Returns `None` when the body has no string `content` field, when the value
/// is unterminated, or when it unescapes to nothing but whitespace.
pub fn decode(body: &str) -> Option<String> {
    let raw = extract_string_field(body, CONTENT_KEY)?;
    let text = unescape(raw);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Returns the raw (still escaped) value of the first string field named `key`.
///
/// Occurrences of the key whose value is not a string, such as
/// `"content": null`, are skipped. An unterminated value ends the search.
pub fn extract_string_field<'a>(body: &'a str, key: &str) -> Option<&'a str> {
    let marker = format!("\"{key}\"");
    let mut from = 0;

    while let Some(offset) = body[from..].find(&marker) {
        let key_end = from + offset + marker.len();
        if let Some(start) = string_value_start(body, key_end) {
            let end = closing_quote(body, start)?;
            return Some(&body[start..end]);
        }
        from = key_end;
    }
    None
}

/// If `key_end` is followed by `:` and an opening quote (JSON whitespace
/// allowed around the colon), returns the index just past that quote.
fn string_value_start(body: &str, key_end: usize) -> Option<usize> {
    let is_ws = |c: char| c.is_ascii_whitespace();
    let value = body[key_end..]
        .trim_start_matches(is_ws)
        .strip_prefix(':')?
        .trim_start_matches(is_ws);
    value.strip_prefix('"')?;
    Some(body.len() - value.len() + 1)
}

/// Finds the first quote at or after `start` that is not escaped.
///
/// A quote is escaped when it is preceded by an odd run of backslashes. Both
/// bytes are ASCII, so scanning bytes is safe for any UTF-8 input.
pub(crate) fn closing_quote(body: &str, start: usize) -> Option<usize> {
    let mut backslashes = 0usize;
    for (i, byte) in body.bytes().enumerate().skip(start) {
        match byte {
            b'\\' => backslashes += 1,
            b'"' if backslashes % 2 == 0 => return Some(i),
            _ => backslashes = 0,
        }
    }
    None
}

/// Reverses JSON string escaping.
///
/// Unknown or malformed escape sequences are kept verbatim.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('u') => unescape_unicode(&mut chars, &mut out),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Handles the part of a `\uXXXX` escape after the `u`, joining surrogate pairs.
fn unescape_unicode(chars: &mut Chars<'_>, out: &mut String) {
    let rest = chars.as_str();
    let Some(unit) = hex4(rest) else {
        out.push_str("\\u");
        return;
    };

    if (0xD800..0xDC00).contains(&unit) {
        let low = rest[4..].strip_prefix("\\u").and_then(hex4);
        if let Some(low) = low.filter(|low| (0xDC00..0xE000).contains(low)) {
            let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
            if let Some(c) = char::from_u32(code) {
                out.push(c);
                *chars = rest[10..].chars();
                return;
            }
        }
    }

    match char::from_u32(unit) {
        Some(c) => {
            out.push(c);
            *chars = rest[4..].chars();
        }
        // lone surrogate
        None => out.push_str("\\u"),
    }
}

fn hex4(s: &str) -> Option<u32> {
    let digits = s.get(..4)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn decodes_escaped_quotes_and_newlines() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"a \"quoted\" word\nline2"}}]}"#;
        assert_eq!(decode(body).as_deref(), Some("a \"quoted\" word\nline2"));
    }

    #[test]
    fn missing_marker_is_absent() {
        assert_eq!(decode(r#"{"error":{"message":"nope"}}"#), None);
        assert_eq!(decode(""), None);
    }

    #[test]
    fn unterminated_value_is_absent() {
        assert_eq!(decode(r#"{"content":"cut off mid-sen"#), None);
        assert_eq!(decode(r#"{"content":"ends on an escaped quote \""#), None);
    }

    #[test]
    fn whitespace_only_content_is_absent() {
        assert_eq!(decode(r#"{"content":"  \n\t "}"#), None);
    }

    #[test]
    fn result_is_trimmed() {
        assert_eq!(
            decode(r#"{"content":"\n  CRITIQUE: ok  \n"}"#).as_deref(),
            Some("CRITIQUE: ok")
        );
    }

    #[test]
    fn backslash_run_parity_decides_termination() {
        // Even run: the quote closes the value.
        assert_eq!(
            extract_string_field(r#"{"content":"C:\\","x":1}"#, "content"),
            Some(r#"C:\\"#)
        );
        // Odd run: the quote is part of the value.
        assert_eq!(
            extract_string_field(r#"{"content":"say \\\"hi\\\"","x":1}"#, "content"),
            Some(r#"say \\\"hi\\\""#)
        );
        assert_eq!(closing_quote(r#"\\\\""#, 0), Some(4));
        assert_eq!(closing_quote(r#"\\\""#, 0), None);
    }

    #[test]
    fn tolerates_pretty_printed_bodies() {
        let body = "{\n  \"choices\": [\n    {\n      \"message\": {\n        \"role\": \"assistant\",\n        \"content\" :  \"CRITIQUE: It\\u2019s solid.\\nTIPS:\\n- Breathe\"\n      }\n    }\n  ]\n}";
        assert_eq!(
            decode(body).as_deref(),
            Some("CRITIQUE: It\u{2019}s solid.\nTIPS:\n- Breathe")
        );
    }

    #[test]
    fn skips_non_string_occurrences() {
        let body = r#"{"content":null,"choices":[{"message":{"content":"hi"}}]}"#;
        assert_eq!(decode(body).as_deref(), Some("hi"));
    }

    #[test]
    fn unescapes_surrogate_pairs_and_keeps_malformed_escapes() {
        assert_eq!(unescape(r"\ud83d\ude80 go"), "\u{1F680} go");
        assert_eq!(unescape(r"\ud83d alone"), r"\ud83d alone");
        assert_eq!(unescape(r"\uZZZZ \q \/ \r"), "\\uZZZZ \\q / \r");
        assert_eq!(unescape("trailing \\"), "trailing \\");
    }

    #[test]
    fn encoded_prompt_decodes_back_unchanged() {
        let credential = SecretString::from("sk-test".to_string());
        let prompt = Prompt::build(
            "- Technical depth & trade-offs\n",
            "Debugging approach?",
            "I print \"state\" to C:\\logs\\out.txt,\nthen\tbisect \u{1} and \u{1F41B}.",
        );

        let request = encode(&prompt, &GenerationParams::default(), "http://x", &credential);

        // The first `content` field in the request is the user message.
        assert_eq!(decode(&request.body).as_deref(), Some(prompt.as_str()));
    }

    #[test]
    fn encoded_body_carries_generation_parameters() {
        let credential = SecretString::from("sk-test".to_string());
        let prompt = Prompt::build("c", "q", "a");
        let params = GenerationParams::with_model("gpt-4o-mini");

        let request = encode(&prompt, &params, "https://api.example/v1", &credential);
        let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], prompt.as_str());
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["max_tokens"], 200);
        assert_eq!(body["top_p"], 1.0);
        assert_eq!(body["frequency_penalty"], 0.0);
        assert_eq!(body["presence_penalty"], 0.6);
        assert_eq!(body["stop"], json!(["Q:"]));
        assert_eq!(request.endpoint, "https://api.example/v1");
        assert_eq!(request.credential.expose_secret(), "sk-test");
    }

    #[test]
    fn wire_request_debug_redacts_credential() {
        let credential = SecretString::from("sk-very-secret".to_string());
        let prompt = Prompt::build("c", "q", "a");
        let request = encode(&prompt, &GenerationParams::default(), "u", &credential);
        assert!(!format!("{request:?}").contains("sk-very-secret"));
    }
}
