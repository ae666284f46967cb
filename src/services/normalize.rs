//! # AI 응답 정규화
//!
//! 외부 AI의 응답 봉투(envelope)에서 텍스트를 꺼내고, 마크다운 코드 펜스를 벗겨냅니다.
//!
//! 실패는 두 단계로 나뉩니다:
//! 1. `extract_text()`는 절대 실패하지 않습니다. 봉투 모양이 다르면 빈 문자열을 돌려줍니다.
//! 2. `parse_question_pairs()`는 내용이 JSON 배열이 아니면 에러를 돌려줍니다.
//!
//! 덕분에 "응답 형식이 바뀜"과 "AI가 잘못된 내용을 생성함"이 서로 다른 지점에서 드러납니다.

use serde_json::Value;

use crate::models::QuestionPair;

/// 생성된 텍스트가 들어 있는 응답 봉투 내 고정 경로
const TEXT_POINTER: &str = "/candidates/0/content/parts/0/text";

/// 응답 봉투의 첫 번째 후보, 첫 번째 파트의 텍스트를 꺼냅니다.
///
/// 경로가 없거나 문자열이 아니면 빈 문자열을 반환합니다.
pub fn extract_text(envelope: &Value) -> String {
    envelope
        .pointer(TEXT_POINTER)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// 앞쪽 ```` ``` ````(뒤에 `json`이 붙을 수 있음, 대소문자 무시)과 뒤쪽 ```` ``` ````을
/// 제거하고 양끝 공백을 정리합니다.
///
/// 더 벗길 것이 없을 때까지 반복하므로 두 번 적용해도 결과가 같습니다.
pub fn strip_fences(text: &str) -> String {
    let mut current = text.trim();
    loop {
        let next = strip_once(current);
        if next == current {
            return current.to_string();
        }
        current = next;
    }
}

fn strip_once(text: &str) -> &str {
    let mut rest = text;
    if let Some(after_fence) = rest.strip_prefix("```") {
        rest = strip_prefix_ignore_case(after_fence, "json").unwrap_or(after_fence);
    }
    if let Some(before_fence) = rest.strip_suffix("```") {
        rest = before_fence;
    }
    rest.trim()
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}

/// 펜스를 벗긴 문자열을 `{question, answer}` 배열로 파싱합니다.
pub fn parse_question_pairs(cleaned: &str) -> Result<Vec<QuestionPair>, serde_json::Error> {
    serde_json::from_str(cleaned)
}
