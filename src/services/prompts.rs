//! # 프롬프트 빌더
//!
//! 외부 생성형 AI에 보낼 지시문을 만드는 순수 함수들입니다. I/O가 없고 결정적입니다.
//!
//! - `build_question_prompt()`: 직무/경력/주제/개수 → 질문·답변 JSON 배열 생성 지시문
//! - `build_explain_prompt()`: 질문 → 개념 설명 지시문
//!
//! 개수의 범위 검증은 호출하는 쪽(라우트, 클라이언트 위저드)에서 합니다.

/// 면접 질문/답변 생성 지시문을 만듭니다.
///
/// 주제 목록은 ", "로 이어 붙입니다.
/// AI에게 정확히 `count`개의 `{question, answer}` 객체로 된 순수 JSON 배열만
/// 응답하라고 지시합니다. 마크다운 펜스나 앞뒤 설명은 금지합니다.
pub fn build_question_prompt(role: &str, experience: &str, topics: &[String], count: u32) -> String {
    let topics = topics.join(", ");
    format!(
        r#"You are an AI trained as a technical interviewer.

Generate exactly {count} high-quality, real-world technical interview questions and answers in strict JSON format.

Details:
- Role: {role}
- Experience Level: {experience}
- Focus Topics: {topics}

Instructions:
- Respond ONLY with a pure JSON array of exactly {count} objects like this:
[
  {{
    "question": "Explain X in context of Y?",
    "answer": "X is ... and it helps Y by ..."
  }}
]
- Do NOT include:
  - Markdown syntax or code fences (e.g., ```json)
  - Introductory or trailing text
  - Explanations outside the JSON structure
- Ensure:
  - No trailing commas
  - The response is directly parseable as JSON

Keep the questions thoughtful, and the answers concise but informative."#
    )
}

/// 개념 설명 지시문을 만듭니다. 응답은 펜스 없는 일반 문장이어야 합니다.
pub fn build_explain_prompt(question: &str) -> String {
    format!(
        r#"You are an AI tutor who helps candidates prepare for technical interviews.

Explain the following concept in simple, clear language for a beginner:

"{question}"

Instructions:
- Focus on clarity, structure, and depth.
- Include examples or analogies if helpful.
- Make it conversational and easy to understand.
- Respond with plain prose only. Do NOT include markdown or code fences like ```.

Begin your explanation now:"#
    )
}
